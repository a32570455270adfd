// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! reqkit CLI
//!
//! Example usage and demonstration of the reqkit library.

use std::env;
use std::process::ExitCode;

use anyhow::{bail, Context};
use reqkit::{ClientConfig, Params, RequestOptions, Response};
use serde_json::Value;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("reqkit=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    if let Err(e) = reqkit::configure(ClientConfig::from_env()) {
        eprintln!("Failed to configure client: {}", e);
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "get" if args.len() >= 3 => get(&args[2], &args[3..]).await,
        "post" if args.len() >= 3 => post(&args[2], args.get(3).map(String::as_str)).await,
        "form" if args.len() >= 3 => form(&args[2], &args[3..]).await,
        "get" | "post" | "form" => {
            eprintln!("Usage: reqkit {} <url> ...", args[1]);
            return ExitCode::from(1);
        }
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("reqkit {}", reqkit::VERSION);
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"reqkit - Small async HTTP request helpers

USAGE:
    reqkit <COMMAND> [ARGS]

COMMANDS:
    get <url> [key=value...]     GET with query parameters
    post <url> [json]            POST a JSON body
    form <url> [key=value...]    POST fields as multipart/form-data
    help                         Show this help message
    version                      Show version information

ENVIRONMENT:
    REQKIT_BASE_URL      Prefix for every URL
    REQKIT_USER_AGENT    User agent override
    REQKIT_PROXY         Proxy URL
    RUST_LOG             Log filter (default: reqkit=info)

EXAMPLES:
    reqkit get https://httpbin.org/get id=5
    reqkit post https://httpbin.org/post '{{"name":"a"}}'
    reqkit form https://httpbin.org/post name=a file=notes.txt
"#
    );
}

async fn get(url: &str, pairs: &[String]) -> anyhow::Result<ExitCode> {
    let options = RequestOptions::new().fields(parse_pairs(pairs)?);
    Ok(report(reqkit::get(url, options).await))
}

async fn post(url: &str, json: Option<&str>) -> anyhow::Result<ExitCode> {
    let value: Value = match json {
        Some(raw) => serde_json::from_str(raw).context("body is not valid JSON")?,
        None => Value::Object(Params::new()),
    };
    Ok(report(reqkit::post(url, RequestOptions::new().json(value)).await))
}

async fn form(url: &str, pairs: &[String]) -> anyhow::Result<ExitCode> {
    let options = RequestOptions::new()
        .fields(parse_pairs(pairs)?)
        .on_upload_progress(|pct| tracing::info!(percent = pct, "Upload progress"));
    Ok(report(reqkit::send_form_data(url, options).await))
}

fn parse_pairs(pairs: &[String]) -> anyhow::Result<Params> {
    let mut params = Params::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("expected key=value, got '{}'", pair);
        };
        params.insert(key.to_string(), Value::String(value.to_string()));
    }
    Ok(params)
}

fn report(result: reqkit::Result<Response>) -> ExitCode {
    match result {
        Ok(response) => {
            print_response(&response);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            if let Some(response) = e.response() {
                print_response(response);
            }
            ExitCode::from(1)
        }
    }
}

fn print_response(response: &Response) {
    println!("\n=== Response ===");
    println!("Status: {}", response.status_code);
    println!("URL: {} {}", response.method, response.url);
    println!("Content-Type: {:?}", response.content_type());

    let mut names: Vec<_> = response.headers.keys().collect();
    names.sort();
    println!("\n=== Headers ({}) ===", names.len());
    for name in names {
        println!("  {}: {}", name, response.headers[name]);
    }

    if let Some(body) = response.text() {
        println!("\n=== Body ===");
        println!("{}", body);
    }
}
