// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # reqkit - Small async HTTP request helpers
//!
//! A thin layer over an HTTP transport that takes care of the repetitive
//! parts of issuing a request.
//!
//! ## Features
//!
//! - `get` / `post` / `send` / `send_form_data` entry points
//! - Query string assembly from flat fields (values are not escaped)
//! - JSON request bodies with `Accept` / `Content-Type` defaults
//! - JSON response decoding driven by `content-type`
//! - Upload progress callbacks as whole percentages
//! - Pluggable [`Transport`]: reqwest in production, [`MockTransport`] in tests
//!
//! ## Example
//!
//! ```rust,no_run
//! use reqkit::{Client, ClientConfig, RequestOptions};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::with_config(ClientConfig::new().base_url("https://api.example.com"))?;
//!
//!     let created = client
//!         .post("/users", RequestOptions::new().json(json!({"name": "a"})))
//!         .await?;
//!     println!("{} {:?}", created.status_code, created.body);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod global;
pub mod http;
pub mod transport;

// Configuration
pub use config::{ClientConfig, TransportConfig};

// Errors
pub use error::{Error, Result};

// Entry points
pub use global::{configure, default_client, get, install, post, send, send_form_data};
pub use http::Client;

// Request and response types
pub use http::{
    build_query_string, parse_headers, Body, Data, FormData, Headers, Params, RequestOptions,
    Response, ResponseBody, ResponseType, Target,
};

pub use reqwest::Method;

// Transport
pub use transport::{
    MockReply, MockTransport, ProgressEvent, RawResponse, ReadyState, ReqwestTransport, Transport,
    TransportCall, TransportError,
};

/// reqkit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
