// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! End-to-end request behaviour against the scripted transport

use std::sync::{Arc, Mutex};

use reqkit::{
    Body, Client, ClientConfig, Error, Method, MockReply, MockTransport, ProgressEvent,
    RequestOptions, ResponseBody,
};
use serde_json::json;

fn client() -> (Client, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let client = Client::with_transport(
        ClientConfig::new().base_url("https://api.example.com"),
        transport.clone(),
    );
    (client, transport)
}

#[tokio::test]
async fn get_with_fields_builds_query_without_body() {
    let (client, transport) = client();
    let options = RequestOptions::new().fields_from(&json!({"id": 5})).unwrap();

    client.get("/users", options).await.unwrap();

    let call = transport.last_call().unwrap();
    assert_eq!(call.method, Method::GET);
    assert_eq!(call.url, "https://api.example.com/users?id=5");
    assert!(call.body.is_none());
}

#[tokio::test]
async fn post_json_sets_headers_and_body() {
    let (client, transport) = client();

    client
        .post("/users", RequestOptions::new().json(json!({"name": "a"})))
        .await
        .unwrap();

    let call = transport.last_call().unwrap();
    assert_eq!(call.method, Method::POST);
    assert_eq!(call.header("content-type"), Some("application/json"));
    assert_eq!(call.header("accept"), Some("application/json"));
    assert_eq!(call.body, Some(Body::from(r#"{"name":"a"}"#)));
}

#[tokio::test]
async fn post_json_keeps_caller_accept() {
    let (client, transport) = client();

    client
        .post(
            "/users",
            RequestOptions::new()
                .header("Accept", "application/vnd.custom+json")
                .json(json!({"name": "a"})),
        )
        .await
        .unwrap();

    let call = transport.last_call().unwrap();
    assert_eq!(call.header("accept"), Some("application/vnd.custom+json"));
    assert_eq!(
        call.headers.iter().filter(|(n, _)| n.eq_ignore_ascii_case("accept")).count(),
        1
    );
}

#[tokio::test]
async fn json_string_body_is_decoded() {
    let (client, transport) = client();
    transport.push(
        MockReply::status(200)
            .header("content-type", "application/json")
            .body(r#"{"a":1}"#),
    );

    let response = client.get("/thing", RequestOptions::new()).await.unwrap();

    assert_eq!(response.body, Some(ResponseBody::Json(json!({"a": 1}))));
    assert_eq!(response.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn server_error_rejects_with_raw_response() {
    let (client, transport) = client();
    transport.push(
        MockReply::status(500)
            .header("Content-Type", "application/json")
            .header("X-Trace", "a:b:c")
            .body(r#"{"error":"boom"}"#),
    );

    let err = client.get("/fail", RequestOptions::new()).await.unwrap_err();

    assert!(err.is_server_error());
    let response = err.response().unwrap();
    assert_eq!(response.status_code, 500);
    assert_eq!(
        response.body,
        Some(ResponseBody::Text(r#"{"error":"boom"}"#.to_string()))
    );
    assert_eq!(response.header("x-trace"), Some("a:b:c"));
}

#[tokio::test]
async fn post_json_with_malformed_reply_is_decode_error() {
    let (client, transport) = client();
    transport.push(
        MockReply::status(200)
            .header("Content-Type", "application/json")
            .body("{not json"),
    );

    let err = client
        .post("/users", RequestOptions::new().json(json!({"a": 1})))
        .await
        .unwrap_err();

    assert!(err.is_decode());
    assert_eq!(
        err.response().and_then(|r| r.body.clone()),
        Some(ResponseBody::Text("{not json".to_string()))
    );
}

#[tokio::test]
async fn post_json_rejection_keeps_text_body() {
    let (client, transport) = client();
    transport.push(
        MockReply::status(500)
            .header("Content-Type", "text/plain")
            .body("boom"),
    );

    let err = client
        .post("/users", RequestOptions::new().json(json!({"a": 1})))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert_eq!(
        err.response().and_then(|r| r.body.clone()),
        Some(ResponseBody::Text("boom".to_string()))
    );
}

#[tokio::test]
async fn transport_failure_rejects_once() {
    let (client, transport) = client();
    transport.push(MockReply::error("connection reset"));

    let err = client.get("/x", RequestOptions::new()).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));

    // the next call gets the default reply
    let ok = client.get("/x", RequestOptions::new()).await.unwrap();
    assert_eq!(ok.status_code, 200);
}

#[tokio::test]
async fn upload_progress_reports_known_totals_only() {
    let (client, transport) = client();
    transport.push(
        MockReply::status(201)
            .upload_progress(ProgressEvent::indeterminate(4))
            .upload_progress(ProgressEvent::new(4, 8))
            .upload_progress(ProgressEvent::new(8, 8)),
    );

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    client
        .post(
            "/upload",
            RequestOptions::new()
                .body(vec![0u8; 8])
                .on_upload_progress(move |pct| sink.lock().unwrap().push(pct)),
        )
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![50, 100]);
}

#[tokio::test]
async fn identical_calls_are_independent() {
    let (client, transport) = client();
    let options = RequestOptions::new()
        .header("X-Id", "1")
        .json(json!({"name": "a"}));

    client.post("/users", options.clone()).await.unwrap();
    client.post("/users", options.clone()).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
    // caller's options were not filled in
    assert_eq!(options.headers.len(), 1);
    assert!(options.url.is_none());
    assert!(options.method.is_none());
}

#[tokio::test]
async fn concurrent_calls_do_not_interfere() {
    let (client, transport) = client();

    let (a, b) = tokio::join!(
        client.get("/a", RequestOptions::new()),
        client.post("/b", RequestOptions::new().body("x")),
    );
    assert!(a.is_ok() && b.is_ok());

    let mut urls: Vec<_> = transport.calls().into_iter().map(|c| c.url).collect();
    urls.sort();
    assert_eq!(
        urls,
        vec!["https://api.example.com/a", "https://api.example.com/b"]
    );
}
