// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request orchestration
//!
//! Turns a [`PreparedRequest`] into one transport call and settles it exactly
//! once: resolved for statuses in `[100, 400)`, rejected otherwise.

use reqwest::Method;
use serde_json::Value;

use super::headers::{parse_raw_headers, Headers};
use super::options::{Body, Credentials, Data, ProgressCallback, ResponseType};
use super::query::{build_query_string, encode_pairs};
use super::response::{Response, ResponseBody};
use super::MIME_JSON;
use crate::error::{Error, Result};
use crate::transport::{EventSink, RawResponse, Transport, TransportCall, TransportEvent};

/// Fully resolved request, built fresh for every call
#[derive(Clone, Default)]
pub struct PreparedRequest {
    /// `None` means `GET`
    pub method: Option<Method>,
    pub url: String,
    pub headers: Headers,
    pub data: Option<Data>,
    pub body: Option<Body>,
    pub json: Option<Value>,
    pub response_type: Option<ResponseType>,
    pub credentials: Option<Credentials>,
    pub on_upload_progress: Option<ProgressCallback>,
}

impl std::fmt::Debug for PreparedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("data", &self.data)
            .field("body", &self.body)
            .field("json", &self.json)
            .field("response_type", &self.response_type)
            .field("has_credentials", &self.credentials.is_some())
            .field("on_upload_progress", &self.on_upload_progress.is_some())
            .finish()
    }
}

/// Send `request` through `transport`
pub async fn send_request(transport: &dyn Transport, request: PreparedRequest) -> Result<Response> {
    let PreparedRequest {
        method,
        mut url,
        mut headers,
        data,
        body,
        json,
        mut response_type,
        credentials,
        on_upload_progress,
    } = request;

    let method = method.unwrap_or(Method::GET);
    if method == Method::GET {
        url.push_str(&build_query_string(data.as_ref().and_then(Data::fields)));
    }

    let bodyless = method == Method::GET || method == Method::HEAD;
    let mut body = if bodyless {
        None
    } else {
        body.or_else(|| data.map(data_as_body))
    };

    if let Some(json) = &json {
        if !headers.contains_any(&["accept", "Accept"]) {
            headers.insert("Accept", MIME_JSON);
        }
        if !bodyless {
            if !headers.contains_any(&["content-type", "Content-Type"]) {
                headers.insert("Content-Type", MIME_JSON);
            }
            body = Some(Body::Text(serde_json::to_string(json)?));
        }
        response_type = response_type.or(Some(ResponseType::Json));
    }

    let mut call = TransportCall::open(method.clone(), url.clone(), credentials);
    for (name, value) in headers {
        call.set_request_header(name, value);
    }
    call.wants_upload_progress = on_upload_progress.is_some();
    if let Some(response_type) = response_type {
        call.set_response_type(response_type);
    }
    call.body = body;

    tracing::debug!(
        method = %method,
        url = %url,
        response_type = response_type.as_ref().map_or("text", ResponseType::as_str),
        "Sending request"
    );

    let (events, mut rx) = EventSink::channel();
    let settle = async {
        while let Some(event) = rx.recv().await {
            match event {
                TransportEvent::ReadyState(state) => {
                    tracing::trace!(?state, "Ready state changed");
                }
                TransportEvent::UploadProgress(progress) => {
                    if let (Some(callback), Some(percent)) = (&on_upload_progress, progress.percent())
                    {
                        callback(percent);
                    }
                }
                TransportEvent::Complete(raw) => {
                    return Some(settle_response(raw, response_type, &method, &url));
                }
                TransportEvent::Error(err) => return Some(Err(Error::Transport(err))),
            }
        }
        None
    };

    let ((), outcome) = tokio::join!(transport.send(call, events), settle);

    let outcome = outcome.unwrap_or_else(|| {
        Err(Error::Incomplete {
            method: method.to_string(),
            url: url.clone(),
        })
    });

    match outcome.and_then(decode_json_body) {
        Ok(response) => {
            tracing::debug!(status = response.status_code, url = %url, "Request resolved");
            Ok(response)
        }
        Err(err) => {
            tracing::warn!(error = %err, url = %url, "Request rejected");
            Err(err)
        }
    }
}

fn data_as_body(data: Data) -> Body {
    match data {
        Data::Fields(fields) => Body::Text(encode_pairs(Some(&fields))),
        Data::Body(body) => body,
    }
}

/// Build the response and apply the status rule
fn settle_response(
    raw: RawResponse,
    response_type: Option<ResponseType>,
    method: &Method,
    url: &str,
) -> Result<Response> {
    // Text fallback also covers JSON bodies the transport could not parse
    let body = match raw.response.clone().filter(|b| !b.is_empty()) {
        Some(body) => Some(body),
        None if response_type != Some(ResponseType::Bytes) => raw
            .response_text
            .clone()
            .filter(|t| !t.is_empty())
            .map(ResponseBody::Text),
        None => None,
    };

    let response = Response {
        body,
        headers: parse_raw_headers(&raw.raw_headers),
        method: method.clone(),
        status_code: raw.status,
        url: url.to_string(),
        raw,
    };

    if (100..400).contains(&response.status_code) {
        Ok(response)
    } else {
        Err(Error::status(response))
    }
}

/// Parse a text body labelled as JSON
fn decode_json_body(mut response: Response) -> Result<Response> {
    if !response.is_json() {
        return Ok(response);
    }
    let Some(ResponseBody::Text(text)) = &response.body else {
        return Ok(response);
    };

    match serde_json::from_str::<Value>(text) {
        Ok(value) => {
            response.body = Some(ResponseBody::Json(value));
            Ok(response)
        }
        Err(source) => Err(Error::decode(source, response)),
    }
}
