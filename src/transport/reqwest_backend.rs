// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! reqwest-backed transport

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH};
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder};
use url::Url;

use super::{
    interpret_body, EventSink, ProgressEvent, RawResponse, ReadyState, Transport, TransportCall,
    TransportError,
};
use crate::config::TransportConfig;
use crate::error::{Error, Result};
use crate::http::{Body, FormData};

/// Upload chunk size used when progress is reported
const UPLOAD_CHUNK_SIZE: usize = 16 * 1024;

/// Transport that performs calls with a [`reqwest::Client`]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&TransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: &TransportConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::invalid_header(name, e.to_string()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| Error::invalid_header(name, e.to_string()))?;
            default_headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(default_headers);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn execute(
        &self,
        call: TransportCall,
        events: &EventSink,
    ) -> std::result::Result<(), TransportError> {
        let TransportCall {
            method,
            url,
            credentials,
            headers,
            response_type,
            body,
            wants_upload_progress,
        } = call;

        let parsed = Url::parse(&url).map_err(|e| TransportError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = self.client.request(method, parsed);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(creds) = credentials {
            builder = builder.basic_auth(creds.username, creds.password);
        }
        events.ready_state(ReadyState::Opened);

        if let Some(body) = body {
            let total = body.content_length().filter(|_| wants_upload_progress);
            builder = match body {
                Body::Form(form) => builder.multipart(multipart_form(form)),
                Body::Text(text) => attach_bytes(builder, Bytes::from(text), total, events),
                Body::Bytes(bytes) => attach_bytes(builder, bytes, total, events),
            };
        }

        let response = builder.send().await?;
        events.ready_state(ReadyState::HeadersReceived);

        let status = response.status().as_u16();
        let raw_headers = format_raw_headers(response.headers());

        events.ready_state(ReadyState::Loading);
        let bytes = response.bytes().await?;
        let (typed, text) = interpret_body(&bytes, response_type);

        events.complete(RawResponse {
            status,
            raw_headers,
            response: typed,
            response_text: text,
        });
        Ok(())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, call: TransportCall, events: EventSink) {
        if let Err(err) = self.execute(call, &events).await {
            tracing::warn!(error = %err, "Transport call failed");
            events.error(err);
        }
    }
}

/// Attach a byte body, streamed in chunks when progress is wanted
fn attach_bytes(
    builder: RequestBuilder,
    bytes: Bytes,
    progress_total: Option<u64>,
    events: &EventSink,
) -> RequestBuilder {
    let total = match progress_total {
        Some(total) if total > 0 => total,
        _ => return builder.body(bytes),
    };

    let chunks: Vec<Bytes> = (0..bytes.len())
        .step_by(UPLOAD_CHUNK_SIZE)
        .map(|start| bytes.slice(start..(start + UPLOAD_CHUNK_SIZE).min(bytes.len())))
        .collect();

    let sink = events.clone();
    let mut loaded = 0u64;
    let stream = futures::stream::iter(chunks).map(move |chunk| {
        loaded += chunk.len() as u64;
        sink.upload_progress(ProgressEvent::new(loaded, total));
        Ok::<_, std::io::Error>(chunk)
    });

    builder
        .header(CONTENT_LENGTH, total)
        .body(reqwest::Body::wrap_stream(stream))
}

fn multipart_form(form: FormData) -> reqwest::multipart::Form {
    form.iter()
        .fold(reqwest::multipart::Form::new(), |acc, (name, value)| {
            acc.text(name.to_string(), value.to_string())
        })
}

fn format_raw_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}\r\n", name, String::from_utf8_lossy(value.as_bytes())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportEvent;

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
    }

    #[test]
    fn test_invalid_default_header() {
        let config = TransportConfig::default().header("bad header", "x");
        let err = ReqwestTransport::with_config(&config).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader { .. }));
    }

    #[test]
    fn test_format_raw_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("text/plain"));
        assert_eq!(format_raw_headers(&headers), "content-type: text/plain\r\n");
    }

    #[tokio::test]
    async fn test_invalid_url_reports_error() {
        let transport = ReqwestTransport::new().unwrap();
        let (sink, mut rx) = EventSink::channel();
        transport
            .send(
                TransportCall::open(reqwest::Method::GET, "/relative/only", None),
                sink,
            )
            .await;
        let mut saw_error = false;
        while let Some(event) = rx.recv().await {
            if let TransportEvent::Error(TransportError::InvalidUrl { .. }) = event {
                saw_error = true;
            }
        }
        assert!(saw_error);
    }
}
