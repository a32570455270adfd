// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport seam
//!
//! A [`Transport`] performs one [`TransportCall`] and reports what happens
//! through an [`EventSink`]: readiness changes, upload progress, and finally
//! either a completed [`RawResponse`] or a [`TransportError`]. The request
//! layer never talks to the network itself.

mod mock;
mod reqwest_backend;

pub use mock::{MockReply, MockTransport};
pub use reqwest_backend::ReqwestTransport;

use async_trait::async_trait;
use reqwest::Method;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::http::{Body, Credentials, ResponseBody, ResponseType};

/// Something that can carry out a transport call
///
/// Implementations must report exactly one of [`EventSink::complete`] or
/// [`EventSink::error`]. Anything sent after that is ignored.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform `call`, reporting progress and the outcome through `events`
    async fn send(&self, call: TransportCall, events: EventSink);
}

/// Lifecycle state of a transport call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    Unsent = 0,
    Opened = 1,
    HeadersReceived = 2,
    Loading = 3,
    Done = 4,
}

/// Upload progress as reported by a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub loaded: u64,
    pub total: u64,
    pub length_computable: bool,
}

impl ProgressEvent {
    pub fn new(loaded: u64, total: u64) -> Self {
        Self {
            loaded,
            total,
            length_computable: true,
        }
    }

    /// Progress with an unknown total
    pub fn indeterminate(loaded: u64) -> Self {
        Self {
            loaded,
            total: 0,
            length_computable: false,
        }
    }

    /// Rounded percentage, or `None` when the total is unknown or zero
    pub fn percent(&self) -> Option<u8> {
        if !self.length_computable || self.total == 0 {
            return None;
        }
        let pct = (self.loaded as f64 / self.total as f64 * 100.0).round();
        Some(pct.clamp(0.0, 100.0) as u8)
    }
}

/// Completed call state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// Header block as `Name: value` lines
    pub raw_headers: String,
    /// Body interpreted according to the call's response type
    pub response: Option<ResponseBody>,
    /// Body as text; available for text (or unset) response types and for
    /// JSON bodies that failed to parse
    pub response_text: Option<String>,
}

/// Interpret a received body the way the call asked for
///
/// Returns the typed response and, for text (or unset) response types, the
/// text. A JSON body that does not parse yields no typed response, only its
/// text.
pub(crate) fn interpret_body(
    bytes: &[u8],
    response_type: Option<ResponseType>,
) -> (Option<ResponseBody>, Option<String>) {
    match response_type {
        None | Some(ResponseType::Text) => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            (Some(ResponseBody::Text(text.clone())), Some(text))
        }
        Some(ResponseType::Json) => match serde_json::from_slice(bytes) {
            Ok(value) => (Some(ResponseBody::Json(value)), None),
            Err(_) => (None, Some(String::from_utf8_lossy(bytes).into_owned())),
        },
        Some(ResponseType::Bytes) => (
            Some(ResponseBody::Bytes(bytes::Bytes::copy_from_slice(bytes))),
            None,
        ),
    }
}

/// Transport-level failure
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("body error: {0}")]
    Body(String),

    #[error("{0}")]
    Other(String),
}

/// One call, as handed to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct TransportCall {
    pub method: Method,
    pub url: String,
    pub credentials: Option<Credentials>,
    pub headers: Vec<(String, String)>,
    pub response_type: Option<ResponseType>,
    pub body: Option<Body>,
    /// Whether upload progress events are wanted
    pub wants_upload_progress: bool,
}

impl TransportCall {
    /// Open a call
    pub fn open(method: Method, url: impl Into<String>, credentials: Option<Credentials>) -> Self {
        Self {
            method,
            url: url.into(),
            credentials,
            headers: Vec::new(),
            response_type: None,
            body: None,
            wants_upload_progress: false,
        }
    }

    pub fn set_request_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    pub fn set_response_type(&mut self, response_type: ResponseType) {
        self.response_type = Some(response_type);
    }

    /// First header whose name matches case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Notification emitted by a transport
#[derive(Debug)]
pub enum TransportEvent {
    ReadyState(ReadyState),
    UploadProgress(ProgressEvent),
    Complete(RawResponse),
    Error(TransportError),
}

/// Sending half of a call's event channel
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<TransportEvent>,
}

impl EventSink {
    /// Create a sink and the receiver that drains it
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn ready_state(&self, state: ReadyState) {
        self.emit(TransportEvent::ReadyState(state));
    }

    pub fn upload_progress(&self, event: ProgressEvent) {
        self.emit(TransportEvent::UploadProgress(event));
    }

    /// Report completion; implies [`ReadyState::Done`]
    pub fn complete(&self, response: RawResponse) {
        self.emit(TransportEvent::Complete(response));
    }

    pub fn error(&self, error: TransportError) {
        self.emit(TransportEvent::Error(error));
    }

    fn emit(&self, event: TransportEvent) {
        // receiver gone means the request already settled
        let _ = self.tx.send(event);
    }
}
