// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for reqkit
//!
//! Every failed request settles with exactly one of these. HTTP failures
//! and decode failures carry the full [`Response`] so callers can inspect
//! the status, headers and raw body.

use thiserror::Error;

use crate::http::Response;
use crate::transport::TransportError;

/// Result type alias for reqkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for reqkit
#[derive(Error, Debug)]
pub enum Error {
    /// Status outside `[100, 400)`
    #[error("{} {} failed with status {}", .0.method, .0.url, .0.status_code)]
    Status(Box<Response>),

    /// The transport reported an error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// JSON response body could not be decoded
    #[error("Failed to decode JSON body from {}: {source}", .response.url)]
    Decode {
        #[source]
        source: serde_json::Error,
        response: Box<Response>,
    },

    /// The transport finished without completing the call
    #[error("Transport ended without completing {method} {url}")]
    Incomplete { method: String, url: String },

    /// Header rejected before sending
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client construction failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an HTTP status error
    pub fn status(response: Response) -> Self {
        Error::Status(Box::new(response))
    }

    /// Create a decode error
    pub fn decode(source: serde_json::Error, response: Response) -> Self {
        Error::Decode {
            source,
            response: Box::new(response),
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an HTTP status failure
    pub fn is_status(&self) -> bool {
        matches!(self, Error::Status(_))
    }

    /// Check if this is a transport-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Incomplete { .. })
    }

    /// Check if this is a JSON decode failure
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code()
            .map(|s| (400..500).contains(&s))
            .unwrap_or(false)
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code()
            .map(|s| (500..600).contains(&s))
            .unwrap_or(false)
    }

    /// Get the response attached to this error, if any
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Status(response) => Some(response.as_ref()),
            Error::Decode { response, .. } => Some(response.as_ref()),
            _ => None,
        }
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(|r| r.status_code)
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Incomplete { url, .. } => Some(url),
            _ => self.response().map(|r| r.url.as_str()),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
