// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use std::collections::HashMap;

use bytes::Bytes;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::transport::RawResponse;

/// Response body as produced by the transport
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Text(String),
    Json(Value),
    Bytes(Bytes),
}

impl ResponseBody {
    /// Empty text or byte bodies count as no body
    pub fn is_empty(&self) -> bool {
        match self {
            ResponseBody::Text(s) => s.is_empty(),
            ResponseBody::Bytes(b) => b.is_empty(),
            ResponseBody::Json(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(v) => Some(v),
            _ => None,
        }
    }
}

/// HTTP response representation
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Response body, `None` when the transport produced nothing usable
    pub body: Option<ResponseBody>,
    /// Headers keyed by lower-cased name
    pub headers: HashMap<String, String>,
    /// Request method
    pub method: Method,
    /// Response status code
    pub status_code: u16,
    /// URL the call was sent to, query included
    pub url: String,
    /// Completed transport call state
    pub raw: RawResponse,
}

impl Response {
    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Check if status is redirect (3xx)
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status_code)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Check if content type is JSON
    pub fn is_json(&self) -> bool {
        self.content_type()
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false)
    }

    /// Get body as text
    ///
    /// JSON bodies are re-serialized; byte bodies are decoded lossily.
    pub fn text(&self) -> Option<String> {
        self.body.as_ref().map(|body| match body {
            ResponseBody::Text(s) => s.clone(),
            ResponseBody::Json(v) => v.to_string(),
            ResponseBody::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        })
    }

    /// Deserialize the body
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.body {
            Some(ResponseBody::Json(v)) => Ok(T::deserialize(v)?),
            Some(ResponseBody::Text(s)) => Ok(serde_json::from_str(s)?),
            Some(ResponseBody::Bytes(b)) => Ok(serde_json::from_slice(b)?),
            None => Err(Error::other("response has no body")),
        }
    }
}
