// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request options and body types

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::headers::Headers;
use super::query::{coerce_value, Params};
use crate::error::Result;

/// Upload progress callback, invoked with a percentage in `0..=100`
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// Where a request goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Path or URL, prefixed with the effective base
    Url(String),
    /// Use `RequestOptions::url` as-is
    Prebuilt,
}

impl From<&str> for Target {
    fn from(url: &str) -> Self {
        Target::Url(url.to_string())
    }
}

impl From<String> for Target {
    fn from(url: String) -> Self {
        Target::Url(url)
    }
}

impl From<&String> for Target {
    fn from(url: &String) -> Self {
        Target::Url(url.clone())
    }
}

/// How the transport should interpret the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    Text,
    Json,
    Bytes,
}

impl ResponseType {
    /// Name of the response type, as logged
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Text => "text",
            ResponseType::Json => "json",
            ResponseType::Bytes => "arraybuffer",
        }
    }
}

/// Ordered multipart form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Repeated names are kept as separate fields.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Build a form from flat fields, coercing each value to a string
    pub fn from_fields(fields: &Params) -> Self {
        let mut form = FormData::new();
        for (name, value) in fields {
            form.append(name.clone(), coerce_value(value));
        }
        form
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Bytes(Bytes),
    Form(FormData),
}

impl Body {
    /// Byte length, when known up front
    pub fn content_length(&self) -> Option<u64> {
        match self {
            Body::Text(s) => Some(s.len() as u64),
            Body::Bytes(b) => Some(b.len() as u64),
            Body::Form(_) => None,
        }
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Text(s)
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Body::Text(s.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(v: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(v))
    }
}

impl From<Bytes> for Body {
    fn from(b: Bytes) -> Self {
        Body::Bytes(b)
    }
}

impl From<FormData> for Body {
    fn from(f: FormData) -> Self {
        Body::Form(f)
    }
}

/// Request data: query/form fields or an opaque body
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Fields(Params),
    Body(Body),
}

impl Data {
    pub fn fields(&self) -> Option<&Params> {
        match self {
            Data::Fields(p) => Some(p),
            Data::Body(_) => None,
        }
    }
}

/// Basic credentials passed to the transport when the call is opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

/// Options accepted by every entry point
#[derive(Clone, Default)]
pub struct RequestOptions {
    /// Full URL, used when the target is [`Target::Prebuilt`]
    pub url: Option<String>,
    /// Base prepended to a [`Target::Url`]; overrides the client default
    pub base: Option<String>,
    pub method: Option<Method>,
    pub headers: Headers,
    pub data: Option<Data>,
    pub body: Option<Body>,
    /// Value sent as a JSON body; also turns on JSON header defaults
    pub json: Option<Value>,
    pub response_type: Option<ResponseType>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub on_upload_progress: Option<ProgressCallback>,
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("url", &self.url)
            .field("base", &self.base)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("data", &self.data)
            .field("body", &self.body)
            .field("json", &self.json)
            .field("response_type", &self.response_type)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("on_upload_progress", &self.on_upload_progress.is_some())
            .finish()
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the full URL (for [`Target::Prebuilt`])
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the base URL for this request
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set flat query/form fields
    pub fn fields(mut self, fields: Params) -> Self {
        self.data = Some(Data::Fields(fields));
        self
    }

    /// Set flat fields from any serializable map-like value
    ///
    /// Fails if `value` does not serialize to a JSON object.
    pub fn fields_from<T: Serialize>(self, value: &T) -> Result<Self> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(self.fields(map)),
            other => Err(crate::error::Error::Config(format!(
                "fields must serialize to an object, got {}",
                other
            ))),
        }
    }

    /// Set opaque data
    pub fn data(mut self, data: Data) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON value to send
    pub fn json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }

    /// Serialize `data` and send it as JSON
    pub fn json_from<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.json = Some(serde_json::to_value(data)?);
        Ok(self)
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    /// Set basic credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Register an upload progress callback
    pub fn on_upload_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(u8) + Send + Sync + 'static,
    {
        self.on_upload_progress = Some(Arc::new(callback));
        self
    }
}
