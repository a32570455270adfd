// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request layer
//!
//! Entry points, option handling, query/header helpers, and the
//! orchestrator that maps one request onto one transport call.

mod client;
mod dispatch;
mod headers;
mod options;
mod query;
mod response;

pub use client::Client;
pub use dispatch::{send_request, PreparedRequest};
pub use headers::{parse_headers, parse_raw_headers, Headers};
pub use options::{
    Body, Credentials, Data, FormData, ProgressCallback, RequestOptions, ResponseType, Target,
};
pub use query::{build_query_string, coerce_value, encode_pairs, Params};
pub use response::{Response, ResponseBody};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("reqkit/", env!("CARGO_PKG_VERSION"));

/// JSON media type
pub const MIME_JSON: &str = "application/json";
