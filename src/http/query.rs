// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Query string assembly
//!
//! Values are inserted verbatim. Nothing here percent-encodes; callers that
//! need escaping must escape the values before handing them over.

use serde_json::Value;

/// Flat, insertion-ordered parameter mapping
pub type Params = serde_json::Map<String, Value>;

/// Build a `?k1=v1&k2=v2` suffix from `params`
///
/// Returns an empty string when `params` is absent or empty.
pub fn build_query_string(params: Option<&Params>) -> String {
    let pairs = encode_pairs(params);
    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs)
    }
}

/// Join `params` as `k1=v1&k2=v2` without the leading `?`
pub fn encode_pairs(params: Option<&Params>) -> String {
    let Some(params) = params else {
        return String::new();
    };

    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, coerce_value(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Render a parameter value as a string
///
/// Strings are used as-is, scalars use their display form, arrays are
/// comma-joined (null elements become empty) and objects become compact JSON.
pub fn coerce_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}
