// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request header storage and response header parsing

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEADER_LINE: Regex = Regex::new(r"^([^:]+): (.*)").expect("valid header regex");
}

/// Parse `"Name: value"` lines into a map keyed by lower-cased name
///
/// Lines that do not match are skipped. The value is everything after the
/// first `": "`, so values may contain colons.
pub fn parse_headers<'a, I>(lines: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut headers = HashMap::new();
    for line in lines {
        if let Some(caps) = HEADER_LINE.captures(line) {
            headers.insert(caps[1].to_lowercase(), caps[2].to_string());
        }
    }
    headers
}

/// Parse a raw header block as returned by a transport
pub fn parse_raw_headers(raw: &str) -> HashMap<String, String> {
    parse_headers(raw.lines())
}

/// Request headers
///
/// Names are stored exactly as given, so `Accept` and `accept` are two
/// entries. Insertion order is kept and is the order headers are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing an entry with the exact same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Exact-name lookup
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// True if any of `names` is present, compared exactly
    pub fn contains_any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.get(name).is_some())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
