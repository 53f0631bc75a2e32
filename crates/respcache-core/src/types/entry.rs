//! Cache entry type

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A cached response: the body text and the headers it was produced with
///
/// Headers hold a single value per name; when the same name is inserted
/// twice the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Response body, absent when nothing was captured
    pub body: Option<String>,
    /// Response headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

impl CacheEntry {
    /// Create an entry with a body and no headers
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            headers: None,
        }
    }

    /// Create an entry from a body and header map
    pub fn with_headers(body: impl Into<String>, headers: HashMap<String, String>) -> Self {
        Self {
            body: Some(body.into()),
            headers: Some(headers),
        }
    }

    /// Add or replace a single header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Whether the entry can be served; an entry without a body cannot
    pub fn is_usable(&self) -> bool {
        self.body.is_some()
    }

    /// Look up a header value, ignoring ASCII case of the name
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        })
    }

    /// Approximate payload size in bytes
    pub fn size(&self) -> usize {
        let body = self.body.as_ref().map_or(0, String::len);
        let headers = self
            .headers
            .as_ref()
            .map_or(0, |h| h.iter().map(|(k, v)| k.len() + v.len()).sum());
        body + headers
    }
}
