//! Header access for the expiration parser and replay of cached headers

use http::{HeaderMap, HeaderName, HeaderValue};
use respcache_core::CacheEntry;
use std::collections::HashMap;

/// Read-only, case-insensitive header lookup
pub trait HeaderLookup {
    /// Get the value of the header `name`, if present
    fn header_value(&self, name: &str) -> Option<&str>;
}

impl HeaderLookup for HashMap<String, String> {
    fn header_value(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.get(name) {
            return Some(value.as_str());
        }
        self.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl HeaderLookup for HeaderMap {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
    }
}

impl HeaderLookup for CacheEntry {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.get_header(name)
    }
}

/// Flatten a `HeaderMap` to one value per name
///
/// Later values of a repeated header replace earlier ones. Non-ASCII values
/// are kept as UTF-8; bytes that are not valid UTF-8 are replaced.
pub fn headers_from_map(headers: &HeaderMap) -> HashMap<String, String> {
    let mut map = HashMap::with_capacity(headers.keys_len());
    for (k, v) in headers.iter() {
        let value = String::from_utf8_lossy(v.as_bytes()).into_owned();
        map.insert(k.to_string(), value);
    }
    map
}

/// Rebuild a `HeaderMap` from a cached entry's headers
pub fn headers_to_map(entry: &CacheEntry) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (k, v) in entry.headers.iter().flatten() {
        if let (Ok(name), Ok(val)) = (HeaderName::from_bytes(k.as_bytes()), HeaderValue::from_bytes(v.as_bytes())) {
            map.insert(name, val);
        }
    }
    map
}

/// Build a cache entry from a captured body and `HeaderMap`
pub fn entry_from_parts(body: impl Into<String>, headers: &HeaderMap) -> CacheEntry {
    let headers = headers_from_map(headers);
    if headers.is_empty() {
        CacheEntry::new(body)
    } else {
        CacheEntry::with_headers(body, headers)
    }
}
