//! respcache-http: HTTP caching primitives for respcache
//!
//! Computes how long a captured response may be kept from its
//! `Cache-Control` and `Expires` headers, and converts between `http`
//! header maps and cached entries.

mod error;
pub mod expiration;
pub mod headers;
pub mod http_date;

pub use error::ExpirationError;
pub use expiration::{
    Directive, Expiration, MAX_DELTA_SECONDS, compute_expiration, compute_expiration_at,
};
pub use headers::{HeaderLookup, entry_from_parts, headers_from_map, headers_to_map};
pub use http_date::{DateFormat, parse_http_date};
