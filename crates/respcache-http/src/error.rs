use thiserror::Error;

/// Why an expiration could not be computed from response headers
///
/// Distinct from [`Expiration::Unspecified`](crate::Expiration::Unspecified):
/// a header was present but malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpirationError {
    /// `max-age` value is not a non-negative integer
    #[error("invalid max-age value: {0:?}")]
    InvalidMaxAge(String),

    /// `Expires` value matches none of the accepted date grammars
    #[error("invalid http date: {0:?}")]
    InvalidDate(String),
}
