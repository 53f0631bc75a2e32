//! Expiration instant from response headers

use std::time::{Duration, SystemTime};

use crate::{ExpirationError, HeaderLookup, http_date};

/// Largest delta-seconds honored; larger or overflowing values are clamped
pub const MAX_DELTA_SECONDS: u64 = 2_147_483_648;

/// What the response headers say about how long to keep the response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// Stale after this instant
    At(SystemTime),
    /// `Cache-Control: no-cache`; do not cache
    NoCache,
    /// No recognized directive; the caller's policy decides
    Unspecified,
}

impl Expiration {
    /// The computed instant, if any
    pub fn instant(&self) -> Option<SystemTime> {
        match self {
            Expiration::At(at) => Some(*at),
            Expiration::NoCache | Expiration::Unspecified => None,
        }
    }

    /// Whether the response may be stored at all
    pub fn is_cacheable(&self) -> bool {
        !matches!(self, Expiration::NoCache)
    }
}

/// A `Cache-Control` directive this cache acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    NoCache,
    MaxAge(Duration),
}

impl Directive {
    /// Parse one trimmed directive; `Ok(None)` for directives that are ignored
    ///
    /// `no-cache` is matched exactly and case-sensitively.
    pub fn parse(directive: &str) -> Result<Option<Self>, ExpirationError> {
        if directive == "no-cache" {
            return Ok(Some(Directive::NoCache));
        }
        match directive.strip_prefix("max-age=") {
            Some(secs) => parse_seconds(secs).map(|d| Some(Directive::MaxAge(d))),
            None => Ok(None),
        }
    }
}

/// Compute the expiration relative to the current clock
pub fn compute_expiration<H>(headers: &H) -> Result<Expiration, ExpirationError>
where
    H: HeaderLookup + ?Sized,
{
    compute_expiration_at(headers, SystemTime::now())
}

/// Compute the expiration relative to `now`
///
/// `Cache-Control` wins over `Expires` whenever it is present, even if none of
/// its directives are recognized. Within `Cache-Control` the first
/// recognized directive decides.
pub fn compute_expiration_at<H>(headers: &H, now: SystemTime) -> Result<Expiration, ExpirationError>
where
    H: HeaderLookup + ?Sized,
{
    if let Some(cache_control) = headers.header_value("Cache-Control") {
        for directive in cache_control.split(',') {
            match Directive::parse(directive.trim())? {
                Some(Directive::NoCache) => return Ok(Expiration::NoCache),
                Some(Directive::MaxAge(max_age)) => {
                    return Ok(Expiration::At(saturating_add(now, max_age)));
                }
                None => {}
            }
        }
        return Ok(Expiration::Unspecified);
    }

    match headers.header_value("Expires") {
        Some(expires) => http_date::parse_http_date_at(expires, now).map(Expiration::At),
        None => Ok(Expiration::Unspecified),
    }
}

fn parse_seconds(value: &str) -> Result<Duration, ExpirationError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExpirationError::InvalidMaxAge(value.to_string()));
    }
    // Digits only, so the parse can fail only by overflowing.
    let secs = value.parse::<u64>().unwrap_or(MAX_DELTA_SECONDS);
    Ok(Duration::from_secs(secs.min(MAX_DELTA_SECONDS)))
}

fn saturating_add(now: SystemTime, delta: Duration) -> SystemTime {
    now.checked_add(delta)
        .or_else(|| now.checked_add(Duration::from_secs(u32::MAX as u64)))
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn epoch(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_max_age() {
        let now = epoch(1_000_000);
        let h = headers(&[("Cache-Control", "max-age=60")]);

        let exp = compute_expiration_at(&h, now).unwrap();
        assert_eq!(exp, Expiration::At(now + Duration::from_secs(60)));
        assert_eq!(exp.instant(), Some(now + Duration::from_secs(60)));
    }

    #[test]
    fn test_max_age_against_wall_clock() {
        let before = SystemTime::now();
        let h = headers(&[("Cache-Control", "public, max-age=60")]);
        let at = compute_expiration(&h).unwrap().instant().unwrap();
        let after = SystemTime::now();

        assert!(at >= before + Duration::from_secs(60));
        assert!(at <= after + Duration::from_secs(60));
    }

    #[test]
    fn test_no_cache_is_distinct_from_unspecified() {
        let no_cache = compute_expiration(&headers(&[("Cache-Control", "no-cache")])).unwrap();
        let nothing = compute_expiration(&headers(&[])).unwrap();

        assert_eq!(no_cache, Expiration::NoCache);
        assert_eq!(nothing, Expiration::Unspecified);
        assert_ne!(no_cache, nothing);
        assert!(!no_cache.is_cacheable());
        assert!(nothing.is_cacheable());
    }

    #[test]
    fn test_no_cache_is_case_sensitive() {
        let exp = compute_expiration(&headers(&[("Cache-Control", "No-Cache")])).unwrap();
        assert_eq!(exp, Expiration::Unspecified);
    }

    #[test]
    fn test_first_recognized_directive_wins() {
        let now = epoch(0);
        let h = headers(&[("Cache-Control", "no-cache, max-age=10")]);
        assert_eq!(compute_expiration_at(&h, now).unwrap(), Expiration::NoCache);

        let h = headers(&[("Cache-Control", "private , max-age=10, no-cache")]);
        assert_eq!(
            compute_expiration_at(&h, now).unwrap(),
            Expiration::At(epoch(10))
        );
    }

    #[test]
    fn test_cache_control_takes_precedence_over_expires() {
        let now = epoch(5_000);
        let h = headers(&[
            ("Cache-Control", "max-age=30"),
            ("Expires", "Sun, 06 Nov 1994 08:49:37 GMT"),
        ]);
        assert_eq!(
            compute_expiration_at(&h, now).unwrap(),
            Expiration::At(epoch(5_030))
        );

        // an unparseable Expires is never consulted
        let h = headers(&[("Cache-Control", "max-age=30"), ("Expires", "garbage")]);
        assert!(compute_expiration_at(&h, now).is_ok());
    }

    #[test]
    fn test_unrecognized_cache_control_does_not_fall_through() {
        let h = headers(&[
            ("Cache-Control", "public, s-maxage=100"),
            ("Expires", "Sun, 06 Nov 1994 08:49:37 GMT"),
        ]);
        assert_eq!(compute_expiration(&h).unwrap(), Expiration::Unspecified);
    }

    #[test]
    fn test_expires_formats() {
        let expected = epoch(784_111_777);
        for value in [
            "Sunday, 06-Nov-94 08:49:37 GMT",
            "Sun, 06 Nov 1994 08:49:37 GMT",
            "Sun Nov  6 08:49:37 1994",
        ] {
            let h = headers(&[("Expires", value)]);
            assert_eq!(compute_expiration(&h).unwrap(), Expiration::At(expected), "{value}");
        }
    }

    #[test]
    fn test_header_name_is_case_insensitive() {
        let h = headers(&[("cache-control", "max-age=1")]);
        assert_eq!(
            compute_expiration_at(&h, epoch(0)).unwrap(),
            Expiration::At(epoch(1))
        );
    }

    #[test]
    fn test_malformed_max_age_is_an_error() {
        for value in ["max-age=abc", "max-age=", "max-age=-5", "max-age=1.5", "max-age=+5"] {
            let h = headers(&[("Cache-Control", value)]);
            assert!(
                matches!(compute_expiration(&h), Err(ExpirationError::InvalidMaxAge(_))),
                "{value}"
            );
        }
    }

    #[test]
    fn test_huge_max_age_is_clamped() {
        let now = epoch(1_000_000);
        let clamped = Expiration::At(now + Duration::from_secs(MAX_DELTA_SECONDS));

        for value in ["max-age=99999999999999999999", "max-age=2147483649", "max-age=2147483648"] {
            let h = headers(&[("Cache-Control", value)]);
            assert_eq!(compute_expiration_at(&h, now).unwrap(), clamped, "{value}");
        }

        let h = headers(&[("Cache-Control", "max-age=99999999999999999999")]);
        assert!(compute_expiration(&h).unwrap().instant().is_some());
    }

    #[test]
    fn test_malformed_expires_is_an_error() {
        let h = headers(&[("Expires", "0")]);
        assert!(matches!(
            compute_expiration(&h),
            Err(ExpirationError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_directive_parse() {
        assert_eq!(Directive::parse("no-cache").unwrap(), Some(Directive::NoCache));
        assert_eq!(
            Directive::parse("max-age=7").unwrap(),
            Some(Directive::MaxAge(Duration::from_secs(7)))
        );
        assert_eq!(Directive::parse("no-store").unwrap(), None);
    }
}
