//! Parsing of the HTTP-date grammars accepted in `Expires`
//!
//! Three forms are in use (RFC 7231 §7.1.1.1):
//!
//! ```text
//! Sun, 06 Nov 1994 08:49:37 GMT    ; IMF-fixdate
//! Sunday, 06-Nov-94 08:49:37 GMT   ; obsolete RFC 850 format
//! Sun Nov  6 08:49:37 1994         ; ANSI C's asctime() format
//! ```
//!
//! The grammar is picked from structural markers before parsing: a `-`
//! selects RFC 850, otherwise a `,` selects IMF-fixdate, otherwise asctime.
//! A value routed to a grammar it does not match is an error; there is no
//! retry with the other grammars.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use std::time::SystemTime;

use crate::ExpirationError;

const SHORT_WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const LONG_WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Which grammar a date string is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Sunday, 06-Nov-94 08:49:37 GMT`
    Rfc850,
    /// `Sun, 06 Nov 1994 08:49:37 GMT`
    ImfFixdate,
    /// `Sun Nov  6 08:49:37 1994`
    Asctime,
}

impl DateFormat {
    /// Select the grammar from the markers in `value`
    pub fn detect(value: &str) -> Self {
        if value.contains('-') {
            DateFormat::Rfc850
        } else if value.contains(',') {
            DateFormat::ImfFixdate
        } else {
            DateFormat::Asctime
        }
    }
}

/// Parse an HTTP date, resolving two-digit years against the current clock
pub fn parse_http_date(value: &str) -> Result<SystemTime, ExpirationError> {
    parse_http_date_at(value, SystemTime::now())
}

/// Parse an HTTP date, resolving two-digit years relative to `now`
pub fn parse_http_date_at(value: &str, now: SystemTime) -> Result<SystemTime, ExpirationError> {
    let value = value.trim();
    let parsed = match DateFormat::detect(value) {
        DateFormat::Rfc850 => parse_rfc850(value, DateTime::<Utc>::from(now).year()),
        DateFormat::ImfFixdate => parse_imf_fixdate(value),
        DateFormat::Asctime => parse_asctime(value),
    };

    parsed
        .map(|dt| SystemTime::from(dt.and_utc()))
        .ok_or_else(|| ExpirationError::InvalidDate(value.to_string()))
}

/// `Sunday, 06-Nov-94 08:49:37 GMT`
fn parse_rfc850(value: &str, current_year: i32) -> Option<NaiveDateTime> {
    let (weekday, rest) = value.split_once(',')?;
    if !LONG_WEEKDAYS.contains(&weekday.trim_end()) {
        return None;
    }

    let mut tokens = rest.split_whitespace();
    let date = tokens.next()?;
    let time = tokens.next()?;
    expect_gmt(tokens)?;

    let mut parts = date.split('-');
    let day = digits(parts.next()?, 2, 2)?;
    let month = month_number(parts.next()?)?;
    let yy = digits(parts.next()?, 2, 2)?;
    if parts.next().is_some() {
        return None;
    }

    build(expand_two_digit_year(yy, current_year), month, day, time)
}

/// `Sun, 06 Nov 1994 08:49:37 GMT`
fn parse_imf_fixdate(value: &str) -> Option<NaiveDateTime> {
    let (weekday, rest) = value.split_once(',')?;
    if !SHORT_WEEKDAYS.contains(&weekday.trim_end()) {
        return None;
    }

    let mut tokens = rest.split_whitespace();
    let day = digits(tokens.next()?, 2, 2)?;
    let month = month_number(tokens.next()?)?;
    let year = digits(tokens.next()?, 4, 4)?;
    let time = tokens.next()?;
    expect_gmt(tokens)?;

    build(year as i32, month, day, time)
}

/// `Sun Nov  6 08:49:37 1994`
fn parse_asctime(value: &str) -> Option<NaiveDateTime> {
    let mut tokens = value.split_whitespace();
    if !SHORT_WEEKDAYS.contains(&tokens.next()?) {
        return None;
    }
    let month = month_number(tokens.next()?)?;
    let day = digits(tokens.next()?, 1, 2)?;
    let time = tokens.next()?;
    let year = digits(tokens.next()?, 4, 4)?;
    if tokens.next().is_some() {
        return None;
    }

    build(year as i32, month, day, time)
}

/// Map an English three-letter month abbreviation to 1..=12
pub fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|idx| idx as u32 + 1)
}

/// Resolve a two-digit year per RFC 7231: the result lies within the window
/// ending 50 years after `current_year`, so a year that would land further in
/// the future means the most recent past year with those digits.
pub fn expand_two_digit_year(yy: u32, current_year: i32) -> i32 {
    let century = current_year - current_year.rem_euclid(100);
    let candidate = century + yy as i32;
    if candidate > current_year + 50 {
        candidate - 100
    } else if candidate <= current_year - 50 {
        candidate + 100
    } else {
        candidate
    }
}

fn expect_gmt<'a>(mut rest: impl Iterator<Item = &'a str>) -> Option<()> {
    match (rest.next(), rest.next()) {
        (Some("GMT"), None) => Some(()),
        _ => None,
    }
}

fn build(year: i32, month: u32, day: u32, time: &str) -> Option<NaiveDateTime> {
    let mut parts = time.split(':');
    let hour = digits(parts.next()?, 2, 2)?;
    let minute = digits(parts.next()?, 2, 2)?;
    let second = digits(parts.next()?, 2, 2)?;
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

fn digits(token: &str, min: usize, max: usize) -> Option<u32> {
    if token.len() < min || token.len() > max || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
