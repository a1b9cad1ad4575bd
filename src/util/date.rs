//! RFC 5322 date encode/decode for the `Date` header.
//!
//! RFC 5322 §3.3 inherits its date-time grammar from RFC 2822 verbatim, so
//! `chrono`'s RFC 2822 formatter/parser is the exact utility the spec calls
//! for — the same reliance the teacher repo places on it as a parsing
//! fallback in `parser/header.rs`.

use chrono::{DateTime, FixedOffset};

use crate::error::{MailError, Result};

/// Encode a zoned instant as an RFC 5322 date string.
pub fn encode(instant: &DateTime<FixedOffset>) -> String {
    instant.to_rfc2822()
}

/// Decode an RFC 5322 date string into a zoned instant.
pub fn decode(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(raw.trim()).map_err(|_| MailError::MalformedDate(raw.to_string()))
}
