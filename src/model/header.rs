//! The header algebra: a closed, tagged-variant family of typed headers.
//!
//! Re-expressed from the source's abstract-base-class-with-downcasts design
//! (spec §9) as a sum type: one arm per header, matched rather than
//! downcast, so `encode`/`decode` are total by construction.

use chrono::{DateTime, FixedOffset};

use crate::error::{MailError, Result};
use crate::model::address::Address;
use crate::util::{addr, ascii, base64, date};

/// A single typed header. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Header {
    /// `From:` — exactly one address.
    Sender(Address),
    /// `To:` — one or more addresses, in order.
    Recipients(Vec<Address>),
    /// `Subject:` — may be empty.
    Subject(String),
    /// `Date:` — a zoned instant.
    Date(DateTime<FixedOffset>),
    /// `Content-Type:` — media type and optional charset.
    ContentType { media_type: String, charset: String },
    /// `Content-Transfer-Encoding:` — non-empty encoding name.
    ContentTransferEncoding(String),
    /// `MIME-Version:` — non-empty version string.
    MimeVersion(String),
}

impl Header {
    /// The header's type-tag string, as it appears before `": "` on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            Header::Sender(_) => "From",
            Header::Recipients(_) => "To",
            Header::Subject(_) => "Subject",
            Header::Date(_) => "Date",
            Header::ContentType { .. } => "Content-Type",
            Header::ContentTransferEncoding(_) => "Content-Transfer-Encoding",
            Header::MimeVersion(_) => "MIME-Version",
        }
    }

    /// Build a `Recipients` header, failing if the list is empty.
    pub fn recipients(addresses: Vec<Address>) -> Result<Header> {
        if addresses.is_empty() {
            return Err(MailError::EmptyInput("recipients"));
        }
        Ok(Header::Recipients(addresses))
    }

    /// Build a `Content-Transfer-Encoding` header, failing on an empty value.
    pub fn content_transfer_encoding(value: impl Into<String>) -> Result<Header> {
        let value = value.into();
        if value.is_empty() {
            return Err(MailError::EmptyInput("content-transfer-encoding"));
        }
        Ok(Header::ContentTransferEncoding(value))
    }

    /// Build a `MIME-Version` header, failing on an empty value.
    pub fn mime_version(value: impl Into<String>) -> Result<Header> {
        let value = value.into();
        if value.is_empty() {
            return Err(MailError::EmptyInput("mime-version"));
        }
        Ok(Header::MimeVersion(value))
    }

    /// Encode as `"<Tag>: <value>"` (no trailing newline).
    pub fn encode(&self) -> String {
        match self {
            Header::Sender(address) => format!("From: {}", address.to_canonical()),
            Header::Recipients(addresses) => {
                let joined = addresses
                    .iter()
                    .map(Address::to_canonical)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("To: {joined}")
            }
            Header::Subject(text) => {
                if ascii::is_ascii(text) {
                    format!("Subject: {text}")
                } else {
                    format!("Subject: {}", base64::encode_word(text))
                }
            }
            Header::Date(instant) => format!("Date: {}", date::encode(instant)),
            Header::ContentType {
                media_type,
                charset,
            } => {
                if charset.is_empty() {
                    format!("Content-Type: {media_type}; boundary=frontier")
                } else {
                    format!("Content-Type: {media_type}; charset=\"{charset}\"")
                }
            }
            Header::ContentTransferEncoding(value) => {
                format!("Content-Transfer-Encoding: {value}")
            }
            Header::MimeVersion(value) => format!("MIME-Version: {value}"),
        }
    }

    /// Decode a header from its lowercased tag and raw value (the text after
    /// `"Tag: "`, as exposed by [`crate::parser::fragment::Fragment::raw_headers`]).
    ///
    /// Returns `Ok(None)` for tags outside the closed family — unrecognised
    /// headers are ignored by the core during message parsing (spec §4.1).
    pub fn decode(tag_lower: &str, raw_value: &str) -> Result<Option<Header>> {
        match tag_lower {
            "from" => {
                let tuple = addr::decode(raw_value)
                    .into_iter()
                    .next()
                    .ok_or_else(|| MailError::MalformedAddress {
                        raw: raw_value.to_string(),
                        reason: "empty From header".to_string(),
                    })?;
                let address = Address::from_tuple(raw_value, tuple)?;
                Ok(Some(Header::Sender(address)))
            }
            "to" => {
                let tuples = addr::decode(raw_value);
                if tuples.is_empty() {
                    return Err(MailError::MalformedAddress {
                        raw: raw_value.to_string(),
                        reason: "empty To header".to_string(),
                    });
                }
                let mut addresses = Vec::with_capacity(tuples.len());
                for tuple in tuples {
                    addresses.push(Address::from_tuple(raw_value, tuple)?);
                }
                Ok(Some(Header::Recipients(addresses)))
            }
            "subject" => match base64::decode_word(raw_value) {
                Some(decoded) => Ok(Some(Header::Subject(decoded))),
                None => Ok(Some(Header::Subject(raw_value.to_string()))),
            },
            "date" => Ok(Some(Header::Date(date::decode(raw_value)?))),
            "content-type" => {
                let (media_type, charset) = decode_content_type(raw_value);
                Ok(Some(Header::ContentType {
                    media_type,
                    charset,
                }))
            }
            "content-transfer-encoding" => {
                Ok(Some(Header::ContentTransferEncoding(raw_value.trim().to_string())))
            }
            "mime-version" => Ok(Some(Header::MimeVersion(raw_value.trim().to_string()))),
            _ => Ok(None),
        }
    }
}

/// Decode a `Content-Type` raw value per spec §4.1: split on `"; "`; if the
/// tail names `charset=`, extract its quoted value; otherwise the header is
/// treated as `multipart/alternative` with an empty charset, discarding the
/// original media type (preserved source quirk, spec §9).
fn decode_content_type(raw: &str) -> (String, String) {
    let mut segments = raw.splitn(2, "; ");
    let media_type = segments.next().unwrap_or("").trim().to_string();
    match segments.next() {
        None => (media_type, String::new()),
        Some(tail) => match tail.trim().strip_prefix("charset=") {
            Some(quoted) => (media_type, quoted.trim().trim_matches('"').to_string()),
            None => ("multipart/alternative".to_string(), String::new()),
        },
    }
}
