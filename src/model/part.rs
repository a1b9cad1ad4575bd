//! A MIME part: an ordered list of headers plus a non-empty body.

use crate::error::{MailError, Result};
use crate::model::header::Header;
use crate::util::{ascii, base64};

/// Base64 prefix of the literal bytes `<html>` — the heuristic the source
/// uses to recognise an HTML body that needs Base64 decoding (spec §9,
/// preserved as-is: any non-HTML body starting with this byte sequence
/// would be misclassified).
const HTML_BODY_MARKER: &str = "PGh0bWw+";

/// Headers plus body for one MIME part. Immutable once constructed; there is
/// no inner-class coupling to [`crate::model::message::Message`] (spec §9).
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    headers: Vec<Header>,
    body: String,
}

impl Part {
    /// Build a part from an ordered, non-empty header list and a
    /// non-empty body. Header order is preserved exactly as given.
    pub fn new(headers: Vec<Header>, body: impl Into<String>) -> Result<Self> {
        if headers.is_empty() {
            return Err(MailError::EmptyInput("part headers"));
        }
        let body = body.into();
        if body.is_empty() {
            return Err(MailError::EmptyInput("part body"));
        }
        Ok(Self { headers, body })
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The first header matching `tag` (e.g. `"Content-Type"`), if any.
    pub fn header(&self, tag: &str) -> Option<&Header> {
        self.headers.iter().find(|h| h.tag() == tag)
    }

    /// `(media_type, charset)`, defaulting to `("text/plain", "us-ascii")`
    /// when no `Content-Type` header is present (spec §3).
    pub fn content_type(&self) -> (String, String) {
        match self.header("Content-Type") {
            Some(Header::ContentType {
                media_type,
                charset,
            }) => (media_type.clone(), charset.clone()),
            _ => ("text/plain".to_string(), "us-ascii".to_string()),
        }
    }

    pub fn is_html(&self) -> bool {
        self.content_type().0 == "text/html"
    }

    /// `encode_headers(part) + "\n" + encode_body(part)`.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for header in &self.headers {
            out.push_str(&header.encode());
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.encode_body());
        out
    }

    /// Base64-encode the body iff the content-type is `text/html` or the
    /// body is non-ASCII; otherwise emit it verbatim (spec §8 property 3).
    pub fn encode_body(&self) -> String {
        if self.is_html() || !ascii::is_ascii(&self.body) {
            base64::encode(&self.body)
        } else {
            self.body.clone()
        }
    }
}

/// Decode a raw fragment body: Base64-decode it iff it begins with the
/// literal `"PGh0bWw+"` marker, otherwise pass it through unchanged
/// (spec §4.2, §9 — the heuristic is preserved for round-trip compatibility).
pub fn decode_body(raw: &str) -> String {
    if raw.starts_with(HTML_BODY_MARKER) {
        base64::decode(raw)
    } else {
        raw.to_string()
    }
}
