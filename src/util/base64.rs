//! Base64 for MIME bodies and RFC 2047 `=?utf-8?B?…?=` encoded-words.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Encode a body string to Base64 (no line wrapping; the codec adds none).
pub fn encode(s: &str) -> String {
    STANDARD.encode(s.as_bytes())
}

/// Decode a Base64 body back to a string.
///
/// Invalid Base64 or non-UTF-8 bytes decode to the empty string rather than
/// failing — malformed bodies are a storage-layer concern, not a header
/// decode error, and the spec only defines `MalformedHeader`/`MalformedDate`/
/// `MalformedAddress` as hard decode failures.
pub fn decode(encoded: &str) -> String {
    STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_default()
}

/// Encode a header value as the `=?utf-8?B?<base64>?=` encoded-word.
pub fn encode_word(s: &str) -> String {
    format!("=?utf-8?B?{}?=", STANDARD.encode(s.as_bytes()))
}

/// The literal prefix of an encoded-word in `utf-8`/`B` form.
pub const ENCODED_WORD_PREFIX: &str = "=?utf-8?B?";

/// Decode an encoded-word (the `=?utf-8?B?<base64>?=` form). Returns `None`
/// if `raw` is not shaped like one.
pub fn decode_word(raw: &str) -> Option<String> {
    let body = raw.strip_prefix(ENCODED_WORD_PREFIX)?;
    let body = body.strip_suffix("?=")?;
    STANDARD
        .decode(body)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_body() {
        let s = "hello, world\n";
        assert_eq!(decode(&encode(s)), s);
    }

    #[test]
    fn round_trip_word() {
        let s = "ciào";
        let word = encode_word(s);
        assert!(word.starts_with(ENCODED_WORD_PREFIX));
        assert_eq!(decode_word(&word).unwrap(), s);
    }

    #[test]
    fn decode_word_rejects_plain_text() {
        assert_eq!(decode_word("hi"), None);
    }
}
