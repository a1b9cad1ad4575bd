//! Address-tokenizer utility: splits a comma-separated address-list header
//! value into `(display_name, local, domain)` tuples.
//!
//! Grounded in the teacher repo's `EmailAddress::parse`/`parse_list`
//! (`model/address.rs`), generalized to split the bare address on `@` since
//! the spec's [`crate::model::address::Address`] keeps `local` and `domain`
//! as separate fields rather than one combined string.

/// One raw, not-yet-validated address tuple: `(display_name, local, domain)`.
pub type RawAddress = (String, String, String);

/// Split a comma-separated address-list header value into raw tuples.
///
/// Handles quoted display names containing commas (`"Last, First" <a@b.com>`)
/// and bare addresses without angle brackets. Parts that cannot be
/// identified are left empty; the header algebra decides whether an empty
/// part is an error.
pub fn decode(raw: &str) -> Vec<RawAddress> {
    split_addresses(raw)
        .into_iter()
        .map(|segment| parse_one(&segment))
        .collect()
}

/// Split on top-level commas, respecting `"..."` quoting and `<...>` angles.
fn split_addresses(raw: &str) -> Vec<String> {
    let mut results = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_angle = false;

    for ch in raw.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '<' if !in_quotes => {
                in_angle = true;
                current.push(ch);
            }
            '>' if !in_quotes => {
                in_angle = false;
                current.push(ch);
            }
            ',' if !in_quotes && !in_angle => {
                results.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        results.push(current);
    }
    results
}

/// Parse one segment into `(display_name, local, domain)`.
fn parse_one(segment: &str) -> RawAddress {
    let trimmed = segment.trim();

    let (display_name, address) = if let Some(angle_start) = trimmed.rfind('<') {
        if let Some(angle_end) = trimmed.rfind('>') {
            if angle_end > angle_start {
                let addr = trimmed[angle_start + 1..angle_end].trim().to_string();
                let name = strip_quotes(trimmed[..angle_start].trim());
                (name, addr)
            } else {
                (String::new(), trimmed.to_string())
            }
        } else {
            (String::new(), trimmed.to_string())
        }
    } else {
        (String::new(), trimmed.to_string())
    };

    match address.split_once('@') {
        Some((local, domain)) => (display_name, local.to_string(), domain.to_string()),
        None => (display_name, address, String::new()),
    }
}

fn strip_quotes(s: &str) -> String {
    if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

/// `true` if `s` is a valid `local`/`domain` address part: non-empty,
/// restricted to RFC 5322 `atext` plus internal dots, no leading/trailing
/// dot, no consecutive dots, no NUL bytes.
pub fn is_valid_address_part(s: &str) -> bool {
    if s.is_empty() || s.contains('\0') {
        return false;
    }
    if s.starts_with('.') || s.ends_with('.') || s.contains("..") {
        return false;
    }
    s.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                '!' | '#'
                    | '$'
                    | '%'
                    | '&'
                    | '\''
                    | '*'
                    | '+'
                    | '-'
                    | '/'
                    | '='
                    | '?'
                    | '^'
                    | '_'
                    | '`'
                    | '{'
                    | '|'
                    | '}'
                    | '~'
                    | '.'
            )
    })
}
