//! Entry codec utility (spec §6): decode a raw stored entry into an ordered
//! list of [`Fragment`]s, one per MIME part.
//!
//! A singlepart entry decodes to exactly one fragment. A multipart entry is
//! split on the fixed `frontier` boundary lines that [`crate::model::message`]
//! writes (`--frontier` between parts, `--frontier--` after the last one) —
//! this crate never emits any other boundary name, so the codec only needs
//! to recognise its own.

use crate::parser::header_line::unfold_headers;

/// The raw, per-part view the core walks when reconstructing a [`crate::model::message::Message`].
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    headers: Vec<(String, String)>,
    body: String,
}

impl Fragment {
    /// Ordered `(type_lowercased, value)` header pairs.
    pub fn raw_headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The raw, not-yet-decoded body text of this fragment.
    pub fn raw_body(&self) -> &str {
        &self.body
    }
}

const BOUNDARY: &str = "--frontier";
const TERMINATOR: &str = "--frontier--";

/// Decode a raw stored entry into its fragments.
pub fn decode(raw: &str) -> Vec<Fragment> {
    split_on_boundary(raw)
        .into_iter()
        .map(|segment| decode_one(&segment))
        .collect()
}

/// Split `raw` on standalone `--frontier` / `--frontier--` lines. Returns a
/// single-element vector (the whole text) when no boundary line is present.
fn split_on_boundary(raw: &str) -> Vec<String> {
    let lines: Vec<&str> = raw.split('\n').collect();
    let is_multipart = lines.iter().any(|l| *l == BOUNDARY || *l == TERMINATOR);
    if !is_multipart {
        return vec![raw.to_string()];
    }

    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines {
        if line == BOUNDARY || line == TERMINATOR {
            segments.push(current.join("\n"));
            current = Vec::new();
        } else {
            current.push(line);
        }
    }
    segments
}

/// Split one part's text into headers (up to the first blank line) and body.
fn decode_one(text: &str) -> Fragment {
    let blank_at = text.find("\n\n");
    let (header_block, body) = match blank_at {
        Some(pos) => (&text[..pos], &text[pos + 2..]),
        None => (text, ""),
    };
    Fragment {
        headers: unfold_headers(header_block),
        body: body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_singlepart_entry() {
        let raw = "From: a@b\nTo: c@d\n\nhello";
        let fragments = decode(raw);
        assert_eq!(fragments.len(), 1);
        assert_eq!(
            fragments[0].raw_headers(),
            &[
                ("from".to_string(), "a@b".to_string()),
                ("to".to_string(), "c@d".to_string())
            ]
        );
        assert_eq!(fragments[0].raw_body(), "hello");
    }

    #[test]
    fn decodes_multipart_entry_into_three_fragments() {
        let raw = "From: a@b\n\nenvelope body\n--frontier\nContent-Type: text/plain\n\ntext body\n--frontier\nContent-Type: text/html\n\nhtml body\n--frontier--\n";
        let fragments = decode(raw);
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0].raw_body(), "envelope body");
        assert_eq!(fragments[1].raw_body(), "text body");
        assert_eq!(fragments[2].raw_body(), "html body");
    }
}
