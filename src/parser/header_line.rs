//! Raw header-line unfolding, shared by the entry codec and (defensively)
//! by anything that re-reads headers this crate itself never folds.
//!
//! Grounded in the teacher repo's `parser/header::unfold_headers`: join
//! continuation lines (starting with a space or tab) onto the previous
//! header, and return lowercased `(name, value)` pairs in order.

/// Unfold a block of header lines into `(lowercase_name, raw_value)` pairs.
///
/// Lines without a colon that are not continuations are skipped.
pub fn unfold_headers(text: &str) -> Vec<(String, String)> {
    let mut result: Vec<(String, String)> = Vec::new();

    for line in text.split('\n') {
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(last) = result.last_mut() {
                last.1.push(' ');
                last.1.push_str(line.trim());
            }
        } else if let Some(colon_pos) = line.find(':') {
            let name = line[..colon_pos].trim().to_lowercase();
            let value = line[colon_pos + 1..].trim().to_string();
            result.push((name, value));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfolds_continuation_lines() {
        let text = "Subject: This is a long\n continued subject\nFrom: a@b\n";
        let headers = unfold_headers(text);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0], ("subject".to_string(), "This is a long continued subject".to_string()));
        assert_eq!(headers[1], ("from".to_string(), "a@b".to_string()));
    }

    #[test]
    fn skips_lines_without_colon() {
        let text = "not a header\nFrom: a@b\n";
        let headers = unfold_headers(text);
        assert_eq!(headers, vec![("from".to_string(), "a@b".to_string())]);
    }
}
