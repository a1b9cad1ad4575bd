//! A `Message`: an ordered, non-empty sequence of [`Part`]s, singlepart or
//! `multipart/alternative` (spec §3, §4.2).

use chrono::{DateTime, FixedOffset};

use crate::error::{MailError, Result};
use crate::model::address::Address;
use crate::model::header::Header;
use crate::model::part::{self, Part};
use crate::parser::fragment::Fragment;
use crate::util::ascii;

/// Fixed body of the envelope part of every multipart message.
const ENVELOPE_BODY: &str = "This is a message with multiple parts in MIME format.";

/// One email: one part (singlepart) or exactly three (multipart/alternative
/// envelope + text + html), per spec §3.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    parts: Vec<Part>,
}

impl Message {
    /// Build a singlepart message. When `is_html` is `false`, the body's
    /// content-type is `text/plain; us-ascii` if the body is pure ASCII,
    /// else `text/plain; utf-8` with `Content-Transfer-Encoding: base64`.
    /// When `is_html` is `true`, the content-type is always
    /// `text/html; utf-8` with `Content-Transfer-Encoding: base64`.
    pub fn singlepart(
        sender: Address,
        recipients: Vec<Address>,
        subject: String,
        date: DateTime<FixedOffset>,
        body: impl Into<String>,
        is_html: bool,
    ) -> Result<Message> {
        let body = body.into();
        if body.is_empty() {
            return Err(MailError::EmptyInput("message body"));
        }

        let mandatory = mandatory_headers(sender, recipients, subject, date)?;
        let (media_type, charset, needs_cte) = if is_html {
            ("text/html", "utf-8", true)
        } else if ascii::is_ascii(&body) {
            ("text/plain", "us-ascii", false)
        } else {
            ("text/plain", "utf-8", true)
        };

        let mut headers = mandatory;
        headers.push(Header::ContentType {
            media_type: media_type.to_string(),
            charset: charset.to_string(),
        });
        if needs_cte {
            headers.push(Header::content_transfer_encoding("base64")?);
        }

        let part = Part::new(headers, body)?;
        Ok(Message { parts: vec![part] })
    }

    /// Build a `multipart/alternative` message with a plain-text and an
    /// HTML alternative. Both bodies must be non-empty.
    pub fn multipart(
        sender: Address,
        recipients: Vec<Address>,
        subject: String,
        date: DateTime<FixedOffset>,
        text_body: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Result<Message> {
        let text_body = text_body.into();
        let html_body = html_body.into();
        if text_body.is_empty() {
            return Err(MailError::EmptyInput("multipart text body"));
        }
        if html_body.is_empty() {
            return Err(MailError::EmptyInput("multipart html body"));
        }

        let mut envelope_headers =
            mandatory_headers(sender, recipients, subject, date)?;
        envelope_headers.push(Header::mime_version("1.0")?);
        envelope_headers.push(Header::ContentType {
            media_type: "multipart/alternative".to_string(),
            charset: String::new(),
        });
        let envelope = Part::new(envelope_headers, ENVELOPE_BODY)?;

        let text_ascii = ascii::is_ascii(&text_body);
        let mut text_headers = vec![Header::ContentType {
            media_type: "text/plain".to_string(),
            charset: if text_ascii { "us-ascii" } else { "utf-8" }.to_string(),
        }];
        if !text_ascii {
            text_headers.push(Header::content_transfer_encoding("base64")?);
        }
        let text_part = Part::new(text_headers, text_body)?;

        let html_headers = vec![
            Header::ContentType {
                media_type: "text/html".to_string(),
                charset: "utf-8".to_string(),
            },
            Header::content_transfer_encoding("base64")?,
        ];
        let html_part = Part::new(html_headers, html_body)?;

        Ok(Message {
            parts: vec![envelope, text_part, html_part],
        })
    }

    /// Reconstruct a message from the fragments produced by decoding a
    /// stored entry (spec §4.2). A single html fragment yields a singlepart
    /// html message, a single non-html fragment a singlepart text message,
    /// and more than one fragment a multipart message. Counts beyond
    /// `== 1` vs `!= 1` are not otherwise validated (spec §9, preserved).
    pub fn from_fragments(fragments: &[Fragment]) -> Result<Message> {
        if fragments.is_empty() {
            return Err(MailError::EmptyInput("message fragments"));
        }
        let parts = fragments
            .iter()
            .map(fragment_to_part)
            .collect::<Result<Vec<_>>>()?;
        Ok(Message { parts })
    }

    /// The message's ordered parts.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// `true` for a three-part `multipart/alternative` message.
    pub fn is_multipart(&self) -> bool {
        self.parts.len() > 1
    }

    fn first_part(&self) -> &Part {
        &self.parts[0]
    }

    /// The `From` header of the first part.
    pub fn sender(&self) -> Result<&Address> {
        match self.first_part().header("From") {
            Some(Header::Sender(address)) => Ok(address),
            _ => Err(MailError::MissingHeader("From")),
        }
    }

    /// The `To` header of the first part.
    pub fn recipients(&self) -> Result<&[Address]> {
        match self.first_part().header("To") {
            Some(Header::Recipients(addresses)) => Ok(addresses),
            _ => Err(MailError::MissingHeader("To")),
        }
    }

    /// The `Subject` header of the first part.
    pub fn subject(&self) -> Result<&str> {
        match self.first_part().header("Subject") {
            Some(Header::Subject(text)) => Ok(text),
            _ => Err(MailError::MissingHeader("Subject")),
        }
    }

    /// The `Date` header of the first part.
    pub fn date(&self) -> Result<DateTime<FixedOffset>> {
        match self.first_part().header("Date") {
            Some(Header::Date(instant)) => Ok(*instant),
            _ => Err(MailError::MissingHeader("Date")),
        }
    }

    /// Encode this message to its on-disk textual form.
    pub fn encode(&self) -> String {
        if self.parts.len() == 1 {
            self.parts[0].encode()
        } else {
            let mut out = String::new();
            out.push_str(&self.parts[0].encode());
            out.push_str("\n--frontier\n");
            out.push_str(&self.parts[1].encode());
            out.push_str("\n--frontier\n");
            out.push_str(&self.parts[2].encode());
            out.push_str("\n--frontier--\n");
            out
        }
    }
}

/// Build the four mandatory headers (`From`, `To`, `Subject`, `Date`) that
/// every message's first part carries, in stored order.
fn mandatory_headers(
    sender: Address,
    recipients: Vec<Address>,
    subject: String,
    date: DateTime<FixedOffset>,
) -> Result<Vec<Header>> {
    Ok(vec![
        Header::Sender(sender),
        Header::recipients(recipients)?,
        Header::Subject(subject),
        Header::Date(date),
    ])
}

/// Decode one [`Fragment`] into a [`Part`]: typed headers for recognised
/// tags (unrecognised tags are skipped, spec §4.1), and the body decoded
/// via [`part::decode_body`].
fn fragment_to_part(fragment: &Fragment) -> Result<Part> {
    let mut headers = Vec::new();
    for (tag, value) in fragment.raw_headers() {
        if let Some(header) = Header::decode(tag, value)? {
            headers.push(header);
        }
    }
    let body = part::decode_body(fragment.raw_body());
    Part::new(headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_date() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .unwrap()
    }

    fn sender() -> Address {
        Address::new("", "a", "b").unwrap()
    }

    fn recipients() -> Vec<Address> {
        vec![Address::new("", "c", "d").unwrap()]
    }

    #[test]
    fn singlepart_ascii_text_encoding() {
        let msg = Message::singlepart(
            sender(),
            recipients(),
            "hi".to_string(),
            sample_date(),
            "hello\n",
            false,
        )
        .unwrap();
        let encoded = msg.encode();
        assert!(encoded.starts_with("From: a@b\nTo: c@d\nSubject: hi\nDate: "));
        assert!(encoded.contains("Content-Type: text/plain; charset=\"us-ascii\"\n\nhello"));
    }

    #[test]
    fn singlepart_non_ascii_subject_is_encoded_word() {
        let msg = Message::singlepart(
            sender(),
            recipients(),
            "ciào".to_string(),
            sample_date(),
            "body",
            false,
        )
        .unwrap();
        assert!(msg.encode().contains("Subject: =?utf-8?B?Y2nDoG8=?="));
    }

    #[test]
    fn multipart_has_three_frontier_separated_parts() {
        let msg = Message::multipart(
            sender(),
            recipients(),
            "hi".to_string(),
            sample_date(),
            "t",
            "<html>x</html>",
        )
        .unwrap();
        let encoded = msg.encode();
        assert_eq!(encoded.matches("\n--frontier\n").count(), 2);
        assert!(encoded.ends_with("\n--frontier--\n"));
        assert!(encoded.contains(ENVELOPE_BODY));
    }

    #[test]
    fn singlepart_round_trips_through_fragments() {
        let msg = Message::singlepart(
            sender(),
            recipients(),
            "hi".to_string(),
            sample_date(),
            "hello\n",
            false,
        )
        .unwrap();
        let encoded = msg.encode();
        let fragments = crate::parser::fragment::decode(&encoded);
        let decoded = Message::from_fragments(&fragments).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn multipart_round_trips_through_fragments() {
        let msg = Message::multipart(
            sender(),
            recipients(),
            "hi".to_string(),
            sample_date(),
            "plain text",
            "<html>hello</html>",
        )
        .unwrap();
        let encoded = msg.encode();
        let fragments = crate::parser::fragment::decode(&encoded);
        assert_eq!(fragments.len(), 3);
        let decoded = Message::from_fragments(&fragments).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn accessors_read_first_part() {
        let msg = Message::singlepart(
            sender(),
            recipients(),
            "hi".to_string(),
            sample_date(),
            "hello",
            false,
        )
        .unwrap();
        assert_eq!(msg.sender().unwrap().email(), "a@b");
        assert_eq!(msg.subject().unwrap(), "hi");
        assert_eq!(msg.date().unwrap(), sample_date());
    }

    #[test]
    fn rejects_empty_body() {
        assert!(Message::singlepart(
            sender(),
            recipients(),
            "hi".to_string(),
            sample_date(),
            "",
            false
        )
        .is_err());
    }
}
