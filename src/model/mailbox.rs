//! `Mailbox`: a named, date-ordered collection of [`Message`]s backed by a
//! single storage box (spec §4.3).

use crate::error::{MailError, Result};
use crate::model::message::Message;
use crate::parser::fragment;
use crate::store::BoxHandle;

/// An ordered collection of messages bound to a name. Strictly ordered by
/// descending `date()`, stable for equal dates (spec §3, §4.3).
#[derive(Debug, Clone, PartialEq)]
pub struct Mailbox {
    name: String,
    messages: Vec<Message>,
}

impl Mailbox {
    /// An empty mailbox with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    /// Build a mailbox by decoding every entry in `box_handle` through the
    /// entry codec and the message codec, then sorting.
    pub fn from_box(box_handle: &BoxHandle) -> Result<Self> {
        let mut messages = Vec::new();
        for entry in box_handle.entries()? {
            let raw = entry.content()?;
            let fragments = fragment::decode(&raw);
            messages.push(Message::from_fragments(&fragments)?);
        }
        let mut mailbox = Self {
            name: box_handle.name().to_string(),
            messages,
        };
        mailbox.resort();
        Ok(mailbox)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> usize {
        self.messages.len()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Read the `n`th message (1-based). Fails `OutOfRange` outside `[1, count]`.
    pub fn read(&self, n: i64) -> Result<Message> {
        let index = self.validate_index(n)?;
        Ok(self.messages[index].clone())
    }

    /// Remove the `n`th message (1-based). Fails `OutOfRange` outside `[1, count]`.
    pub fn delete(&mut self, n: i64) -> Result<Message> {
        let index = self.validate_index(n)?;
        Ok(self.messages.remove(index))
    }

    /// Append a message, then re-sort by descending date.
    pub fn compose(&mut self, message: Message) {
        self.messages.push(message);
        self.resort();
    }

    fn validate_index(&self, n: i64) -> Result<usize> {
        if n < 1 || n as usize > self.messages.len() {
            return Err(MailError::OutOfRange {
                index: n,
                count: self.messages.len(),
            });
        }
        Ok((n - 1) as usize)
    }

    fn resort(&mut self) {
        self.messages.sort_by(|a, b| {
            let date_a = a.date().expect("mailbox message missing mandatory Date header");
            let date_b = b.date().expect("mailbox message missing mandatory Date header");
            date_b.cmp(&date_a)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::address::Address;
    use chrono::{Datelike, FixedOffset, TimeZone};

    fn msg_at(day: u32) -> Message {
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, day, 0, 0, 0)
            .unwrap();
        Message::singlepart(
            Address::new("", "a", "b").unwrap(),
            vec![Address::new("", "c", "d").unwrap()],
            "s".to_string(),
            date,
            "body",
            false,
        )
        .unwrap()
    }

    #[test]
    fn compose_keeps_descending_date_order() {
        let mut mailbox = Mailbox::new("inbox");
        mailbox.compose(msg_at(1));
        mailbox.compose(msg_at(3));
        mailbox.compose(msg_at(2));
        let dates: Vec<_> = mailbox
            .messages()
            .iter()
            .map(|m| m.date().unwrap().day())
            .collect();
        assert_eq!(dates, vec![3, 2, 1]);
    }

    #[test]
    fn read_and_delete_are_out_of_range_safe() {
        let mut mailbox = Mailbox::new("inbox");
        mailbox.compose(msg_at(1));
        assert!(mailbox.read(0).is_err());
        assert!(mailbox.read(2).is_err());
        assert!(mailbox.read(1).is_ok());
        assert!(mailbox.delete(0).is_err());
        assert!(mailbox.delete(1).is_ok());
        assert_eq!(mailbox.count(), 0);
    }

    #[test]
    fn delete_last_message_empties_mailbox() {
        let mut mailbox = Mailbox::new("inbox");
        mailbox.compose(msg_at(1));
        mailbox.delete(1).unwrap();
        assert_eq!(mailbox.count(), 0);
    }
}
