//! `Mua`: the top-level mail user agent tying storage to in-memory
//! mailboxes (spec §4.4).

use crate::error::{MailError, Result};
use crate::model::mailbox::Mailbox;
use crate::model::message::Message;
use crate::store::Store;

/// A set of named mailboxes materialised from a base directory, with at
/// most one "selected" mailbox at a time.
///
/// `selected` is `Option<String>` rather than the source's empty-string
/// sentinel (spec §9 open question, resolved in `DESIGN.md`): this crate
/// allows a mailbox whose own name is empty (spec §3), so `None` and
/// `Some(String::new())` must stay distinguishable.
pub struct Mua {
    base_dir: String,
    store: Store,
    mailboxes: Vec<Mailbox>,
    selected: Option<String>,
}

impl Mua {
    /// Materialise all mailboxes currently present under `base_dir`.
    pub fn open(base_dir: impl Into<String>) -> Result<Self> {
        let base_dir = base_dir.into();
        if base_dir.is_empty() {
            return Err(MailError::EmptyInput("base_dir"));
        }
        let store = Store::open(&base_dir)?;
        let mailboxes = Self::load_mailboxes(&store)?;
        Ok(Self {
            base_dir,
            store,
            mailboxes,
            selected: None,
        })
    }

    fn load_mailboxes(store: &Store) -> Result<Vec<Mailbox>> {
        let mut mailboxes = Vec::new();
        for box_handle in store.boxes()? {
            mailboxes.push(Mailbox::from_box(&box_handle)?);
        }
        mailboxes.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(mailboxes)
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    /// All mailboxes, ascending by name.
    pub fn mailboxes(&self) -> &[Mailbox] {
        &self.mailboxes
    }

    /// Re-read the mailbox list from storage, preserving the selection if
    /// the selected mailbox still exists.
    pub fn refresh(&mut self) -> Result<()> {
        self.mailboxes = Self::load_mailboxes(&self.store)?;
        Ok(())
    }

    /// Select the `index`th mailbox (1-based). Fails `OutOfRange` outside
    /// `[1, count]`.
    pub fn select(&mut self, index: i64) -> Result<()> {
        if index < 1 || index as usize > self.mailboxes.len() {
            return Err(MailError::OutOfRange {
                index,
                count: self.mailboxes.len(),
            });
        }
        self.selected = Some(self.mailboxes[(index - 1) as usize].name().to_string());
        Ok(())
    }

    /// A copy of the currently selected mailbox. Fails `NoSelection` if none
    /// is selected, `NoSuchMailbox` if the selected name no longer resolves.
    pub fn current(&self) -> Result<Mailbox> {
        let name = self.selected.as_ref().ok_or(MailError::NoSelection)?;
        self.mailboxes
            .iter()
            .find(|m| m.name() == name)
            .cloned()
            .ok_or_else(|| MailError::NoSuchMailbox(name.clone()))
    }

    /// Read the `n`th message (1-based) of the selected mailbox.
    pub fn read_message(&self, n: i64) -> Result<Message> {
        self.current()?.read(n)
    }

    /// Encode `message`, append it to the on-disk box matching the selected
    /// name, then apply the same append to the in-memory mailbox. Storage is
    /// written before the in-memory mutation, so a storage failure leaves
    /// the in-memory model untouched (spec §5).
    pub fn save_message(&mut self, message: Message) -> Result<()> {
        let name = self.selected.as_ref().ok_or(MailError::NoSelection)?.clone();
        let box_handle = self
            .store
            .find_box(&name)?
            .ok_or_else(|| MailError::NoSuchMailbox(name.clone()))?;

        let encoded = message.encode();
        box_handle.entry(&encoded)?;

        let mailbox = self
            .mailboxes
            .iter_mut()
            .find(|m| m.name() == name)
            .ok_or_else(|| MailError::NoSuchMailbox(name.clone()))?;
        mailbox.compose(message);
        Ok(())
    }

    /// Resolve the `n`th message of the selected mailbox, delete its
    /// matching on-disk entry (found by content equality), then remove it
    /// from the in-memory mailbox. Storage is mutated first.
    pub fn delete_message(&mut self, n: i64) -> Result<()> {
        let name = self.selected.as_ref().ok_or(MailError::NoSelection)?.clone();
        let mailbox = self
            .mailboxes
            .iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| MailError::NoSuchMailbox(name.clone()))?;
        let message = mailbox.read(n)?;
        let encoded = message.encode();

        let box_handle = self
            .store
            .find_box(&name)?
            .ok_or_else(|| MailError::NoSuchMailbox(name.clone()))?;
        let entry = box_handle
            .entries()?
            .into_iter()
            .find(|e| e.content().map(|c| c == encoded).unwrap_or(false))
            .ok_or_else(|| MailError::NoSuchMailbox(name.clone()))?;
        entry.delete()?;

        let mailbox = self
            .mailboxes
            .iter_mut()
            .find(|m| m.name() == name)
            .expect("mailbox present, checked above");
        mailbox.delete(n)?;
        Ok(())
    }

    /// `"[*] > "` when nothing is selected, else `"[<name>] > "`.
    pub fn prompt(&self) -> String {
        match &self.selected {
            None => "[*] > ".to_string(),
            Some(name) => format!("[{name}] > "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::address::Address;
    use chrono::{FixedOffset, TimeZone};
    use tempfile::tempdir;

    fn sample_message() -> Message {
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
            .unwrap();
        Message::singlepart(
            Address::new("", "a", "b").unwrap(),
            vec![Address::new("", "c", "d").unwrap()],
            "hi".to_string(),
            date,
            "hello",
            false,
        )
        .unwrap()
    }

    #[test]
    fn select_validates_index_range() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("work")).unwrap();
        let mut mua = Mua::open(dir.path().to_str().unwrap()).unwrap();
        assert!(mua.select(0).is_err());
        assert!(mua.select(2).is_err());
        assert!(mua.select(1).is_ok());
        assert_eq!(mua.prompt(), "[work] > ");
    }

    #[test]
    fn current_fails_without_selection() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("work")).unwrap();
        let mua = Mua::open(dir.path().to_str().unwrap()).unwrap();
        assert!(mua.current().is_err());
        assert_eq!(mua.prompt(), "[*] > ");
    }

    #[test]
    fn save_message_persists_and_updates_memory() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("work")).unwrap();
        let mut mua = Mua::open(dir.path().to_str().unwrap()).unwrap();
        mua.select(1).unwrap();
        mua.save_message(sample_message()).unwrap();
        assert_eq!(mua.current().unwrap().count(), 1);

        // Reopen from disk to verify persistence.
        let reopened = Mua::open(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(reopened.mailboxes()[0].count(), 1);
    }

    #[test]
    fn save_message_fails_for_missing_mailbox() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("work")).unwrap();
        let mut mua = Mua::open(dir.path().to_str().unwrap()).unwrap();
        mua.select(1).unwrap();
        std::fs::remove_dir(dir.path().join("work")).unwrap();
        let result = mua.save_message(sample_message());
        assert!(matches!(result, Err(MailError::NoSuchMailbox(_))));
        assert_eq!(mua.current().unwrap().count(), 0);
    }

    #[test]
    fn delete_message_removes_from_both_sides() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("work")).unwrap();
        let mut mua = Mua::open(dir.path().to_str().unwrap()).unwrap();
        mua.select(1).unwrap();
        mua.save_message(sample_message()).unwrap();
        mua.delete_message(1).unwrap();
        assert_eq!(mua.current().unwrap().count(), 0);

        let reopened = Mua::open(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(reopened.mailboxes()[0].count(), 0);
    }
}
