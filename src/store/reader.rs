//! Directory-backed storage driver.
//!
//! Layout: one sub-directory per named mailbox under `base_dir`; message
//! files directly under `base_dir` (not in any sub-directory) belong to the
//! mailbox with the empty name, since at most one such mailbox may exist
//! (spec §3). One file per message entry; content is the bit-exact output
//! of [`crate::model::message::Message::encode`].
//!
//! Grounded in the teacher repo's `store::MboxStore`: a thin, synchronous
//! wrapper around `std::fs` that never holds a handle open longer than the
//! call that needs it (spec §5 — scoped resources).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{MailError, Result};

/// Root of a directory tree of mailboxes.
pub struct Store {
    base_dir: PathBuf,
}

impl Store {
    /// Open a base directory, creating it if it does not exist.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir).map_err(|e| MailError::io(&base_dir, e))?;
        }
        Ok(Self { base_dir })
    }

    /// All boxes present in the base directory, ordered by name ascending.
    pub fn boxes(&self) -> Result<Vec<BoxHandle>> {
        let mut boxes = Vec::new();
        let mut has_unnamed_entries = false;

        for dirent in fs::read_dir(&self.base_dir).map_err(|e| MailError::io(&self.base_dir, e))? {
            let dirent = dirent.map_err(|e| MailError::io(&self.base_dir, e))?;
            let path = dirent.path();
            if path.is_dir() {
                let name = dirent.file_name().to_string_lossy().into_owned();
                boxes.push(BoxHandle {
                    name,
                    path,
                    is_root: false,
                });
            } else {
                has_unnamed_entries = true;
            }
        }

        if has_unnamed_entries {
            boxes.push(BoxHandle {
                name: String::new(),
                path: self.base_dir.clone(),
                is_root: true,
            });
        }

        boxes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(boxes)
    }

    /// The box named `name`, if it is currently present on disk.
    pub fn find_box(&self, name: &str) -> Result<Option<BoxHandle>> {
        Ok(self.boxes()?.into_iter().find(|b| b.name == name))
    }
}

/// A named directory holding message entries.
#[derive(Debug, Clone)]
pub struct BoxHandle {
    name: String,
    path: PathBuf,
    is_root: bool,
}

impl BoxHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in this box, ordered by filename (insertion order).
    pub fn entries(&self) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for dirent in fs::read_dir(&self.path).map_err(|e| MailError::io(&self.path, e))? {
            let dirent = dirent.map_err(|e| MailError::io(&self.path, e))?;
            let path = dirent.path();
            if self.is_root && path.is_dir() {
                continue;
            }
            if !self.is_root || path.is_file() {
                entries.push(Entry { path });
            }
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    /// Append a new entry with the given content, returning its handle.
    pub fn entry(&self, content: &str) -> Result<Entry> {
        let sequence = self.next_sequence()?;
        let path = self.path.join(format!("{sequence:012}.msg"));
        debug!(path = %path.display(), "appending entry");
        fs::write(&path, content).map_err(|e| MailError::io(&path, e))?;
        Ok(Entry { path })
    }

    fn next_sequence(&self) -> Result<u64> {
        let mut max_seen: Option<u64> = None;
        for dirent in fs::read_dir(&self.path).map_err(|e| MailError::io(&self.path, e))? {
            let dirent = dirent.map_err(|e| MailError::io(&self.path, e))?;
            if let Some(n) = dirent
                .path()
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
            {
                max_seen = Some(max_seen.map_or(n, |m| m.max(n)));
            }
        }
        Ok(max_seen.map_or(0, |n| n + 1))
    }
}

/// A single stored message entry.
#[derive(Debug, Clone)]
pub struct Entry {
    path: PathBuf,
}

impl Entry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The entry's full textual content.
    pub fn content(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| MailError::io(&self.path, e))
    }

    /// Remove this entry from disk.
    pub fn delete(&self) -> Result<()> {
        debug!(path = %self.path.display(), "deleting entry");
        fs::remove_file(&self.path).map_err(|e| MailError::io(&self.path, e))
    }
}
