//! Centralized error types for postbox.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the postbox library.
#[derive(Error, Debug)]
pub enum MailError {
    /// A required string was empty where the model requires non-empty content.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// An address-valued header failed to parse.
    #[error("malformed address in '{raw}': {reason}")]
    MalformedAddress { raw: String, reason: String },

    /// The `Date` header failed to parse as RFC 5322.
    #[error("malformed date '{0}'")]
    MalformedDate(String),

    /// A header's raw value did not match its expected grammar.
    #[error("malformed header '{tag}': {reason}")]
    MalformedHeader { tag: String, reason: String },

    /// The first part of a message lacked a mandatory header.
    #[error("missing header: {0}")]
    MissingHeader(&'static str),

    /// An operation required a selected mailbox, but none is selected.
    #[error("no mailbox selected")]
    NoSelection,

    /// The selected mailbox name does not resolve to any mailbox.
    #[error("no such mailbox: {0}")]
    NoSuchMailbox(String),

    /// A 1-based index was outside `[1, count]`.
    #[error("index {index} out of range (1..={count})")]
    OutOfRange { index: i64, count: usize },

    /// I/O error from the storage utility, with the associated path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias for `Result<T, MailError>`.
pub type Result<T> = std::result::Result<T, MailError>;

impl MailError {
    /// Build a [`MailError::Io`] from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
