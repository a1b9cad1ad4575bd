//! Storage utility (spec §6): a directory-backed view of mailboxes and the
//! message entries inside them.

pub mod reader;

pub use reader::{BoxHandle, Entry, Store};
