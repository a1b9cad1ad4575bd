//! `postbox` — a directory-backed mail user agent.
//!
//! The core is the message model and its MIME codec: typed headers with
//! per-header syntax, single/multi-part bodies, a bit-exact round-trip
//! codec, and the mailbox/MUA organisation built on top. See
//! [`model::mua::Mua`] for the top-level entry point.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod store;
pub mod util;
