//! Repository modules implementing store operations for askboard entities.
//!
//! `question` adds methods to `AskService` via `impl AskService` blocks;
//! `tag` holds the connection-level helpers they share.

pub mod question;
pub(crate) mod tag;
