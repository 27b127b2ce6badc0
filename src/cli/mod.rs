//! CLI commands for the `conditions` binary.
//!
//! Every command works on a [`StatusDocument`] read from a file or stdin:
//! - **Mutating**: mark-true, mark-false, mark-unknown, sync-ready
//! - **Read-only**: is-true, show

pub mod document;
pub mod mark;
pub mod ready;
pub mod show;

pub use document::StatusDocument;
pub use mark::{MarkCommand, MarkOptions, MarkOutcome};
pub use ready::SyncReadyCommand;
pub use show::{IsTrueCommand, ShowCommand, ShowOptions};
