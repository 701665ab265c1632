//! Logging infrastructure: the JSONL run journal.
//!
//! Provides [`JsonlRunJournal`], which implements the
//! [`RunJournal`](aura_application::RunJournal) port.

mod jsonl_journal;

pub use jsonl_journal::JsonlRunJournal;
