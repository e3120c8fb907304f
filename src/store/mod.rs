//! Durable storage for employee records.
//!
//! Records live in a line-oriented text file (see [`codec`]) that is loaded
//! once and rewritten atomically after every change.

pub mod codec;
mod record_store;

pub use record_store::{RecordStore, load_records, save_records};
