//! Customer record store backends.
//!
//! Two implementations of [`troupe_core::RecordStore`]:
//! - [`JsonFileStore`]: the production whole-file JSON ledger
//! - [`InMemoryStore`]: an ephemeral fake for tests

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;
