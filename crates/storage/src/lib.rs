//! Key-value blob persistence for the trading journal.
//!
//! The journal treats durability as a narrow get/set of JSON-serialized
//! arrays under well-known keys. This crate defines that port and ships a
//! file-backed implementation for the CLI plus an in-memory one for tests.

pub mod blob;
pub mod error;
pub mod file;
pub mod memory;

// Re-export the key components to create a clean, public-facing API.
pub use blob::{BlobStore, NOTES_KEY, TRADES_KEY};
pub use error::StorageError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
