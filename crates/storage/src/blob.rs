use crate::error::StorageError;

/// Key under which the trade collection is persisted.
pub const TRADES_KEY: &str = "trades";

/// Key under which the note collection is persisted.
pub const NOTES_KEY: &str = "notes";

/// A generic keyed blob store.
///
/// The journal persists each collection as one JSON-serialized array per
/// key. A missing key means "nothing stored yet", never an error. Writes
/// replace the whole blob; there are no partial updates.
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
