use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Validation failed: {0}")]
    Validation(#[from] core_types::CoreError),

    #[error("Persistence failed: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Stored collection is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
