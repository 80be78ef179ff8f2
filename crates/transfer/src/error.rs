use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("No trades recorded; nothing to export")]
    EmptyDataset,

    #[error("Invalid import file: {0}")]
    InvalidFormat(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to emit '{filename}': {source}")]
    Emit {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}
