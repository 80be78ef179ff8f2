use crate::error::TransferError;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// The "emit bytes with a filename" port.
///
/// The journal core never decides where exported files land; it hands the
/// finished bytes to whatever sink the caller injected.
pub trait FileSink {
    fn emit(&self, filename: &str, bytes: &[u8]) -> Result<(), TransferError>;
}

/// A sink that writes files into a target directory on disk.
#[derive(Debug, Clone)]
pub struct DiskSink {
    dir: PathBuf,
}

impl DiskSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl FileSink for DiskSink {
    fn emit(&self, filename: &str, bytes: &[u8]) -> Result<(), TransferError> {
        fs::create_dir_all(&self.dir).map_err(|e| TransferError::Emit {
            filename: filename.to_string(),
            source: e,
        })?;
        let path = self.path_for(filename);
        fs::write(&path, bytes).map_err(|e| TransferError::Emit {
            filename: filename.to_string(),
            source: e,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "file emitted");
        Ok(())
    }
}
