//! Bulk export and import of the journal dataset.
//!
//! Exports and reports are serialized here and handed to a [`FileSink`],
//! the narrow "emit bytes with a filename" port; how the bytes reach the
//! user (download, disk, clipboard) is the caller's concern. Imports go
//! the other way: the caller hands over the bytes of a user-chosen file
//! and gets a validated payload back, without any store being touched.

pub mod error;
pub mod export;
pub mod import;
pub mod sink;

// Re-export the key components to create a clean, public-facing API.
pub use error::TransferError;
pub use export::{
    build_export, csv_filename, export_filename, render_csv, report_filename, ExportDocument,
    ExportMetadata,
};
pub use import::{parse_import, ImportPayload};
pub use sink::{DiskSink, FileSink};
