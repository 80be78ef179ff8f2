use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("No trades recorded; nothing to report on")]
    EmptyDataset,
}
