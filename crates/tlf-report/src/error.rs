use polars::prelude::PolarsError;
use thiserror::Error;
use tlf_count::CountError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Count(#[from] CountError),

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
