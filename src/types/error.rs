use thiserror::Error;

/// bikedash error types
#[derive(Error, Debug)]
pub enum DashboardError {
    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading/deserialization failed
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A row parsed but violated an input invariant
    #[error("malformed record: {0}")]
    Malformed(String),

    /// A data file parsed to zero rows
    #[error("dataset contains no rows")]
    EmptyDataset,
}

/// Result type alias for bikedash
pub type Result<T> = std::result::Result<T, DashboardError>;
