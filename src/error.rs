use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for table and ingestion operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error taxonomy for the core engine.
///
/// Malformed records are not represented here: a data line whose field count
/// disagrees with the header is dropped and counted, never raised.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The ingestion source does not exist.
    #[error("input file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    /// A table operation referenced a column absent from the schema.
    #[error("column '{column}' not found in table")]
    UnknownColumn { column: String },

    /// `group_by` was asked for an aggregation kind it does not implement.
    #[error("unsupported aggregation '{name}'")]
    UnsupportedAggregation { name: String },

    /// Underlying I/O failure while reading an ingestion source.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
