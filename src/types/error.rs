//! Error types for the record catalog.

use thiserror::Error;

/// All errors that can occur in the record catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Record not found by ID.
    #[error("Record ID {0} not found")]
    RecordNotFound(u64),

    /// No record carries the given title.
    #[error("No record titled {0:?}")]
    TitleNotFound(String),

    /// A fixed-capacity structure refused an insert.
    #[error("Capacity exceeded: structure holds at most {capacity} entries")]
    CapacityExceeded { capacity: usize },

    /// Input that cannot be used for the requested operation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An internal structure broke one of its own invariants.
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed record file or config.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
