use thiserror::Error;

/// Errors produced by sheet operations.
#[derive(Debug, Error)]
pub enum SheetError {
    /// A caller-supplied argument was rejected, e.g. a row or column
    /// index of 0 (addressing is 1-based) or an empty row.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
