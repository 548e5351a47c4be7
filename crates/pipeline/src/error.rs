//! Error types for the suitability pipeline

use thiserror::Error;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error(transparent)]
    Raster(#[from] terraflow_core::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("climate table must contain a '{0}' column")]
    MissingColumn(String),

    #[error("column '{column}' contains a non-numeric value: {value:?}")]
    NonNumericValue { column: String, value: String },

    #[error("no valid raster cells found in the specified ROI")]
    NoValidCells,
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
