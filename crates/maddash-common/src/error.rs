//! Error types for MadDash

use thiserror::Error;

/// Result type alias for MadDash operations
pub type Result<T> = std::result::Result<T, MaddashError>;

/// Main error type for MadDash
#[derive(Error, Debug)]
pub enum MaddashError {
    #[error("Histogram '{name}' has no bins")]
    EmptyHistogram { name: String },

    #[error("Histogram '{name}' has invalid bounds: xmin={xmin}, xmax={xmax}")]
    InvalidBounds { name: String, xmin: f64, xmax: f64 },

    #[error("Histogram '{name}' has an invalid value {value} in bin {index}")]
    InvalidBinValue {
        name: String,
        index: usize,
        value: f64,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
