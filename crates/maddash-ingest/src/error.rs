//! Error types for MadDash ingestion
//!
//! Every variant is fatal for the run: nothing in the pipeline retries or
//! skips. Messages are written for the operator who re-invokes the tool.

use maddash_common::MaddashError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    /// A directory was given without opting into recursion
    #[error("'{0}' is a directory. Run with -r to recursively find pickles.")]
    DirectoryWithoutRecurse(PathBuf),

    /// A snapshot path has no usable collection name
    #[error("Cannot derive a collection name from '{0}'. Snapshot files must be named '<collection>.pkl'.")]
    InvalidSnapshotName(PathBuf),

    /// The snapshot bytes could not be decoded
    #[error("Failed to unpickle '{path}': {source}. The file may be corrupt or not a histogram snapshot.")]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_pickle::Error,
    },

    /// The snapshot decoded, but not into a collection
    #[error("Unexpected snapshot layout in '{path}': {reason}")]
    SnapshotLayout { path: PathBuf, reason: String },

    /// A histogram entry could not be decoded into a record
    #[error("Histogram '{key}' in collection '{collection}' could not be decoded: {source}")]
    HistogramDecode {
        collection: String,
        key: String,
        #[source]
        source: serde_pickle::Error,
    },

    /// A histogram violates the record invariants
    #[error("Invalid histogram in collection '{collection}': {source}")]
    InvalidHistogram {
        collection: String,
        #[source]
        source: MaddashError,
    },

    /// Credential acquisition failed
    #[error("Token service error: {0}. Check --token-url and that the token service is running.")]
    Auth(String),

    /// The document store answered with a non-success status
    #[error("Server rejected POST {endpoint} with status {status}: {body}")]
    Publish {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Run configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions.")]
    Io(#[from] std::io::Error),

    /// Directory listing failed
    #[error("Failed to list directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// HTTP request failed
    #[error("Network request failed: {0}. Check the service URLs and your connection.")]
    Http(#[from] reqwest::Error),
}

impl IngestError {
    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a snapshot layout error
    pub fn snapshot_layout(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SnapshotLayout {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error was raised before any network traffic could happen
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DirectoryWithoutRecurse(_) | Self::InvalidSnapshotName(_) | Self::Config(_)
        )
    }
}
