//! MadDash Ingest Library
//!
//! Publishes production histogram snapshots to the MadDash document store.
//!
//! # Pipeline
//!
//! - **Resolve**: expand the command-line paths into `.pkl` snapshot files
//!   ([`resolver`])
//! - **Load**: decode each snapshot into a [`collection::Collection`]
//! - **Extract**: walk its histograms and its optional file-list
//! - **Publish**: POST each record to the REST facade ([`publisher`]) through
//!   an authenticated [`api::DbmsClient`]
//!
//! [`orchestrator::Ingestor`] runs these steps one collection at a time,
//! awaiting every write before the next, so the store sees a fixed sequence
//! of writes for a given set of inputs.
//!
//! # Example
//!
//! ```no_run
//! use maddash_ingest::{config::IngestConfig, orchestrator::Ingestor};
//!
//! #[tokio::main]
//! async fn main() -> maddash_ingest::Result<()> {
//!     let config = IngestConfig::new(vec!["/data/histos".into()]).with_recurse(true);
//!     let summary = Ingestor::new(config).run().await?;
//!     println!("{} histograms published", summary.histograms);
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod api;
pub mod collection;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod publisher;
pub mod resolver;

// Re-export commonly used types
pub use error::{IngestError, Result};

use clap::Parser;
use config::{IngestConfig, DEFAULT_DATABASE, DEFAULT_DBMS_URL, DEFAULT_TOKEN_URL};
use maddash_common::logging::LogLevel;
use std::path::PathBuf;

/// Ingest histograms from production histogram pickle(s) into the MadDash database
#[derive(Parser, Debug)]
#[command(name = "maddash-ingest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path(s) to grab pickles from; each filename is used as a collection name
    #[arg(value_name = "PATHS", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Recursively search directories for pickle files
    #[arg(short = 'r')]
    pub recurse_paths: bool,

    /// Name of the database to ingest histograms into
    #[arg(long, env = "MADDASH_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Overwrite histograms that already exist in the database
    #[arg(short, long)]
    pub update: bool,

    /// URL of the database REST service
    #[arg(long, env = "MADDASH_DBMS_URL", default_value = DEFAULT_DBMS_URL)]
    pub dbms_url: String,

    /// URL of the token service
    #[arg(long, env = "MADDASH_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
    pub token_url: String,

    /// Output logging level
    #[arg(short, long, default_value = "debug")]
    pub log: LogLevel,
}

impl Cli {
    /// Split off the run configuration; logging is handled by the binary
    pub fn into_config(self) -> IngestConfig {
        IngestConfig::new(self.paths)
            .with_recurse(self.recurse_paths)
            .with_database(self.database)
            .with_update(self.update)
            .with_dbms_url(self.dbms_url)
            .with_token_url(self.token_url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["maddash-ingest", "/data/col1.pkl"]).unwrap();
        assert_eq!(cli.log, LogLevel::Debug);

        let config = cli.into_config();
        assert_eq!(config.paths, vec![PathBuf::from("/data/col1.pkl")]);
        assert!(!config.recurse);
        assert!(!config.update);
        assert_eq!(config.database, DEFAULT_DATABASE);
        assert_eq!(config.dbms_url, DEFAULT_DBMS_URL);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "maddash-ingest",
            "-r",
            "-u",
            "--database",
            "test_histos",
            "--dbms-url",
            "http://dbms:8080",
            "--token-url",
            "http://auth:8888",
            "-l",
            "WARNING",
            "/data",
            "/more/data",
        ])
        .unwrap();
        assert_eq!(cli.log, LogLevel::Warn);

        let config = cli.into_config();
        assert!(config.recurse);
        assert!(config.update);
        assert_eq!(config.paths.len(), 2);
        assert_eq!(config.database, "test_histos");
        assert_eq!(config.dbms_url, "http://dbms:8080");
        assert_eq!(config.token_url, "http://auth:8888");
    }

    #[test]
    fn test_cli_requires_paths() {
        assert!(Cli::try_parse_from(["maddash-ingest"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["maddash-ingest", "-l", "chatty", "/data"]).is_err());
    }
}
