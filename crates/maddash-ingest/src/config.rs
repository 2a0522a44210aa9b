//! Run configuration for ingestion
//!
//! One value carries every run parameter into the orchestrator. The binary
//! fills it from the command line (each option can also come from a
//! `MADDASH_*` environment variable); library users build it directly.

use crate::error::{IngestError, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

// ============================================================================
// Configuration Defaults
// ============================================================================

/// Database that receives histograms unless `--database` says otherwise
pub const DEFAULT_DATABASE: &str = "simprod_histos";

/// Default document store REST facade
pub const DEFAULT_DBMS_URL: &str = "http://localhost:8080";

/// Default token service
pub const DEFAULT_TOKEN_URL: &str = "http://localhost:8888";

/// Ingestion run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestConfig {
    /// Files and directories to search for snapshots
    pub paths: Vec<PathBuf>,

    /// Descend into directories
    pub recurse: bool,

    /// Target database name
    pub database: String,

    /// Overwrite existing records instead of leaving them untouched
    pub update: bool,

    /// Document store REST facade
    pub dbms_url: String,

    /// Token service
    pub token_url: String,
}

impl IngestConfig {
    /// Configuration for `paths` with every other field at its default
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            recurse: false,
            database: DEFAULT_DATABASE.to_string(),
            update: false,
            dbms_url: DEFAULT_DBMS_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }

    pub fn with_recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    pub fn with_dbms_url(mut self, url: impl Into<String>) -> Self {
        self.dbms_url = url.into();
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Reject configurations that can't possibly succeed
    pub fn validate(&self) -> Result<()> {
        if self.paths.is_empty() {
            return Err(IngestError::config("at least one path is required"));
        }

        if self.database.trim().is_empty() {
            return Err(IngestError::config("database name must not be empty"));
        }

        for (flag, url) in [("--dbms-url", &self.dbms_url), ("--token-url", &self.token_url)] {
            reqwest::Url::parse(url).map_err(|e| {
                IngestError::config(format!("{} '{}' is not a valid URL ({})", flag, url, e))
            })?;
        }

        Ok(())
    }

    /// Record the effective configuration at the start of a run
    pub fn log_fields(&self) {
        let paths: Vec<String> = self.paths.iter().map(|p| p.display().to_string()).collect();
        info!(paths = ?paths, "paths");
        info!(recurse = self.recurse, "recurse");
        info!(database = %self.database, "database");
        info!(update = self.update, "update");
        info!(dbms_url = %self.dbms_url, "dbms_url");
        info!(token_url = %self.token_url, "token_url");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = IngestConfig::new(vec![PathBuf::from("/data/run1.pkl")]);
        assert_eq!(config.database, DEFAULT_DATABASE);
        assert_eq!(config.dbms_url, DEFAULT_DBMS_URL);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert!(!config.recurse);
        assert!(!config.update);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_setters() {
        let config = IngestConfig::new(vec![PathBuf::from("/data")])
            .with_recurse(true)
            .with_update(true)
            .with_database("scratch")
            .with_dbms_url("https://dbms.example.com")
            .with_token_url("https://tokens.example.com");

        assert!(config.recurse);
        assert!(config.update);
        assert_eq!(config.database, "scratch");
        assert_eq!(config.dbms_url, "https://dbms.example.com");
        assert_eq!(config.token_url, "https://tokens.example.com");
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let err = IngestConfig::new(vec![]).validate().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = IngestConfig::new(vec![PathBuf::from("/data")]).with_dbms_url("not a url");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("--dbms-url"));
    }

    #[test]
    fn test_validate_rejects_blank_database() {
        let config = IngestConfig::new(vec![PathBuf::from("/data")]).with_database("  ");
        assert!(config.validate().is_err());
    }
}
