//! MadDash Common Library
//!
//! Shared types, utilities, and error handling for the MadDash workspace.
//!
//! # Overview
//!
//! - **Types**: histogram and file-list records as they travel between the
//!   production snapshots, the document store, and the dashboard
//! - **Chart**: conversion of histogram records into bar-chart descriptions
//! - **Logging**: `tracing` subscriber setup shared by every binary
//! - **Error Handling**: common error and result types
//!
//! # Example
//!
//! ```no_run
//! use maddash_common::{HistogramRecord, Result};
//!
//! fn describe(histogram: &HistogramRecord) -> Result<()> {
//!     histogram.validate()?;
//!     println!("{}: width {}", histogram.name, histogram.bin_width()?);
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod chart;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{MaddashError, Result};
pub use types::{FileListRecord, HistogramRecord};
