//! Record types shared across MadDash
//!
//! These mirror the documents held by the remote store: one document per
//! histogram, and one file-list document per collection.

use crate::error::{MaddashError, Result};
use serde::{Deserialize, Serialize};

/// A named, binned distribution with out-of-range counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramRecord {
    /// Histogram name, unique within a collection
    pub name: String,

    /// Lower edge of the first bin
    pub xmin: f64,

    /// Upper edge of the last bin
    pub xmax: f64,

    /// Number of entries >= xmax
    pub overflow: u64,

    /// Number of entries < xmin
    pub underflow: u64,

    /// Number of NaN entries
    pub nan_count: u64,

    /// Bin contents, in bin order
    pub bin_values: Vec<f64>,

    /// Any other fields the producer attached, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HistogramRecord {
    /// Width shared by every bin: `(xmax - xmin) / len(bin_values)`.
    ///
    /// Fails when there are no bins or when the bounds don't give a positive,
    /// finite width.
    pub fn bin_width(&self) -> Result<f64> {
        if self.bin_values.is_empty() {
            return Err(MaddashError::EmptyHistogram {
                name: self.name.clone(),
            });
        }

        let width = (self.xmax - self.xmin) / self.bin_values.len() as f64;
        if !(width.is_finite() && width > 0.0) {
            return Err(MaddashError::InvalidBounds {
                name: self.name.clone(),
                xmin: self.xmin,
                xmax: self.xmax,
            });
        }

        Ok(width)
    }

    /// Check every record invariant: bins present, ordered bounds, and
    /// non-negative bin contents.
    pub fn validate(&self) -> Result<()> {
        self.bin_width()?;

        for (index, &value) in self.bin_values.iter().enumerate() {
            if value.is_nan() || value < 0.0 {
                return Err(MaddashError::InvalidBinValue {
                    name: self.name.clone(),
                    index,
                    value,
                });
            }
        }

        Ok(())
    }

    /// Left edge of each bin
    pub fn x_values(&self) -> Result<Vec<f64>> {
        let width = self.bin_width()?;
        Ok((0..self.bin_values.len())
            .map(|i| self.xmin + i as f64 * width)
            .collect())
    }

    /// Counter annotation shown next to the bars
    pub fn counters_text(&self) -> String {
        format!(
            "nan({}) under({}) over({})",
            self.nan_count, self.underflow, self.overflow
        )
    }
}

/// Ordered list of the files that fed a collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileListRecord(Vec<String>);

impl FileListRecord {
    pub fn new(files: Vec<String>) -> Self {
        Self(files)
    }

    pub fn files(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for FileListRecord {
    fn from(files: Vec<String>) -> Self {
        Self(files)
    }
}
