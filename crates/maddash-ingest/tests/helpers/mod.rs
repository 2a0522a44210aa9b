//! Test helpers for MadDash ingest integration tests
//!
//! Builds pickled collections on disk. Entries are written in the order
//! they are added, the way a Python dict pickles.

#![allow(dead_code)]

use maddash_common::HistogramRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::{Path, PathBuf};

/// Pickled by CPython with protocol 4: histograms `zeta`, `alpha`, `mid` in
/// that order, a two-file list, and one non-histogram entry
pub const PYTHON_COLLECTION: &[u8] = include_bytes!("../fixtures/python_collection.pkl");

/// Histogram with fixed bounds and counters
pub fn histogram(name: &str) -> HistogramRecord {
    HistogramRecord {
        name: name.to_string(),
        xmin: -5.0,
        xmax: 5.0,
        overflow: 1,
        underflow: 2,
        nan_count: 3,
        bin_values: vec![0.0, 4.0, 9.0, 4.0, 0.0],
        extra: Default::default(),
    }
}

enum Entry {
    Histogram(HistogramRecord),
    FileList(Vec<String>),
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Entry::Histogram(h) => h.serialize(serializer),
            Entry::FileList(files) => files.serialize(serializer),
        }
    }
}

/// Builder for a snapshot file
#[derive(Default)]
pub struct SnapshotFixture {
    entries: Vec<(String, Entry)>,
}

impl SnapshotFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a histogram entry keyed by its name
    pub fn with_histogram(mut self, histogram: HistogramRecord) -> Self {
        self.entries.push((histogram.name.clone(), Entry::Histogram(histogram)));
        self
    }

    /// Add one histogram per name
    pub fn with_histograms(self, names: &[&str]) -> Self {
        names.iter().fold(self, |fixture, name| fixture.with_histogram(histogram(name)))
    }

    /// Add the `filelist` entry
    pub fn with_filelist(mut self, files: &[String]) -> Self {
        self.entries.push(("filelist".to_string(), Entry::FileList(files.to_vec())));
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serde_pickle::to_vec(self, serde_pickle::SerOptions::new()).unwrap()
    }

    /// Write the snapshot to `dir/file` and return its path
    pub fn write(&self, dir: &Path, file: &str) -> PathBuf {
        let path = dir.join(file);
        std::fs::write(&path, self.to_bytes()).unwrap();
        path
    }
}

impl Serialize for SnapshotFixture {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

/// Write the CPython-made collection to `dir/file`
pub fn write_python_collection(dir: &Path, file: &str) -> PathBuf {
    let path = dir.join(file);
    std::fs::write(&path, PYTHON_COLLECTION).unwrap();
    path
}
