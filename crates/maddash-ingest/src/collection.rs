//! Loading collections and extracting their records
//!
//! A production snapshot is a pickled dictionary. Entries whose value is a
//! dictionary with `bin_values` are histograms; the `filelist` entry, when
//! present, lists the files the histograms were filled from. Everything else
//! is ignored.
//!
//! Histograms come out in the order the dictionary was pickled, which is the
//! insertion order of the producing Python dict.

use crate::error::{IngestError, Result};
use crate::resolver::SnapshotFile;
use maddash_common::{FileListRecord, HistogramRecord};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_pickle::{DeOptions, HashableValue, Value};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Key holding a collection's file-list
pub const FILELIST_KEY: &str = "filelist";

/// Key that marks a dictionary entry as a histogram
const HISTOGRAM_MARKER: &str = "bin_values";

/// A loaded collection, seen only through its two record kinds.
pub trait Collection {
    /// Histograms in storage order.
    ///
    /// Single pass: once drained, later calls yield nothing. Load the
    /// snapshot again to walk the histograms a second time.
    fn histograms(&mut self) -> Box<dyn Iterator<Item = Result<HistogramRecord>> + '_>;

    /// The collection's file-list; `None` when absent or empty
    fn filelist(&self) -> Option<FileListRecord>;
}

/// Top-level dictionary entries, kept in pickle stream order
#[derive(Debug, Default)]
pub struct SnapshotEntries(Vec<(HashableValue, Value)>);

impl<'de> Deserialize<'de> for SnapshotEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SnapshotEntries;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a dictionary")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> std::result::Result<Self::Value, M::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(SnapshotEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Whatever a snapshot file unpickled into
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum RawSnapshot {
    Dict(SnapshotEntries),
    Other(Value),
}

/// Collection decoded from a `.pkl` snapshot
#[derive(Debug)]
pub struct PickleCollection {
    name: String,
    histograms: Vec<(String, Value)>,
    filelist: Option<FileListRecord>,
}

impl PickleCollection {
    /// Build a collection from top-level snapshot entries, keeping their order
    pub fn from_entries(name: impl Into<String>, path: &Path, entries: SnapshotEntries) -> Result<Self> {
        let mut histograms = Vec::new();
        let mut filelist = None;

        for (key, value) in entries.0 {
            let Some(key) = key_string(key) else {
                debug!(path = %path.display(), "Skipping entry with a non-string key");
                continue;
            };

            if key == FILELIST_KEY {
                let files: Vec<String> = serde_pickle::from_value(value).map_err(|e| {
                    IngestError::snapshot_layout(path, format!("'{}' is not a list of paths ({})", FILELIST_KEY, e))
                })?;
                filelist = Some(FileListRecord::new(files)).filter(|f| !f.is_empty());
            } else if is_histogram(&value) {
                histograms.push((key, value));
            } else {
                debug!(path = %path.display(), key = %key, "Skipping entry that is not a histogram");
            }
        }

        Ok(Self {
            name: name.into(),
            histograms,
            filelist,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Collection for PickleCollection {
    fn histograms(&mut self) -> Box<dyn Iterator<Item = Result<HistogramRecord>> + '_> {
        let collection = self.name.as_str();
        Box::new(
            std::mem::take(&mut self.histograms)
                .into_iter()
                .map(move |(key, value)| decode_histogram(collection, key, value)),
        )
    }

    fn filelist(&self) -> Option<FileListRecord> {
        self.filelist.clone()
    }
}

/// Unpickle `snapshot` into a collection named after the file
pub fn load_collection(snapshot: &SnapshotFile) -> Result<PickleCollection> {
    let bytes = std::fs::read(snapshot.path())?;
    let raw: RawSnapshot = serde_pickle::from_slice(&bytes, DeOptions::new().decode_strings()).map_err(
        |source| IngestError::Deserialize {
            path: snapshot.path().to_path_buf(),
            source,
        },
    )?;
    debug!(path = %snapshot.path().display(), "Unpickled collection");

    match raw {
        RawSnapshot::Dict(entries) => PickleCollection::from_entries(snapshot.name(), snapshot.path(), entries),
        RawSnapshot::Other(value) => Err(IngestError::snapshot_layout(
            snapshot.path(),
            format!("top-level object is a {}, not a dictionary", kind_of(&value)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::None => "None",
        Value::Bool(_) => "bool",
        Value::I64(_) | Value::Int(_) => "int",
        Value::F64(_) => "float",
        Value::Bytes(_) => "bytes",
        Value::String(_) => "string",
        Value::List(_) => "list",
        Value::Tuple(_) => "tuple",
        Value::Set(_) | Value::FrozenSet(_) => "set",
        Value::Dict(_) => "dict",
    }
}

fn key_string(key: HashableValue) -> Option<String> {
    match key {
        HashableValue::String(s) => Some(s),
        HashableValue::Bytes(b) => String::from_utf8(b).ok(),
        _ => None,
    }
}

fn is_histogram(value: &Value) -> bool {
    match value {
        Value::Dict(fields) => fields.contains_key(&HashableValue::String(HISTOGRAM_MARKER.to_string())),
        _ => false,
    }
}

fn decode_histogram(collection: &str, key: String, value: Value) -> Result<HistogramRecord> {
    // Histograms pickled without a name take the name of their entry
    let value = match value {
        Value::Dict(mut fields) => {
            fields
                .entry(HashableValue::String("name".to_string()))
                .or_insert_with(|| Value::String(key.clone()));
            Value::Dict(fields)
        },
        other => other,
    };

    let histogram: HistogramRecord =
        serde_pickle::from_value(value).map_err(|source| IngestError::HistogramDecode {
            collection: collection.to_string(),
            key,
            source,
        })?;

    histogram
        .validate()
        .map_err(|source| IngestError::InvalidHistogram {
            collection: collection.to_string(),
            source,
        })?;

    debug!(collection = %collection, histogram = %histogram.name, "Grabbed histogram");
    Ok(histogram)
}
