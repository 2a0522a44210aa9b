//! Snapshot file discovery
//!
//! Expands the paths given on the command line into the `.pkl` snapshot
//! files to ingest. Directories are only entered with `recurse`; each one is
//! listed a single level deep and its entries go back on the worklist, so
//! nested trees of any depth are handled without recursion.

use crate::error::{IngestError, Result};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Filename suffix of a pickled collection
pub const SNAPSHOT_EXTENSION: &str = ".pkl";

/// A file believed to hold one pickled collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    path: PathBuf,
    name: String,
}

impl SnapshotFile {
    /// Wrap `path`, deriving the collection name from its filename
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let name = collection_name(&path).ok_or_else(|| IngestError::InvalidSnapshotName(path.clone()))?;
        Ok(Self { path, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Logical collection name: the filename without `.pkl`
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Collection name for a snapshot path, e.g. `/a/b/run42.pkl` -> `run42`.
///
/// Returns `None` when the filename doesn't end in `.pkl` or nothing is left
/// once the suffix is stripped.
pub fn collection_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let stem = file_name.strip_suffix(SNAPSHOT_EXTENSION)?;
    (!stem.is_empty()).then(|| stem.to_string())
}

/// Expand `paths` into snapshot files.
///
/// - files are kept only if they are named like a snapshot
/// - directories are an error unless `recurse` is set
/// - anything else (missing paths, sockets, ...) is logged and skipped
///
/// Entries of a directory are sorted by name and appended after the paths
/// still waiting to be resolved. Duplicates are kept.
pub fn resolve_paths<P: AsRef<Path>>(paths: &[P], recurse: bool) -> Result<Vec<SnapshotFile>> {
    let mut pending: VecDeque<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
    let mut snapshots = Vec::new();

    while let Some(path) = pending.pop_front() {
        if path.is_dir() {
            if !recurse {
                return Err(IngestError::DirectoryWithoutRecurse(path));
            }

            debug!(path = %path.display(), "Path is a directory, listing its entries");
            let entries = WalkDir::new(&path)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name();
            for entry in entries {
                pending.push_back(entry?.into_path());
            }
        } else if path.is_file() {
            match SnapshotFile::new(&path) {
                Ok(snapshot) => {
                    debug!(path = %path.display(), collection = %snapshot.name(), "Found snapshot file");
                    snapshots.push(snapshot);
                },
                Err(_) => debug!(path = %path.display(), "Not a snapshot file, skipping"),
            }
        } else {
            debug!(path = %path.display(), "Path is not a file nor directory, skipping");
        }
    }

    Ok(snapshots)
}
