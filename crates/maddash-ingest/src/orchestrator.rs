//! Ingestion orchestrator
//!
//! Runs the whole pipeline for one invocation:
//!
//! ```text
//! resolve paths -> acquire client -> for each snapshot {
//!     load -> publish histograms -> publish file-list (if any)
//! }
//! ```
//!
//! Everything is sequential and every write is awaited before the next one
//! starts. The first error ends the run; records already written stay in the
//! store.

use crate::api::DbmsClient;
use crate::collection::{load_collection, Collection};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::publisher::{publish_filelist, publish_histogram, Target};
use crate::resolver::resolve_paths;
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

/// Counts of what one collection contributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub histograms: usize,
    pub filelist: bool,
}

/// Counts of what a run published
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub collections: usize,
    pub histograms: usize,
    pub filelists: usize,
}

impl IngestSummary {
    fn add(&mut self, collection: CollectionSummary) {
        self.collections += 1;
        self.histograms += collection.histograms;
        self.filelists += usize::from(collection.filelist);
    }
}

/// Publish every record of `collection`: histograms first, in extraction
/// order, then the file-list if there is one.
pub async fn ingest_collection<C: Collection + ?Sized>(
    client: &DbmsClient,
    collection: &mut C,
    target: &Target<'_>,
) -> Result<CollectionSummary> {
    let mut summary = CollectionSummary::default();

    for histogram in collection.histograms() {
        publish_histogram(client, &histogram?, target).await?;
        summary.histograms += 1;
    }

    match collection.filelist() {
        Some(files) => {
            info!(collection = %target.collection, files = files.len(), "Grabbed filelist");
            publish_filelist(client, &files, target).await?;
            summary.filelist = true;
        },
        None => info!(collection = %target.collection, "No files in filelist"),
    }

    Ok(summary)
}

/// Drives one ingestion run
pub struct Ingestor {
    config: IngestConfig,
}

impl Ingestor {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline to completion or to the first error
    pub async fn run(&self) -> Result<IngestSummary> {
        let start_time = Instant::now();
        self.config.validate()?;

        // Resolve before authenticating so bad paths fail without network traffic
        let snapshots = resolve_paths(&self.config.paths, self.config.recurse)?;
        if snapshots.is_empty() {
            warn!("No snapshot files found, nothing to ingest");
            return Ok(IngestSummary::default());
        }
        info!(count = snapshots.len(), "Resolved snapshot files");

        let client = DbmsClient::acquire(&self.config.token_url, &self.config.dbms_url).await?;

        let mut summary = IngestSummary::default();
        for snapshot in &snapshots {
            let mut collection = load_collection(snapshot)?;
            info!(collection = %snapshot.name(), path = %snapshot.path().display(), "Grabbed collection");

            let target = Target {
                database: &self.config.database,
                collection: snapshot.name(),
                update: self.config.update,
            };
            let published = ingest_collection(&client, &mut collection, &target).await?;
            info!(
                collection = %snapshot.name(),
                histograms = published.histograms,
                filelist = published.filelist,
                "Finished collection"
            );
            summary.add(published);
        }

        info!(
            collections = summary.collections,
            histograms = summary.histograms,
            filelists = summary.filelists,
            elapsed_secs = start_time.elapsed().as_secs_f64(),
            "Ingestion complete"
        );

        Ok(summary)
    }
}
