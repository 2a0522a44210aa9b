//! Publishing records to the document store
//!
//! One POST per record. The store decides what `update` means for a record
//! that already exists: `true` overwrites it, `false` leaves it untouched.

use crate::api::{endpoints, DbmsClient, FileListRequest, HistogramRequest};
use crate::error::Result;
use maddash_common::{FileListRecord, HistogramRecord};
use tracing::{debug, info};

/// Where a record lands in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'a> {
    pub database: &'a str,
    pub collection: &'a str,
    pub update: bool,
}

/// POST one histogram to its collection
pub async fn publish_histogram(
    client: &DbmsClient,
    histogram: &HistogramRecord,
    target: &Target<'_>,
) -> Result<serde_json::Value> {
    let request = HistogramRequest {
        database: target.database,
        collection: target.collection,
        histogram,
        update: target.update,
    };

    let ack = client.post(endpoints::HISTOGRAM_PATH, &request).await?;
    info!(
        histogram = %histogram.name,
        collection = %target.collection,
        database = %target.database,
        "POSTed histogram"
    );
    debug!(response = %ack, "POST response");

    Ok(ack)
}

/// POST a collection's file-list
pub async fn publish_filelist(
    client: &DbmsClient,
    files: &FileListRecord,
    target: &Target<'_>,
) -> Result<serde_json::Value> {
    let request = FileListRequest {
        database: target.database,
        collection: target.collection,
        files,
        update: target.update,
    };

    let ack = client.post(endpoints::FILELIST_PATH, &request).await?;
    info!(
        files = files.len(),
        collection = %target.collection,
        database = %target.database,
        "POSTed filelist"
    );
    debug!(response = %ack, "POST response");

    Ok(ack)
}
