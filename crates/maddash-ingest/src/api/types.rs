//! API request and response types

use maddash_common::{FileListRecord, HistogramRecord};
use serde::{Deserialize, Serialize};

/// Body of `POST /histogram`
#[derive(Debug, Clone, Serialize)]
pub struct HistogramRequest<'a> {
    pub database: &'a str,
    pub collection: &'a str,
    pub histogram: &'a HistogramRecord,
    pub update: bool,
}

/// Body of `POST /files/names`
#[derive(Debug, Clone, Serialize)]
pub struct FileListRequest<'a> {
    pub database: &'a str,
    pub collection: &'a str,
    pub files: &'a FileListRecord,
    pub update: bool,
}

/// Token service response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Access credential; missing means the request was not authorized
    #[serde(default)]
    pub access: Option<String>,
}
