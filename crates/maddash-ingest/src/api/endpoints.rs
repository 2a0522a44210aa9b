//! API endpoint URL builders

/// Document store path for histogram upserts
pub const HISTOGRAM_PATH: &str = "/histogram";

/// Document store path for file-list upserts
pub const FILELIST_PATH: &str = "/files/names";

/// Scope requested from the token service
pub const TOKEN_SCOPE: &str = "maddash:production";

/// Build token service URL (the scope goes in the query string)
pub fn token_url(base_url: &str) -> String {
    format!("{}/token", base_url.trim_end_matches('/'))
}

/// Build a document store URL for `path`
pub fn dbms_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
