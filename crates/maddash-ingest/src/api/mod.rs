//! API client module
//!
//! HTTP clients for the token service and the document store REST facade.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::DbmsClient;
pub use types::*;
