//! ignux-core - Core library for the IGNUX client
//!
//! Typed models and HTTP client for the IGNUX events backend, plus the content
//! synchronizer that keeps managed collections (portfolio, blog, ...) available
//! through a remote -> primary cache -> fallback cache chain.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod sync;
pub mod util;

#[cfg(test)]
mod test_support;

pub use api::ApiClient;
pub use config::{ClientConfig, SyncOptions};
pub use error::{Error, Result};
pub use models::{ContentId, ContentItem, ContentType, Fields};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use sync::{ContentRemote, ContentSynchronizer, SyncSnapshot};
