//! Storage module for file management
//!
//! Provides the object-storage client used for uploads, public URL
//! derivation, removal and folder listings.

mod storage_client;

#[cfg(test)]
mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::Result;

pub use storage_client::StorageClient;

#[cfg(test)]
pub use memory::MemoryObjectStore;

/// Metadata the store assigns to an accepted upload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    /// Full object key including the bucket name
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
}

/// One entry of a folder listing; folders carry no `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageObject {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `data` at `bucket/path`; with `overwrite` false an existing object is a conflict
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> Result<UploadReceipt>;

    /// Derive the public URL of an object without contacting the store
    fn public_url(&self, bucket: &str, path: &str) -> Result<String>;

    /// Remove one object; a missing object is not an error
    async fn remove(&self, bucket: &str, path: &str) -> Result<()>;

    async fn list(&self, bucket: &str, prefix: &str, limit: usize) -> Result<Vec<StorageObject>>;
}

/// Percent-encode each path segment while keeping the `/` separators
pub fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
