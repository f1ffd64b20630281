//! In-memory [`ObjectStore`] for service and handler tests

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::modules::storage::{encode_object_path, ObjectStore, StorageObject, UploadReceipt};

const BASE_URL: &str = "http://localhost:54321";

struct StoredBlob {
    id: String,
    content_type: String,
    data: Vec<u8>,
}

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<BTreeMap<(String, String), StoredBlob>>,
    uploads: AtomicUsize,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn contains(&self, bucket: &str, path: &str) -> bool {
        self.objects
            .lock()
            .unwrap()
            .contains_key(&(bucket.to_string(), path.to_string()))
    }

    pub fn content(&self, bucket: &str, path: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), path.to_string()))
            .map(|blob| blob.data.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> Result<UploadReceipt> {
        let mut objects = self.objects.lock().unwrap();
        let key = (bucket.to_string(), path.to_string());

        if !overwrite && objects.contains_key(&key) {
            return Err(AppError::Conflict(
                "HTTP 409 - The resource already exists".to_string(),
            ));
        }

        let id = Uuid::new_v4().to_string();
        objects.insert(
            key,
            StoredBlob {
                id: id.clone(),
                content_type: content_type.to_string(),
                data,
            },
        );
        self.uploads.fetch_add(1, Ordering::SeqCst);

        Ok(UploadReceipt {
            key: format!("{}/{}", bucket, path),
            id: Some(id),
        })
    }

    fn public_url(&self, bucket: &str, path: &str) -> Result<String> {
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            BASE_URL,
            bucket,
            encode_object_path(path)
        ))
    }

    async fn remove(&self, bucket: &str, path: &str) -> Result<()> {
        self.objects
            .lock()
            .unwrap()
            .remove(&(bucket.to_string(), path.to_string()));
        Ok(())
    }

    /// Direct children of `prefix`: files carry an id, folders do not
    async fn list(&self, bucket: &str, prefix: &str, limit: usize) -> Result<Vec<StorageObject>> {
        let objects = self.objects.lock().unwrap();
        let prefix = prefix.trim_matches('/');

        let mut folders = BTreeSet::new();
        let mut entries = Vec::new();

        for ((object_bucket, path), blob) in objects.iter() {
            if object_bucket != bucket {
                continue;
            }

            let relative = if prefix.is_empty() {
                path.as_str()
            } else {
                match path.strip_prefix(prefix).and_then(|p| p.strip_prefix('/')) {
                    Some(rest) => rest,
                    None => continue,
                }
            };

            match relative.split_once('/') {
                Some((folder, _)) => {
                    folders.insert(folder.to_string());
                }
                None => entries.push(StorageObject {
                    name: relative.to_string(),
                    id: Some(blob.id.clone()),
                    created_at: Some(Utc::now()),
                    updated_at: Some(Utc::now()),
                    metadata: Some(json!({
                        "size": blob.data.len(),
                        "mimetype": blob.content_type,
                    })),
                }),
            }
        }

        let mut listing: Vec<StorageObject> = folders
            .into_iter()
            .map(|name| StorageObject {
                name,
                id: None,
                created_at: None,
                updated_at: None,
                metadata: None,
            })
            .chain(entries)
            .collect();
        listing.sort_by(|a, b| a.name.cmp(&b.name));
        listing.truncate(limit);

        Ok(listing)
    }
}
