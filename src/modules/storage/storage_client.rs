//! Object storage client for the hosted backend's storage API
//!
//! Buckets are addressed by name; object paths are percent-encoded per
//! segment before they reach a URL.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::json;
use tracing::{debug, error, info};

use crate::core::error::Result;
use crate::modules::storage::{encode_object_path, ObjectStore, StorageObject, UploadReceipt};
use crate::modules::supabase::{error_from_response, transport_error, SupabaseConnection};

/// Cache lifetime the store attaches to uploaded objects
const CACHE_CONTROL_SECS: &str = "3600";

pub struct StorageClient {
    connection: Arc<SupabaseConnection>,
}

impl StorageClient {
    pub fn new(connection: Arc<SupabaseConnection>) -> Self {
        Self { connection }
    }

    async fn send_upload(
        &self,
        bucket: &str,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> Result<UploadReceipt> {
        let endpoint = format!("/storage/v1/object/{}/{}", bucket, encode_object_path(path));

        let response = self
            .connection
            .request(Method::POST, &endpoint)?
            .header("Content-Type", content_type)
            .header("cache-control", format!("max-age={}", CACHE_CONTROL_SECS))
            .header("x-upsert", overwrite.to_string())
            .body(data)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        response
            .json::<UploadReceipt>()
            .await
            .map_err(transport_error)
    }

    async fn send_remove(&self, bucket: &str, path: &str) -> Result<()> {
        let response = self
            .connection
            .request(Method::DELETE, &format!("/storage/v1/object/{}", bucket))?
            .json(&json!({ "prefixes": [path] }))
            .send()
            .await
            .map_err(transport_error)?;

        // Removing an absent object answers 200 with an empty list, older
        // deployments answer 404; both mean the object is gone
        if response.status() == StatusCode::NOT_FOUND {
            debug!("Object '{}' in bucket '{}' already absent", path, bucket);
            return Ok(());
        }

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(())
    }

    async fn send_list(
        &self,
        bucket: &str,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<StorageObject>> {
        let body = json!({
            "prefix": prefix,
            "limit": limit,
            "offset": 0,
            "sortBy": { "column": "name", "order": "asc" },
        });

        let response = self
            .connection
            .request(Method::POST, &format!("/storage/v1/object/list/{}", bucket))?
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        response
            .json::<Vec<StorageObject>>()
            .await
            .map_err(transport_error)
    }
}

#[async_trait]
impl ObjectStore for StorageClient {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> Result<UploadReceipt> {
        let size = data.len();

        let receipt = self
            .send_upload(bucket, path, data, content_type, overwrite)
            .await
            .inspect_err(|e| {
                error!(
                    operation = "upload",
                    bucket = bucket,
                    "Error uploading file '{}': {}",
                    path,
                    e
                );
            })?;

        info!(
            "Uploaded file '{}' to bucket '{}' (size={}, overwrite={})",
            path, bucket, size, overwrite
        );
        Ok(receipt)
    }

    fn public_url(&self, bucket: &str, path: &str) -> Result<String> {
        let base_url = self.connection.base_url()?;
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            base_url,
            bucket,
            encode_object_path(path)
        ))
    }

    async fn remove(&self, bucket: &str, path: &str) -> Result<()> {
        self.send_remove(bucket, path).await.inspect_err(|e| {
            error!(
                operation = "remove",
                bucket = bucket,
                "Error deleting file '{}': {}",
                path,
                e
            );
        })?;

        debug!("Deleted file '{}' from bucket '{}'", path, bucket);
        Ok(())
    }

    async fn list(&self, bucket: &str, prefix: &str, limit: usize) -> Result<Vec<StorageObject>> {
        self.send_list(bucket, prefix, limit).await.inspect_err(|e| {
            error!(
                operation = "list",
                bucket = bucket,
                "Error listing files under '{}': {}",
                prefix,
                e
            );
        })
    }
}
