use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::{StoredFileDto, UploadedFileDto};
use crate::features::files::models::{StorageBucket, UploadFile};
use crate::modules::storage::ObjectStore;
use crate::shared::constants::{
    ATTACHMENTS_FOLDER, AVATARS_FOLDER, PORTFOLIO_FOLDER, STORAGE_LIST_LIMIT,
};
use crate::shared::validation::sanitize_file_name;

/// Service for validated uploads into the storage buckets
pub struct FileService {
    storage: Arc<dyn ObjectStore>,
}

impl FileService {
    pub fn new(storage: Arc<dyn ObjectStore>) -> Self {
        Self { storage }
    }

    /// Check a file against the bucket's size and type policy
    ///
    /// Size is checked first, so an oversized file of a disallowed type
    /// reports `FileTooLarge`.
    pub fn validate(file: &UploadFile, bucket: StorageBucket) -> Result<()> {
        let policy = bucket.policy();

        if file.size() > policy.max_size {
            return Err(AppError::FileTooLarge {
                max_bytes: policy.max_size,
            });
        }

        if !policy.allows(&file.content_type) {
            return Err(AppError::UnsupportedFileType {
                content_type: file.content_type.clone(),
                bucket: bucket.name().to_string(),
            });
        }

        Ok(())
    }

    /// Build `{folder}/{owner_id}/{epoch_millis}_{sanitized_name}` for the current time
    pub fn generate_path(owner_id: &str, file_name: &str, folder: Option<&str>) -> String {
        Self::generate_path_at(owner_id, file_name, folder, Utc::now().timestamp_millis())
    }

    pub fn generate_path_at(
        owner_id: &str,
        file_name: &str,
        folder: Option<&str>,
        epoch_millis: i64,
    ) -> String {
        let clean_name = sanitize_file_name(file_name);
        let base = match folder.filter(|f| !f.is_empty()) {
            Some(folder) => format!("{}/{}", folder, owner_id),
            None => owner_id.to_string(),
        };
        format!("{}/{}_{}", base, epoch_millis, clean_name)
    }

    /// Validate and upload a file to an explicit path
    pub async fn upload(
        &self,
        bucket: StorageBucket,
        path: &str,
        file: UploadFile,
        overwrite: bool,
    ) -> Result<UploadedFileDto> {
        Self::validate(&file, bucket).inspect_err(|e| {
            warn!(
                operation = "upload",
                bucket = bucket.name(),
                "Rejected file '{}': {}",
                file.file_name,
                e
            );
        })?;

        self.transfer(bucket, path, file, overwrite).await
    }

    /// Validate, derive a path under `folder/owner_id`, and upload
    pub async fn upload_for_owner(
        &self,
        bucket: StorageBucket,
        owner_id: &str,
        folder: Option<&str>,
        file: UploadFile,
        overwrite: bool,
    ) -> Result<UploadedFileDto> {
        if owner_id.trim().is_empty() {
            return Err(AppError::Validation("owner_id is required".to_string()));
        }

        let path = Self::generate_path(owner_id, &file.file_name, folder);
        self.upload(bucket, &path, file, overwrite).await
    }

    /// Replace the owner's avatar (one avatar per user)
    pub async fn upload_profile_image(
        &self,
        owner_id: &str,
        file: UploadFile,
    ) -> Result<UploadedFileDto> {
        self.upload_for_owner(
            StorageBucket::ProfileImages,
            owner_id,
            Some(AVATARS_FOLDER),
            file,
            true,
        )
        .await
    }

    pub async fn upload_portfolio_file(
        &self,
        owner_id: &str,
        file: UploadFile,
    ) -> Result<UploadedFileDto> {
        self.upload_for_owner(
            StorageBucket::PortfolioFiles,
            owner_id,
            Some(PORTFOLIO_FOLDER),
            file,
            false,
        )
        .await
    }

    pub async fn upload_chat_attachment(
        &self,
        owner_id: &str,
        file: UploadFile,
    ) -> Result<UploadedFileDto> {
        self.upload_for_owner(
            StorageBucket::ChatAttachments,
            owner_id,
            Some(ATTACHMENTS_FOLDER),
            file,
            false,
        )
        .await
    }

    pub fn get_public_url(&self, bucket: StorageBucket, path: &str) -> Result<String> {
        self.storage.public_url(bucket.name(), path)
    }

    /// Remove one object; removing a missing object succeeds
    pub async fn remove(&self, bucket: StorageBucket, path: &str) -> Result<()> {
        self.storage.remove(bucket.name(), path).await?;
        info!("File removed: bucket={}, path={}", bucket, path);
        Ok(())
    }

    /// List up to 100 entries under `folder` (no further pages)
    pub async fn list(
        &self,
        bucket: StorageBucket,
        folder: Option<&str>,
    ) -> Result<Vec<StoredFileDto>> {
        let entries = self
            .storage
            .list(bucket.name(), folder.unwrap_or(""), STORAGE_LIST_LIMIT)
            .await?;

        Ok(entries.into_iter().map(StoredFileDto::from).collect())
    }

    /// Transfer an already validated file
    async fn transfer(
        &self,
        bucket: StorageBucket,
        path: &str,
        file: UploadFile,
        overwrite: bool,
    ) -> Result<UploadedFileDto> {
        let size = file.size();
        let UploadFile { content_type, data, .. } = file;

        let receipt = self
            .storage
            .upload(bucket.name(), path, data, &content_type, overwrite)
            .await?;

        let public_url = self.storage.public_url(bucket.name(), path)?;

        info!(
            "File stored: bucket={}, path={}, key={}, size={}",
            bucket, path, receipt.key, size
        );

        Ok(UploadedFileDto {
            bucket,
            path: path.to_string(),
            key: receipt.key,
            id: receipt.id,
            public_url,
            content_type,
            size,
        })
    }
}
