use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::files::models::StorageBucket;
use crate::modules::storage::StorageObject;

/// Upload form for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handlers use axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// The file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Owner id used as a path segment (required for `/api/files/{bucket}`)
    #[schema(example = "3f2b8c1e-7a55-4c1d-9d0e-2f6a1b9c4e11")]
    pub owner_id: Option<String>,
    /// Optional folder placed before the owner id
    #[schema(example = "documents")]
    pub folder: Option<String>,
    /// Replace an existing object at the same path ("true"/"false", default false)
    pub overwrite: Option<bool>,
}

/// Response DTO for an accepted upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileDto {
    pub bucket: StorageBucket,
    /// Object path inside the bucket
    pub path: String,
    /// Store-assigned key (bucket-qualified)
    pub key: String,
    /// Store-assigned object id, when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub public_url: String,
    pub content_type: String,
    pub size: u64,
}

/// One entry of a folder listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredFileDto {
    pub name: String,
    /// Absent for folders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub is_folder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
}

impl From<StorageObject> for StoredFileDto {
    fn from(object: StorageObject) -> Self {
        Self {
            is_folder: object.id.is_none(),
            name: object.name,
            id: object.id,
            created_at: object.created_at,
            updated_at: object.updated_at,
            metadata: object.metadata,
        }
    }
}

/// Query params for listing a bucket folder
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListFilesQuery {
    /// Folder to list; the bucket root when omitted
    pub folder: Option<String>,
}

/// Query params for deriving a public URL
#[derive(Debug, Deserialize, IntoParams)]
pub struct PublicUrlQuery {
    /// Object path inside the bucket
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUrlDto {
    pub public_url: String,
}

/// Request DTO for deleting one object
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteFileDto {
    /// Object path inside the bucket
    #[validate(length(min = 1, message = "path is required"))]
    pub path: String,
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteFileResponseDto {
    pub deleted: bool,
}
