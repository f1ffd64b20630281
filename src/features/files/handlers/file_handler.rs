use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::files::dtos::{
    DeleteFileDto, DeleteFileResponseDto, ListFilesQuery, PublicUrlDto, PublicUrlQuery,
    StoredFileDto, UploadFileDto, UploadedFileDto,
};
use crate::features::files::models::{StorageBucket, UploadFile};
use crate::features::files::services::FileService;
use crate::shared::types::{ApiResponse, Meta};

/// Fields collected from an upload form
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<UploadFile>,
    owner_id: Option<String>,
    folder: Option<String>,
    overwrite: bool,
}

impl UploadForm {
    fn into_file(self) -> Result<UploadFile> {
        self.file
            .ok_or_else(|| AppError::BadRequest("File is required".to_string()))
    }
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                form.file = Some(UploadFile::new(file_name, content_type, data.to_vec()));
            }
            "owner_id" | "folder" | "overwrite" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read {} field: {}", field_name, e))
                })?;
                let text = text.trim().to_string();

                match field_name.as_str() {
                    "owner_id" => form.owner_id = Some(text).filter(|s| !s.is_empty()),
                    "folder" => form.folder = Some(text).filter(|s| !s.is_empty()),
                    _ => form.overwrite = text.eq_ignore_ascii_case("true"),
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    Ok(form)
}

fn parse_bucket(bucket: &str) -> Result<StorageBucket> {
    bucket.parse()
}

fn created(dto: UploadedFileDto) -> (StatusCode, Json<ApiResponse<UploadedFileDto>>) {
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(dto), None, None)),
    )
}

/// Upload a file into a bucket
///
/// Accepts multipart/form-data with:
/// - `file`: The file to upload (required)
/// - `owner_id`: Owner id used in the generated path (required)
/// - `folder`: Optional folder placed before the owner id
/// - `overwrite`: "true" to replace an existing object (default false)
#[utoipa::path(
    post,
    path = "/api/files/{bucket}",
    tag = "files",
    params(
        ("bucket" = StorageBucket, Path, description = "Target bucket")
    ),
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "File uploaded successfully", body = ApiResponse<UploadedFileDto>),
        (status = 400, description = "Missing file or owner"),
        (status = 404, description = "Unknown bucket"),
        (status = 409, description = "An object already exists at the generated path"),
        (status = 413, description = "File too large for the bucket"),
        (status = 415, description = "File type not allowed for the bucket")
    )
)]
pub async fn upload_file(
    State(service): State<Arc<FileService>>,
    Path(bucket): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadedFileDto>>)> {
    let bucket = parse_bucket(&bucket)?;
    let form = read_upload_form(multipart).await?;

    let owner_id = form
        .owner_id
        .clone()
        .ok_or_else(|| AppError::BadRequest("owner_id is required".to_string()))?;
    let folder = form.folder.clone();
    let overwrite = form.overwrite;

    let response = service
        .upload_for_owner(bucket, &owner_id, folder.as_deref(), form.into_file()?, overwrite)
        .await?;

    Ok(created(response))
}

/// Upload (replace) a profile image
#[utoipa::path(
    post,
    path = "/api/files/avatars/{owner_id}",
    tag = "files",
    params(("owner_id" = String, Path, description = "Profile owner id")),
    request_body(content = UploadFileDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Avatar uploaded", body = ApiResponse<UploadedFileDto>),
        (status = 413, description = "File exceeds 5MB"),
        (status = 415, description = "Not an image")
    )
)]
pub async fn upload_avatar(
    State(service): State<Arc<FileService>>,
    Path(owner_id): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadedFileDto>>)> {
    let file = read_upload_form(multipart).await?.into_file()?;
    let response = service.upload_profile_image(&owner_id, file).await?;
    Ok(created(response))
}

/// Upload a portfolio item
#[utoipa::path(
    post,
    path = "/api/files/portfolio/{owner_id}",
    tag = "files",
    params(("owner_id" = String, Path, description = "Profile owner id")),
    request_body(content = UploadFileDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Portfolio file uploaded", body = ApiResponse<UploadedFileDto>),
        (status = 409, description = "Object already exists"),
        (status = 413, description = "File exceeds 50MB"),
        (status = 415, description = "File type not allowed")
    )
)]
pub async fn upload_portfolio(
    State(service): State<Arc<FileService>>,
    Path(owner_id): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadedFileDto>>)> {
    let file = read_upload_form(multipart).await?.into_file()?;
    let response = service.upload_portfolio_file(&owner_id, file).await?;
    Ok(created(response))
}

/// Upload a chat attachment
#[utoipa::path(
    post,
    path = "/api/files/attachments/{owner_id}",
    tag = "files",
    params(("owner_id" = String, Path, description = "Sender id")),
    request_body(content = UploadFileDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Attachment uploaded", body = ApiResponse<UploadedFileDto>),
        (status = 409, description = "Object already exists"),
        (status = 413, description = "File exceeds 10MB"),
        (status = 415, description = "File type not allowed")
    )
)]
pub async fn upload_attachment(
    State(service): State<Arc<FileService>>,
    Path(owner_id): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadedFileDto>>)> {
    let file = read_upload_form(multipart).await?.into_file()?;
    let response = service.upload_chat_attachment(&owner_id, file).await?;
    Ok(created(response))
}

/// List up to 100 entries of a bucket folder
#[utoipa::path(
    get,
    path = "/api/files/{bucket}",
    tag = "files",
    params(
        ("bucket" = StorageBucket, Path, description = "Bucket to list"),
        ListFilesQuery
    ),
    responses(
        (status = 200, description = "Folder entries", body = ApiResponse<Vec<StoredFileDto>>),
        (status = 404, description = "Unknown bucket")
    )
)]
pub async fn list_files(
    State(service): State<Arc<FileService>>,
    Path(bucket): Path<String>,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<ApiResponse<Vec<StoredFileDto>>>> {
    let bucket = parse_bucket(&bucket)?;
    let entries = service.list(bucket, query.folder.as_deref()).await?;
    let meta = Meta::total(entries.len());
    Ok(Json(ApiResponse::success(Some(entries), None, Some(meta))))
}

/// Derive the public URL of an object
#[utoipa::path(
    get,
    path = "/api/files/{bucket}/public-url",
    tag = "files",
    params(
        ("bucket" = StorageBucket, Path, description = "Bucket of the object"),
        PublicUrlQuery
    ),
    responses(
        (status = 200, description = "Public URL", body = ApiResponse<PublicUrlDto>),
        (status = 404, description = "Unknown bucket")
    )
)]
pub async fn get_public_url(
    State(service): State<Arc<FileService>>,
    Path(bucket): Path<String>,
    Query(query): Query<PublicUrlQuery>,
) -> Result<Json<ApiResponse<PublicUrlDto>>> {
    let bucket = parse_bucket(&bucket)?;
    let public_url = service.get_public_url(bucket, &query.path)?;
    Ok(Json(ApiResponse::success(
        Some(PublicUrlDto { public_url }),
        None,
        None,
    )))
}

/// Delete one object
///
/// Deleting an object that does not exist also succeeds.
#[utoipa::path(
    delete,
    path = "/api/files/{bucket}",
    tag = "files",
    params(("bucket" = StorageBucket, Path, description = "Bucket of the object")),
    request_body = DeleteFileDto,
    responses(
        (status = 200, description = "File deleted", body = ApiResponse<DeleteFileResponseDto>),
        (status = 400, description = "Missing path"),
        (status = 404, description = "Unknown bucket")
    )
)]
pub async fn delete_file(
    State(service): State<Arc<FileService>>,
    Path(bucket): Path<String>,
    AppJson(dto): AppJson<DeleteFileDto>,
) -> Result<Json<ApiResponse<DeleteFileResponseDto>>> {
    dto.validate().map_err(|e| {
        warn!(
            operation = "delete_file",
            bucket = bucket.as_str(),
            "Rejected delete request: {}",
            e
        );
        AppError::Validation(e.to_string())
    })?;

    let bucket = parse_bucket(&bucket)?;
    service.remove(bucket, &dto.path).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteFileResponseDto { deleted: true }),
        Some("File deleted successfully".to_string()),
        None,
    )))
}
