use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::profiles::dtos::{CreateProfileDto, ListProfilesQuery, ProfileResponseDto};
use crate::features::profiles::models::IntentFilter;
use crate::features::profiles::services::ProfileService;
use crate::shared::types::{ApiResponse, Meta};

/// Create a member profile
#[utoipa::path(
    post,
    path = "/api/profiles",
    request_body = CreateProfileDto,
    responses(
        (status = 201, description = "Profile created", body = ApiResponse<ProfileResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered"),
        (status = 503, description = "Store unavailable or not configured")
    ),
    tag = "profiles"
)]
pub async fn create_profile(
    State(service): State<Arc<ProfileService>>,
    AppJson(dto): AppJson<CreateProfileDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProfileResponseDto>>)> {
    let profile = service.create_profile(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(profile),
            Some("Profile created successfully".to_string()),
            None,
        )),
    ))
}

/// Browse members, newest first
///
/// Without `search` and `intent` every profile is returned.
#[utoipa::path(
    get,
    path = "/api/profiles",
    params(ListProfilesQuery),
    responses(
        (status = 200, description = "Matching profiles", body = ApiResponse<Vec<ProfileResponseDto>>),
        (status = 400, description = "Unknown intent filter")
    ),
    tag = "profiles"
)]
pub async fn list_profiles(
    State(service): State<Arc<ProfileService>>,
    Query(query): Query<ListProfilesQuery>,
) -> Result<Json<ApiResponse<Vec<ProfileResponseDto>>>> {
    let intent: IntentFilter = query.intent.as_deref().unwrap_or("all").parse()?;
    let search = query.search.as_deref().unwrap_or("");

    let profiles = if search.is_empty() && intent == IntentFilter::All {
        service.list_profiles().await?
    } else {
        service.search_profiles(search, intent).await?
    };

    let meta = Meta::total(profiles.len());
    Ok(Json(ApiResponse::success(Some(profiles), None, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    params(("id" = Uuid, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Profile found", body = ApiResponse<ProfileResponseDto>),
        (status = 404, description = "Profile not found")
    ),
    tag = "profiles"
)]
pub async fn get_profile(
    State(service): State<Arc<ProfileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let profile = service.get_profile(id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}
