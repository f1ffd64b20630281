use utoipa::{Modify, OpenApi};

use crate::features::files::{dtos as files_dtos, handlers as files_handlers, models as files_models};
use crate::features::messages::{dtos as messages_dtos, handlers as messages_handlers};
use crate::features::profiles::{
    dtos as profiles_dtos, handlers as profiles_handlers, models as profiles_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Profiles
        profiles_handlers::create_profile,
        profiles_handlers::list_profiles,
        profiles_handlers::get_profile,
        // Messages
        messages_handlers::list_messages,
        messages_handlers::send_message,
        messages_handlers::conversation_with_profile,
        messages_handlers::send_to_profile,
        // Files
        files_handlers::upload_file,
        files_handlers::upload_avatar,
        files_handlers::upload_portfolio,
        files_handlers::upload_attachment,
        files_handlers::list_files,
        files_handlers::get_public_url,
        files_handlers::delete_file,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Profiles
            profiles_models::Intent,
            profiles_dtos::CreateProfileDto,
            profiles_dtos::ProfileResponseDto,
            ApiResponse<profiles_dtos::ProfileResponseDto>,
            ApiResponse<Vec<profiles_dtos::ProfileResponseDto>>,
            // Messages
            messages_dtos::SendMessageDto,
            messages_dtos::SendProfileMessageDto,
            messages_dtos::MessageResponseDto,
            messages_dtos::SendMessageResponseDto,
            ApiResponse<Vec<messages_dtos::MessageResponseDto>>,
            ApiResponse<messages_dtos::SendMessageResponseDto>,
            // Files
            files_models::StorageBucket,
            files_dtos::UploadFileDto,
            files_dtos::UploadedFileDto,
            files_dtos::StoredFileDto,
            files_dtos::PublicUrlDto,
            files_dtos::DeleteFileDto,
            files_dtos::DeleteFileResponseDto,
            ApiResponse<files_dtos::UploadedFileDto>,
            ApiResponse<Vec<files_dtos::StoredFileDto>>,
            ApiResponse<files_dtos::PublicUrlDto>,
            ApiResponse<files_dtos::DeleteFileResponseDto>,
        )
    ),
    tags(
        (name = "profiles", description = "Member profiles"),
        (name = "messages", description = "Direct messages between members"),
        (name = "files", description = "File upload and management"),
    ),
    info(
        title = "NetworkAI API",
        version = "0.1.0",
        description = "API documentation for NetworkAI",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
