use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::profiles::models::{Intent, Profile};
use crate::shared::validation::{blank_as_none, validate_not_blank};

/// Request DTO for creating a profile
///
/// `skills` and `interests` are comma-separated text; empty segments are dropped.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileDto {
    #[validate(custom(function = validate_not_blank))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    pub email: String,

    /// What drives the member
    #[validate(custom(function = validate_not_blank))]
    pub ikigai: String,

    #[validate(custom(function = validate_not_blank))]
    #[schema(example = "Rust, Distributed systems")]
    pub skills: String,

    #[validate(custom(function = validate_not_blank))]
    #[schema(example = "Climate, Open source")]
    pub interests: String,

    /// One of `cofounder`, `client`, `teammate`
    #[schema(example = "cofounder")]
    pub intent: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Portfolio must be a valid URL"))]
    pub portfolio_url: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "LinkedIn must be a valid URL"))]
    pub linkedin: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Twitter must be a valid URL"))]
    pub twitter: Option<String>,

    #[validate(custom(function = validate_not_blank))]
    pub working_style: String,

    #[validate(custom(function = validate_not_blank))]
    pub availability: String,
}

/// Response DTO for a profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub ikigai: String,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub intent: Intent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    pub working_style: String,
    pub availability: String,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponseDto {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            name: p.name,
            email: p.email,
            ikigai: p.ikigai,
            skills: p.skills,
            interests: p.interests,
            intent: p.intent,
            portfolio_url: p.portfolio_url,
            linkedin: p.linkedin,
            twitter: p.twitter,
            working_style: p.working_style,
            availability: p.availability,
            created_at: p.created_at,
        }
    }
}

/// Query params for browsing members
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListProfilesQuery {
    /// Case-insensitive text matched against name, skills, interests and ikigai
    pub search: Option<String>,
    /// `all` (default), `cofounder`, `client` or `teammate`
    pub intent: Option<String>,
}
