use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use std::sync::Arc;

use crate::features::profiles::dtos::CreateProfileDto;
use crate::modules::store::MemoryStore;
use crate::shared::constants::{MESSAGES_TABLE, PROFILES_TABLE};

/// In-memory store carrying the constraints of the hosted schema
pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(
        MemoryStore::new()
            .with_unique(PROFILES_TABLE, "email")
            .with_timestamp(PROFILES_TABLE, "created_at")
            .with_timestamp(MESSAGES_TABLE, "timestamp"),
    )
}

/// A valid create-profile request with generated free text
pub fn profile_dto(email: &str, skills: &str, intent: &str) -> CreateProfileDto {
    CreateProfileDto {
        name: Name().fake(),
        email: email.to_string(),
        ikigai: Sentence(3..8).fake(),
        skills: skills.to_string(),
        interests: "Open source, Climate".to_string(),
        intent: intent.to_string(),
        portfolio_url: None,
        linkedin: None,
        twitter: None,
        working_style: Sentence(3..8).fake(),
        availability: "Evenings".to_string(),
    }
}
