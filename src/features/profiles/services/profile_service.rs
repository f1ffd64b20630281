use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::profiles::dtos::{CreateProfileDto, ProfileResponseDto};
use crate::features::profiles::models::{Intent, IntentFilter, NewProfile, Profile};
use crate::modules::store::{decode_row, decode_rows, EntityStore, RowQuery, SortOrder};
use crate::shared::constants::PROFILES_TABLE;

/// Split comma-separated text into trimmed, non-empty entries
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive member search
///
/// A profile passes when `search` is empty or is a substring of its name,
/// any skill, any interest or its ikigai, and when its intent satisfies
/// `intent`. Input order is preserved.
pub fn filter_profiles(profiles: &[Profile], search: &str, intent: IntentFilter) -> Vec<Profile> {
    let needle = search.to_lowercase();

    profiles
        .iter()
        .filter(|p| intent.matches(p.intent))
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.skills.iter().any(|s| s.to_lowercase().contains(&needle))
                || p.interests.iter().any(|i| i.to_lowercase().contains(&needle))
                || p.ikigai.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Service for member profiles
pub struct ProfileService {
    store: Arc<dyn EntityStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Validate the submitted form and insert one profile
    pub async fn create_profile(&self, dto: CreateProfileDto) -> Result<ProfileResponseDto> {
        dto.validate().map_err(|e| {
            warn!(
                operation = "create_profile",
                table = PROFILES_TABLE,
                "Rejected profile form: {}",
                e
            );
            AppError::Validation(e.to_string())
        })?;
        let intent: Intent = dto.intent.parse().inspect_err(|e| {
            warn!(
                operation = "create_profile",
                table = PROFILES_TABLE,
                "Rejected profile intent: {}",
                e
            );
        })?;

        let row = NewProfile {
            name: dto.name.trim().to_string(),
            email: dto.email.trim().to_string(),
            ikigai: dto.ikigai.trim().to_string(),
            skills: split_list(&dto.skills),
            interests: split_list(&dto.interests),
            intent,
            portfolio_url: dto.portfolio_url,
            linkedin: dto.linkedin,
            twitter: dto.twitter,
            working_style: dto.working_style.trim().to_string(),
            availability: dto.availability.trim().to_string(),
        };
        let row = serde_json::to_value(&row)
            .map_err(|e| AppError::Unknown(format!("Failed to encode profile: {}", e)))?;

        let stored = self
            .store
            .insert(PROFILES_TABLE, row)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => AppError::Conflict(
                    "A profile with this email address already exists".to_string(),
                ),
                other => other,
            })?;
        let profile: Profile = decode_row(PROFILES_TABLE, stored)?;

        info!("Profile created: id={}, email={}", profile.id, profile.email);

        Ok(profile.into())
    }

    /// Exactly one profile, or `NotFound`
    pub async fn get_profile(&self, id: Uuid) -> Result<ProfileResponseDto> {
        self.find_profile(id).await.map(ProfileResponseDto::from)
    }

    /// All profiles, newest first
    pub async fn list_profiles(&self) -> Result<Vec<ProfileResponseDto>> {
        let profiles = self.fetch_all().await?;
        Ok(profiles.into_iter().map(ProfileResponseDto::from).collect())
    }

    /// List all profiles and narrow them with [`filter_profiles`]
    pub async fn search_profiles(
        &self,
        search: &str,
        intent: IntentFilter,
    ) -> Result<Vec<ProfileResponseDto>> {
        let profiles = self.fetch_all().await?;
        let matched = filter_profiles(&profiles, search, intent);

        debug!(
            "Profile search '{}' ({:?}) matched {} of {}",
            search,
            intent,
            matched.len(),
            profiles.len()
        );

        Ok(matched.into_iter().map(ProfileResponseDto::from).collect())
    }

    pub(crate) async fn find_profile(&self, id: Uuid) -> Result<Profile> {
        let query = RowQuery::new().eq("id", id.to_string()).limit(1);
        let rows = self.store.select(PROFILES_TABLE, &query).await?;

        let row: Option<Value> = rows.into_iter().next();
        match row {
            Some(row) => decode_row(PROFILES_TABLE, row),
            None => {
                warn!(
                    operation = "find_profile",
                    table = PROFILES_TABLE,
                    "Profile with id {} not found",
                    id
                );
                Err(AppError::NotFound(format!(
                    "Profile with id {} not found",
                    id
                )))
            }
        }
    }

    async fn fetch_all(&self) -> Result<Vec<Profile>> {
        let query = RowQuery::new().order_by("created_at", SortOrder::Descending);
        let rows = self.store.select(PROFILES_TABLE, &query).await?;
        decode_rows(PROFILES_TABLE, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::MemoryStore;
    use crate::shared::test_helpers::{memory_store, profile_dto};
    use chrono::Utc;
    use tokio_test::assert_ok;

    fn service() -> (ProfileService, Arc<MemoryStore>) {
        let store = memory_store();
        (ProfileService::new(store.clone()), store)
    }

    fn profile(name: &str, skills: &[&str], intent: Intent) -> Profile {
        Profile {
            id: Uuid::now_v7(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            ikigai: "Building useful things".to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            interests: vec![],
            intent,
            portfolio_url: None,
            linkedin: None,
            twitter: None,
            working_style: "Async".to_string(),
            availability: "Weekends".to_string(),
            created_at: Utc::now(),
        }
    }

    fn names(profiles: &[Profile]) -> Vec<&str> {
        profiles.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" Rust, Go ,, ,TypeScript "),
            vec!["Rust", "Go", "TypeScript"]
        );
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_filter_profiles() {
        let profiles = vec![
            profile("Ada", &["Rust"], Intent::Cofounder),
            profile("Bo", &["Go"], Intent::Client),
        ];

        assert_eq!(
            names(&filter_profiles(&profiles, "rust", IntentFilter::All)),
            vec!["Ada"]
        );
        assert_eq!(
            names(&filter_profiles(
                &profiles,
                "",
                IntentFilter::Only(Intent::Client)
            )),
            vec!["Bo"]
        );
        assert!(filter_profiles(&profiles, "xyz", IntentFilter::All).is_empty());
        assert_eq!(
            names(&filter_profiles(&profiles, "", IntentFilter::All)),
            vec!["Ada", "Bo"]
        );
    }

    #[test]
    fn test_filter_matches_interests_and_ikigai() {
        let mut ada = profile("Ada", &[], Intent::Teammate);
        ada.interests = vec!["Climate Tech".to_string()];
        let mut bo = profile("Bo", &[], Intent::Teammate);
        bo.ikigai = "Teaching KIDS to code".to_string();
        let profiles = vec![ada, bo];

        assert_eq!(
            names(&filter_profiles(&profiles, "CLIMATE", IntentFilter::All)),
            vec!["Ada"]
        );
        assert_eq!(
            names(&filter_profiles(&profiles, "kids", IntentFilter::All)),
            vec!["Bo"]
        );
        assert!(filter_profiles(
            &profiles,
            "kids",
            IntentFilter::Only(Intent::Cofounder)
        )
        .is_empty());
    }

    #[tokio::test]
    async fn test_create_profile_splits_lists() {
        let (service, _) = service();

        let created = assert_ok!(
            service
                .create_profile(profile_dto("ada@example.com", "Rust, ,Go ", "cofounder"))
                .await
        );

        assert_eq!(created.skills, vec!["Rust", "Go"]);
        assert_eq!(created.interests, vec!["Open source", "Climate"]);
        assert_eq!(created.intent, Intent::Cofounder);

        let fetched = assert_ok!(service.get_profile(created.id).await);
        assert_eq!(fetched.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_and_keeps_first() {
        let (service, store) = service();

        let first = assert_ok!(
            service
                .create_profile(profile_dto("ada@example.com", "Rust", "cofounder"))
                .await
        );

        let second = service
            .create_profile(profile_dto("ada@example.com", "Go", "client"))
            .await;
        assert!(matches!(second, Err(AppError::Conflict(_))));
        assert_eq!(store.insert_count(), 1);

        let fetched = assert_ok!(service.get_profile(first.id).await);
        assert_eq!(fetched.skills, vec!["Rust"]);
        assert_eq!(fetched.intent, Intent::Cofounder);
    }

    #[tokio::test]
    async fn test_invalid_form_is_rejected_before_store() {
        let (service, store) = service();

        let mut dto = profile_dto("not-an-email", "Rust", "cofounder");
        let result = service.create_profile(dto.clone()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        dto.email = "ada@example.com".to_string();
        dto.intent = "investor".to_string();
        let result = service.create_profile(dto.clone()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        dto.intent = "client".to_string();
        dto.name = "   ".to_string();
        let result = service.create_profile(dto.clone()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        dto.name = "Ada".to_string();
        dto.linkedin = Some("not a url".to_string());
        let result = service.create_profile(dto).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        assert_eq!(store.insert_count(), 0);
    }

    #[tokio::test]
    async fn test_get_missing_profile_is_not_found() {
        let (service, _) = service();

        let result = service.get_profile(Uuid::now_v7()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_search_filters() {
        let (service, _) = service();

        let mut ada = profile_dto("ada@example.com", "Rust", "cofounder");
        ada.name = "Ada".to_string();
        ada.ikigai = "Ship reliable software".to_string();
        let mut bo = profile_dto("bo@example.com", "Go", "client");
        bo.name = "Bo".to_string();
        bo.ikigai = "Help small teams grow".to_string();
        assert_ok!(service.create_profile(ada).await);
        assert_ok!(service.create_profile(bo).await);

        let all = assert_ok!(service.list_profiles().await);
        let emails: Vec<&str> = all.iter().map(|p| p.email.as_str()).collect();
        assert_eq!(emails, vec!["bo@example.com", "ada@example.com"]);

        let found = assert_ok!(service.search_profiles("RUST", IntentFilter::All).await);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ada");

        let found = assert_ok!(
            service
                .search_profiles("", IntentFilter::Only(Intent::Client))
                .await
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Bo");
    }
}
