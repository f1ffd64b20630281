use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::AppError;

/// What a member is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Cofounder,
    Client,
    Teammate,
}

impl Intent {
    pub const ALL: [Intent; 3] = [Intent::Cofounder, Intent::Client, Intent::Teammate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Cofounder => "cofounder",
            Intent::Client => "client",
            Intent::Teammate => "teammate",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str() == value)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Invalid intent '{}'. Expected one of: cofounder, client, teammate",
                    s
                ))
            })
    }
}

/// Intent restriction applied when browsing members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntentFilter {
    #[default]
    All,
    Only(Intent),
}

impl IntentFilter {
    pub fn matches(&self, intent: Intent) -> bool {
        match self {
            IntentFilter::All => true,
            IntentFilter::Only(wanted) => *wanted == intent,
        }
    }
}

impl FromStr for IntentFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Ok(IntentFilter::All);
        }
        value.parse().map(IntentFilter::Only)
    }
}

/// Row of the `profiles` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub ikigai: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub intent: Intent,
    pub portfolio_url: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub working_style: String,
    pub availability: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the `profiles` table; `id` and `created_at` are set by the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub ikigai: String,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub intent: Intent,
    pub portfolio_url: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub working_style: String,
    pub availability: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_parse() {
        assert_eq!("cofounder".parse::<Intent>().unwrap(), Intent::Cofounder);
        assert_eq!(" Client ".parse::<Intent>().unwrap(), Intent::Client);
        assert!(matches!(
            "investor".parse::<Intent>(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_intent_filter_parse() {
        assert_eq!("all".parse::<IntentFilter>().unwrap(), IntentFilter::All);
        assert_eq!("".parse::<IntentFilter>().unwrap(), IntentFilter::All);
        assert_eq!(
            "teammate".parse::<IntentFilter>().unwrap(),
            IntentFilter::Only(Intent::Teammate)
        );
        assert!("nobody".parse::<IntentFilter>().is_err());
    }

    #[test]
    fn test_intent_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&Intent::Teammate).unwrap(),
            "\"teammate\""
        );
        assert!(serde_json::from_str::<Intent>("\"partner\"").is_err());
    }
}
