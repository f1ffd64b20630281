use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use utoipa::ToSchema;

use crate::core::error::AppError;

const MB: u64 = 1024 * 1024;

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

const PORTFOLIO_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "video/mp4",
    "video/webm",
    "audio/mpeg",
    "audio/wav",
];

const CHAT_ATTACHMENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

const USER_DOCUMENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
    "text/csv",
];

/// Named partitions of object storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBucket {
    ProfileImages,
    PortfolioFiles,
    ChatAttachments,
    UserDocuments,
}

/// Size and type limits enforced before any transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketPolicy {
    pub max_size: u64,
    pub allowed_types: &'static [&'static str],
}

impl BucketPolicy {
    pub fn allows(&self, content_type: &str) -> bool {
        self.allowed_types.contains(&content_type)
    }
}

impl StorageBucket {
    pub const ALL: [StorageBucket; 4] = [
        StorageBucket::ProfileImages,
        StorageBucket::PortfolioFiles,
        StorageBucket::ChatAttachments,
        StorageBucket::UserDocuments,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StorageBucket::ProfileImages => "profile-images",
            StorageBucket::PortfolioFiles => "portfolio-files",
            StorageBucket::ChatAttachments => "chat-attachments",
            StorageBucket::UserDocuments => "user-documents",
        }
    }

    pub fn policy(&self) -> BucketPolicy {
        match self {
            StorageBucket::ProfileImages => BucketPolicy {
                max_size: 5 * MB,
                allowed_types: IMAGE_TYPES,
            },
            StorageBucket::PortfolioFiles => BucketPolicy {
                max_size: 50 * MB,
                allowed_types: PORTFOLIO_TYPES,
            },
            StorageBucket::ChatAttachments => BucketPolicy {
                max_size: 10 * MB,
                allowed_types: CHAT_ATTACHMENT_TYPES,
            },
            StorageBucket::UserDocuments => BucketPolicy {
                max_size: 20 * MB,
                allowed_types: USER_DOCUMENT_TYPES,
            },
        }
    }

    /// Largest `max_size` across all buckets
    pub fn largest_max_size() -> u64 {
        Self::ALL
            .iter()
            .map(|bucket| bucket.policy().max_size)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for StorageBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StorageBucket {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.name() == s)
            .ok_or_else(|| {
                warn!(operation = "resolve_bucket", bucket = s, "Unknown storage bucket");
                AppError::NotFound(format!("Unknown storage bucket '{}'", s))
            })
    }
}

/// A user-supplied file awaiting upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_names_round_trip() {
        for bucket in StorageBucket::ALL {
            assert_eq!(bucket.name().parse::<StorageBucket>().unwrap(), bucket);
        }
        assert!("avatars".parse::<StorageBucket>().is_err());
    }

    #[test]
    fn test_bucket_policies() {
        assert_eq!(StorageBucket::ProfileImages.policy().max_size, 5 * MB);
        assert_eq!(StorageBucket::PortfolioFiles.policy().max_size, 50 * MB);
        assert_eq!(StorageBucket::ChatAttachments.policy().max_size, 10 * MB);
        assert_eq!(StorageBucket::UserDocuments.policy().max_size, 20 * MB);
        assert_eq!(StorageBucket::largest_max_size(), 50 * MB);

        assert!(!StorageBucket::ProfileImages.policy().allows("text/plain"));
        assert!(StorageBucket::ChatAttachments.policy().allows("text/plain"));
        assert!(StorageBucket::PortfolioFiles.policy().allows("audio/wav"));
        assert!(!StorageBucket::ChatAttachments.policy().allows("video/mp4"));
        assert!(StorageBucket::UserDocuments.policy().allows("text/csv"));
    }

    #[test]
    fn test_bucket_serializes_as_name() {
        let json = serde_json::to_string(&StorageBucket::ChatAttachments).unwrap();
        assert_eq!(json, "\"chat-attachments\"");
    }
}
