use std::env;
use std::time::Duration;

use crate::core::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub store: StoreConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Connection parameters for the hosted backend (REST store + object storage).
///
/// `url` and `anon_key` are optional at load time. Their absence is reported
/// per operation as [`AppError::Unavailable`] through [`StoreConfig::credentials`],
/// so the process still starts without them.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    pub url: Option<String>,
    /// Public (anon) access key sent as `apikey` and bearer token
    pub anon_key: Option<String>,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> std::result::Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            store: StoreConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    // Largest bucket policy (50MB) plus multipart overhead
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 51 * 1024 * 1024;

    pub fn from_env() -> std::result::Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StoreConfig {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> std::result::Result<Self, String> {
        // Blank values count as missing
        let url = env::var("SUPABASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());
        let anon_key = env::var("SUPABASE_ANON_KEY")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let request_timeout_secs = env::var("STORE_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "STORE_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            anon_key,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// Build a config from explicit values (blank values count as missing)
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url = url.into().trim().trim_end_matches('/').to_string();
        let anon_key = anon_key.into().trim().to_string();
        Self {
            url: Some(url).filter(|s| !s.is_empty()),
            anon_key: Some(anon_key).filter(|s| !s.is_empty()),
            request_timeout: Duration::from_secs(Self::DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.anon_key.is_some()
    }

    /// Returns `(url, anon_key)` or `Unavailable` naming the missing variable
    pub fn credentials(&self) -> Result<(&str, &str)> {
        match (self.url.as_deref(), self.anon_key.as_deref()) {
            (Some(url), Some(key)) => Ok((url, key)),
            (None, _) => Err(AppError::Unavailable(
                "Store configuration missing: SUPABASE_URL must be set".to_string(),
            )),
            (_, None) => Err(AppError::Unavailable(
                "Store configuration missing: SUPABASE_ANON_KEY must be set".to_string(),
            )),
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> std::result::Result<Self, String> {
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "NetworkAI API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Profiles, messages and file uploads for NetworkAI".to_string());

        Ok(Self {
            title,
            version,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_new_trims_values() {
        let config = StoreConfig::new(" https://demo.supabase.co/ ", " key ");
        assert_eq!(config.url.as_deref(), Some("https://demo.supabase.co"));
        assert_eq!(config.anon_key.as_deref(), Some("key"));
        assert!(config.is_configured());
    }

    #[test]
    fn test_store_config_missing_url_is_unavailable() {
        let config = StoreConfig::new("", "key");
        let err = config.credentials().unwrap_err();
        assert!(matches!(err, AppError::Unavailable(ref msg) if msg.contains("SUPABASE_URL")));
    }

    #[test]
    fn test_store_config_missing_key_is_unavailable() {
        let config = StoreConfig::new("https://demo.supabase.co", "   ");
        let err = config.credentials().unwrap_err();
        assert!(matches!(err, AppError::Unavailable(ref msg) if msg.contains("SUPABASE_ANON_KEY")));
    }

    #[test]
    fn test_default_store_config_is_not_configured() {
        assert!(!StoreConfig::default().is_configured());
    }
}
