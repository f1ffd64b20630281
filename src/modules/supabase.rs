//! Shared connection to the hosted backend
//!
//! Holds the project URL, the access key and a pooled HTTP client, and
//! classifies failed responses from both the REST (PostgREST) and the
//! storage API into the crate's error taxonomy.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::core::config::StoreConfig;
use crate::core::error::{AppError, Result};

/// PostgreSQL `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

pub struct SupabaseConnection {
    config: StoreConfig,
    http_client: Client,
}

impl SupabaseConnection {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if !config.request_timeout.is_zero() {
            builder = builder.timeout(config.request_timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| AppError::Unknown(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Project base URL, or `Unavailable` when configuration is missing
    pub fn base_url(&self) -> Result<&str> {
        self.config.credentials().map(|(url, _)| url)
    }

    /// Start an authenticated request against `{base_url}{path}`.
    ///
    /// Fails before any network activity when the connection parameters are missing.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let (url, key) = self.config.credentials()?;

        Ok(self
            .http_client
            .request(method, format!("{}{}", url, path))
            .header("apikey", key)
            .bearer_auth(key))
    }
}

/// Map a transport-level failure (connect, timeout, body) to the taxonomy
pub fn transport_error(e: reqwest::Error) -> AppError {
    if e.is_connect() || e.is_timeout() || e.is_request() {
        AppError::Unavailable(format!("Backend unreachable: {}", e))
    } else if e.is_decode() {
        AppError::Unknown(format!("Failed to decode backend response: {}", e))
    } else {
        AppError::Unknown(format!("Backend request failed: {}", e))
    }
}

/// Consume a non-success response and classify it
pub async fn error_from_response(response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    classify_failure(status, &body)
}

/// Classify a failed backend response by status and error body.
///
/// PostgREST bodies carry `code` (PostgreSQL SQLSTATE); storage bodies carry
/// `statusCode` and `error`.
pub fn classify_failure(status: StatusCode, body: &str) -> AppError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = |name: &str| -> Option<String> {
        parsed.as_ref().and_then(|v| match v.get(name) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    };

    let message = field("message").unwrap_or_else(|| body.to_string());
    let detail = format!("HTTP {} - {}", status.as_u16(), message);

    let is_conflict = status == StatusCode::CONFLICT
        || field("code").as_deref() == Some(UNIQUE_VIOLATION)
        || field("statusCode").as_deref() == Some("409")
        || field("error").as_deref() == Some("Duplicate");

    if is_conflict {
        return AppError::Conflict(detail);
    }

    match status {
        StatusCode::UNAUTHORIZED
        | StatusCode::FORBIDDEN
        | StatusCode::NOT_FOUND
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => AppError::Unavailable(detail),
        _ => AppError::Unknown(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_is_conflict() {
        let body = r#"{"code":"23505","details":"Key (email)=(a@b.co) already exists.","hint":null,"message":"duplicate key value violates unique constraint \"profiles_email_key\""}"#;
        let err = classify_failure(StatusCode::CONFLICT, body);
        assert!(matches!(err, AppError::Conflict(_)));

        // Some gateways answer 400 with the SQLSTATE in the body
        let err = classify_failure(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_storage_duplicate_is_conflict() {
        let body = r#"{"statusCode":"409","error":"Duplicate","message":"The resource already exists"}"#;
        let err = classify_failure(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, AppError::Conflict(ref msg) if msg.contains("already exists")));
    }

    #[test]
    fn test_misconfiguration_is_unavailable() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::NOT_FOUND,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            let err = classify_failure(status, r#"{"message":"Invalid API key"}"#);
            assert!(matches!(err, AppError::Unavailable(_)), "status {}", status);
        }
    }

    #[test]
    fn test_other_failures_are_unknown() {
        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(err, AppError::Unknown(ref msg) if msg.contains("boom")));
    }

    #[test]
    fn test_request_without_configuration_fails_early() {
        let connection = SupabaseConnection::new(StoreConfig::default()).unwrap();
        assert!(!connection.is_configured());
        let err = connection.request(Method::GET, "/rest/v1/profiles").unwrap_err();
        assert!(matches!(err, AppError::Unavailable(_)));
    }
}
