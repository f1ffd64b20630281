use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

lazy_static! {
    /// Characters that may not appear in a storage object name
    /// - Kept: ASCII letters, digits, `.` and `-`
    /// - Replaced with `_`: spaces, punctuation, non-ASCII
    pub static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9.-]").unwrap();
}

/// Replace every unsafe character of a file name with `_`
pub fn sanitize_file_name(file_name: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(file_name, "_").into_owned()
}

/// Rejects values that are empty once surrounding whitespace is removed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Deserialize an optional string, treating blank input as absent
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("My File!.png"), "My_File_.png");
        assert_eq!(sanitize_file_name("report-2024.v2.pdf"), "report-2024.v2.pdf");
        assert_eq!(sanitize_file_name("über/../x"), "_ber_.._x");
        assert_eq!(sanitize_file_name(""), "");
        assert_eq!(sanitize_file_name("😀.png"), "_.png");
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Ada").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_blank_as_none() {
        #[derive(Deserialize)]
        struct Form {
            #[serde(default, deserialize_with = "blank_as_none")]
            link: Option<String>,
        }

        let form: Form = serde_json::from_str(r#"{"link":"  "}"#).unwrap();
        assert_eq!(form.link, None);
        let form: Form = serde_json::from_str(r#"{"link":" https://a.dev "}"#).unwrap();
        assert_eq!(form.link.as_deref(), Some("https://a.dev"));
        let form: Form = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(form.link, None);
    }
}
