//! Backend records and the view models pages render.
//!
//! `Raw*` types mirror the backend JSON (`_id`, camelCase, nullable
//! everything). `*View` types are what the UI displays.

mod analytics;
mod courses;
mod people;
mod profile;
mod support;

pub use analytics::*;
pub use courses::*;
pub use people::*;
pub use profile::*;
pub use support::*;

use serde::Deserialize;
use thiserror::Error;

/// Client-side form validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// `{ firstName, lastName, email }` embedded in tickets and activity rows.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl PersonRef {
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

/// `first last`, falling back to `Unknown` when both are blank.
pub fn full_name(first: Option<&str>, last: Option<&str>) -> String {
    let name = format!("{} {}", first.unwrap_or_default(), last.unwrap_or_default());
    let name = name.trim();
    if name.is_empty() {
        "Unknown".to_string()
    } else {
        name.to_string()
    }
}

pub(crate) fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Empty optional strings are treated as absent.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_fallbacks() {
        assert_eq!(full_name(Some("Jay"), Some("Student")), "Jay Student");
        assert_eq!(full_name(Some("Jay"), None), "Jay");
        assert_eq!(full_name(None, None), "Unknown");
        assert_eq!(full_name(Some(" "), Some("")), "Unknown");
    }

    #[test]
    fn test_person_ref_accepts_nulls() {
        let person: PersonRef =
            serde_json::from_str(r#"{"firstName":null,"lastName":"Reed","email":"t@lms.io"}"#)
                .unwrap();
        assert_eq!(person.full_name(), "Reed");
    }

    #[test]
    fn test_form_error_messages() {
        assert_eq!(FormError::Required("First name").to_string(), "First name is required");
        assert_eq!(
            FormError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
    }
}
