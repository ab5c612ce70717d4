//! The signed-in admin's own account details.

use serde::{Deserialize, Serialize};

use super::{FormError, present, text};
use crate::core::fetch::Blank;
use crate::core::format::format_datetime;
use crate::core::session::{SessionUser, is_plausible_email};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub role: String,
    pub last_updated: String,
}

impl From<RawProfile> for AdminProfile {
    fn from(raw: RawProfile) -> Self {
        Self {
            first_name: text(&raw.first_name),
            last_name: text(&raw.last_name),
            email: text(&raw.email),
            phone: text(&raw.phone),
            avatar: present(raw.avatar),
            role: raw.role.unwrap_or_else(|| "admin".to_string()),
            last_updated: format_datetime(raw.updated_at.as_deref()),
            id: raw.id,
        }
    }
}

impl Blank for AdminProfile {
    fn is_blank(&self) -> bool {
        false
    }
}

impl AdminProfile {
    pub fn full_name(&self) -> String {
        super::full_name(Some(&self.first_name), Some(&self.last_name))
    }

    /// Session copy of this profile.
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            avatar: self.avatar.clone(),
        }
    }

    pub fn form(&self) -> ProfileForm {
        ProfileForm {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            avatar: self.avatar.clone().unwrap_or_default(),
        }
    }
}

/// Body of `PUT /auth/updatedetails`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: String,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<Self, FormError> {
        let trimmed = Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            avatar: self.avatar.trim().to_string(),
        };
        if trimmed.first_name.is_empty() {
            return Err(FormError::Required("First name"));
        }
        if trimmed.email.is_empty() {
            return Err(FormError::Required("Email"));
        }
        if !is_plausible_email(&trimmed.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(trimmed)
    }
}

pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully!";

/// `Error: <reason>` as shown under the settings form.
pub fn profile_error_message(reason: &str) -> String {
    format!("Error: {reason}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_mapping() {
        let raw: RawProfile = serde_json::from_str(
            r#"{"_id":"u1","firstName":"Ada","lastName":"Lovelace","email":"ada@lms.io","phone":null,"updatedAt":"2025-05-12T14:05:00Z"}"#,
        )
        .unwrap();
        let profile = AdminProfile::from(raw);

        assert_eq!(profile.full_name(), "Ada Lovelace");
        assert_eq!(profile.phone, "");
        assert_eq!(profile.role, "admin");
        assert_eq!(profile.last_updated, "May 12, 2025, 14:05 UTC");
        assert_eq!(profile.session_user().email, "ada@lms.io");
    }

    #[test]
    fn test_profile_form_validation() {
        let form = ProfileForm {
            first_name: " Ada ".into(),
            email: "ada@lms.io ".into(),
            ..Default::default()
        };
        let valid = form.validate().unwrap();
        assert_eq!(valid.first_name, "Ada");
        assert_eq!(valid.email, "ada@lms.io");

        let json = serde_json::to_value(&valid).unwrap();
        assert_eq!(json["firstName"], "Ada");

        let missing = ProfileForm {
            email: "ada@lms.io".into(),
            ..Default::default()
        };
        assert_eq!(missing.validate(), Err(FormError::Required("First name")));

        let bad_email = ProfileForm {
            first_name: "Ada".into(),
            email: "ada".into(),
            ..Default::default()
        };
        assert_eq!(bad_email.validate(), Err(FormError::InvalidEmail));
    }

    #[test]
    fn test_messages() {
        assert_eq!(PROFILE_UPDATED_MESSAGE, "Profile updated successfully!");
        assert_eq!(profile_error_message("Email taken"), "Error: Email taken");
    }
}
