//! Closed set of record statuses and their badge tones.

use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Status {
    Active,
    Inactive,
    Open,
    #[display("In Progress")]
    InProgress,
    Resolved,
    Closed,
    Draft,
    Published,
    Archived,
    Pending,
    Unknown,
}

/// Colour family of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Positive,
    Negative,
    Warning,
    Info,
    Neutral,
}

impl Status {
    pub const COURSE_STATES: [Status; 3] = [Status::Draft, Status::Published, Status::Archived];

    /// Parse a backend status string. Unrecognised values map to `Unknown`.
    pub fn from_api(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "open" => Self::Open,
            "inprogress" => Self::InProgress,
            "resolved" => Self::Resolved,
            "closed" => Self::Closed,
            "draft" => Self::Draft,
            "published" => Self::Published,
            "archived" => Self::Archived,
            "pending" => Self::Pending,
            _ => Self::Unknown,
        }
    }

    pub fn from_active(is_active: bool) -> Self {
        if is_active {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// Value sent back to the backend.
    pub fn api_value(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
            Self::Pending => "pending",
            Self::Unknown => "unknown",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Active | Self::Resolved | Self::Published => StatusTone::Positive,
            Self::Inactive | Self::Open => StatusTone::Negative,
            Self::InProgress | Self::Pending | Self::Draft => StatusTone::Warning,
            Self::Closed => StatusTone::Info,
            Self::Archived | Self::Unknown => StatusTone::Neutral,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

impl StatusTone {
    /// Tailwind classes for badges.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Positive => "bg-green-100 text-green-800 border border-green-300",
            Self::Negative => "bg-red-100 text-red-800 border border-red-300",
            Self::Warning => "bg-yellow-100 text-yellow-800 border border-yellow-300",
            Self::Info => "bg-blue-100 text-blue-800 border border-blue-300",
            Self::Neutral => "bg-gray-100 text-gray-700 border border-gray-300",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_api_normalizes_spelling() {
        assert_eq!(Status::from_api("in-progress"), Status::InProgress);
        assert_eq!(Status::from_api("In Progress"), Status::InProgress);
        assert_eq!(Status::from_api("in_progress"), Status::InProgress);
        assert_eq!(Status::from_api("RESOLVED"), Status::Resolved);
        assert_eq!(Status::from_api(" draft "), Status::Draft);
        assert_eq!(Status::from_api("escalated"), Status::Unknown);
        assert_eq!(Status::from_api(""), Status::Unknown);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Status::InProgress.to_string(), "In Progress");
        assert_eq!(Status::Open.to_string(), "Open");
        assert_eq!(Status::from_active(false).to_string(), "Inactive");
    }

    #[test]
    fn test_tone_classification() {
        assert_eq!(Status::Active.tone(), StatusTone::Positive);
        assert_eq!(Status::Resolved.tone(), StatusTone::Positive);
        assert_eq!(Status::Inactive.tone(), StatusTone::Negative);
        assert_eq!(Status::Open.tone(), StatusTone::Negative);
        assert_eq!(Status::Draft.tone(), StatusTone::Warning);
        assert_eq!(Status::Unknown.tone(), StatusTone::Neutral);
        assert!(Status::Active.tone().class().contains("green"));
        assert!(Status::Inactive.tone().class().contains("red"));
    }

    #[test]
    fn test_api_value_round_trips_through_from_api() {
        for status in Status::COURSE_STATES {
            assert_eq!(Status::from_api(status.api_value()), status);
        }
        assert_eq!(Status::from_api(Status::InProgress.api_value()), Status::InProgress);
    }
}
