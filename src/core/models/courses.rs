//! Courses and the edits the course editor sends.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::{FormError, present, text};
use crate::core::format::{format_date, format_usd};
use crate::core::listing::Searchable;
use crate::core::status::Status;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCourse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub promo_video: Option<String>,
    #[serde(default)]
    pub total_lessons: Option<u64>,
    /// Either a count or the list of enrolled student ids.
    #[serde(default)]
    pub enrolled_students: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseView {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub category: String,
    pub sub_category: String,
    pub level: String,
    pub status: Status,
    pub price: String,
    pub rating: f64,
    pub thumbnail: Option<String>,
    pub promo_video: Option<String>,
    pub total_lessons: u64,
    pub enrolled: u64,
    pub created: String,
}

fn count_of(value: Option<&serde_json::Value>) -> u64 {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().unwrap_or_default(),
        Some(serde_json::Value::Array(items)) => items.len() as u64,
        _ => 0,
    }
}

impl From<RawCourse> for CourseView {
    fn from(raw: RawCourse) -> Self {
        Self {
            title: present(raw.title).unwrap_or_else(|| "Untitled course".to_string()),
            subtitle: text(&raw.subtitle),
            description: text(&raw.description),
            category: text(&raw.category),
            sub_category: text(&raw.sub_category),
            level: text(&raw.level),
            status: raw
                .status
                .as_deref()
                .map(Status::from_api)
                .unwrap_or(Status::Draft),
            price: match raw.price {
                Some(p) if p > 0.0 => format_usd(p),
                _ => "Free".to_string(),
            },
            rating: raw.rating.unwrap_or_default(),
            thumbnail: present(raw.thumbnail),
            promo_video: present(raw.promo_video),
            total_lessons: raw.total_lessons.unwrap_or_default(),
            enrolled: count_of(raw.enrolled_students.as_ref()),
            created: format_date(raw.created_at.as_deref()),
            id: raw.id,
        }
    }
}

impl Searchable for CourseView {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.title.as_str(), self.category.as_str()]
    }
}

/// Editable course details, sent with `PUT /admin/courses/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetails {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub category: String,
    pub sub_category: String,
    pub level: String,
}

impl CourseDetails {
    pub fn from_view(course: &CourseView) -> Self {
        Self {
            title: course.title.clone(),
            subtitle: course.subtitle.clone(),
            description: course.description.clone(),
            category: course.category.clone(),
            sub_category: course.sub_category.clone(),
            level: course.level.clone(),
        }
    }

    pub fn validate(&self) -> Result<Self, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::Required("Course title"));
        }
        Ok(Self {
            title: self.title.trim().to_string(),
            ..self.clone()
        })
    }

    /// Copy the saved details back onto a list row.
    pub fn apply_to(&self, course: &mut CourseView) {
        course.title = self.title.clone();
        course.subtitle = self.subtitle.clone();
        course.description = self.description.clone();
        course.category = self.category.clone();
        course.sub_category = self.sub_category.clone();
        course.level = self.level.clone();
    }
}

/// Course media uploads and their multipart field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CourseMedia {
    #[display("thumbnail")]
    Thumbnail,
    #[display("promo video")]
    PromoVideo,
}

impl CourseMedia {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::PromoVideo => "promoVideo",
        }
    }

    /// Path suffix under `/admin/courses/:id/`.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::PromoVideo => "promo-video",
        }
    }

    /// `accept` attribute for the file input.
    pub fn accept(&self) -> &'static str {
        match self {
            Self::Thumbnail => "image/*",
            Self::PromoVideo => "video/*",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_mapping() {
        let raw: RawCourse = serde_json::from_str(
            r#"{
                "_id": "c1",
                "title": "Rust for Admins",
                "subCategory": "Systems",
                "status": "published",
                "price": 1999,
                "rating": 4.5,
                "totalLessons": 24,
                "enrolledStudents": ["s1", "s2", "s3"],
                "createdAt": "2025-02-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        let view = CourseView::from(raw);

        assert_eq!(view.title, "Rust for Admins");
        assert_eq!(view.sub_category, "Systems");
        assert_eq!(view.status, Status::Published);
        assert_eq!(view.price, "$1,999");
        assert_eq!(view.enrolled, 3);
        assert_eq!(view.created, "Feb 1, 2025");
    }

    #[test]
    fn test_course_defaults() {
        let raw: RawCourse =
            serde_json::from_str(r#"{"_id":"c2","title":"","enrolledStudents":7}"#).unwrap();
        let view = CourseView::from(raw);

        assert_eq!(view.title, "Untitled course");
        assert_eq!(view.status, Status::Draft);
        assert_eq!(view.price, "Free");
        assert_eq!(view.enrolled, 7);
        assert_eq!(view.thumbnail, None);
    }

    #[test]
    fn test_course_details_validation() {
        let details = CourseDetails {
            title: "   ".into(),
            ..Default::default()
        };
        assert_eq!(details.validate(), Err(FormError::Required("Course title")));
        assert_eq!(
            FormError::Required("Course title").to_string(),
            "Course title is required"
        );

        let details = CourseDetails {
            title: " Rust ".into(),
            sub_category: "Systems".into(),
            ..Default::default()
        };
        let valid = details.validate().unwrap();
        assert_eq!(valid.title, "Rust");

        let json = serde_json::to_value(&valid).unwrap();
        assert_eq!(json["subCategory"], "Systems");
    }

    #[test]
    fn test_apply_details_to_row() {
        let mut course = CourseView::from(RawCourse {
            id: "c1".into(),
            title: Some("Old".into()),
            ..Default::default()
        });
        let details = CourseDetails {
            title: "New".into(),
            level: "Beginner".into(),
            ..CourseDetails::from_view(&course)
        };
        details.apply_to(&mut course);

        assert_eq!(course.title, "New");
        assert_eq!(course.level, "Beginner");
    }

    #[test]
    fn test_media_fields() {
        assert_eq!(CourseMedia::Thumbnail.field(), "thumbnail");
        assert_eq!(CourseMedia::PromoVideo.field(), "promoVideo");
        assert_eq!(CourseMedia::PromoVideo.path(), "promo-video");
        assert_eq!(CourseMedia::PromoVideo.to_string(), "promo video");
    }
}
