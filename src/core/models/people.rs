//! Instructors and students.

use serde::{Deserialize, Serialize};

use super::{FormError, present, text};
use crate::core::format::{format_date, join_or_na, or_na, split_list};
use crate::core::listing::Searchable;
use crate::core::session::is_plausible_email;
use crate::core::status::Status;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInstructor {
    #[serde(rename = "_id")]
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
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub expertise: Option<Vec<String>>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub total_students: Option<u64>,
    #[serde(default)]
    pub total_courses: Option<u64>,
    #[serde(default)]
    pub earnings: Option<f64>,
    #[serde(default)]
    pub social_links: Option<SocialLinks>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstructorView {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub expertise: String,
    pub bio: String,
    pub total_courses: u64,
    pub total_students: u64,
    pub rating: f64,
    pub earnings: f64,
    pub is_active: bool,
    pub is_verified: bool,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub joined: String,
    pub last_login: String,
}

impl InstructorView {
    pub fn status(&self) -> Status {
        Status::from_active(self.is_active)
    }
}

impl From<RawInstructor> for InstructorView {
    fn from(raw: RawInstructor) -> Self {
        let links = raw.social_links.unwrap_or_default();
        Self {
            full_name: super::full_name(raw.first_name.as_deref(), raw.last_name.as_deref()),
            email: text(&raw.email),
            phone: or_na(raw.phone.as_deref()),
            avatar: present(raw.avatar),
            expertise: join_or_na(&raw.expertise.unwrap_or_default()),
            bio: or_na(raw.bio.as_deref()),
            total_courses: raw.total_courses.unwrap_or_default(),
            total_students: raw.total_students.unwrap_or_default(),
            rating: raw.rating.unwrap_or_default(),
            earnings: raw.earnings.unwrap_or_default(),
            is_active: raw.is_active.unwrap_or(false),
            is_verified: raw.is_verified.unwrap_or(false),
            linkedin: present(links.linkedin),
            twitter: present(links.twitter),
            joined: format_date(raw.created_at.as_deref()),
            last_login: format_date(raw.last_login.as_deref()),
            id: raw.id,
        }
    }
}

impl Searchable for InstructorView {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.full_name.as_str(),
            self.email.as_str(),
            self.expertise.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub date_earned: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(default)]
    pub course: Option<serde_json::Value>,
    #[serde(default)]
    pub enrollment_date: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub progress: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStudent {
    #[serde(rename = "_id")]
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
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub points: Option<u64>,
    #[serde(default)]
    pub badges: Option<Vec<Badge>>,
    #[serde(default)]
    pub enrolled_courses: Option<Vec<Enrollment>>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentView {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub skills: String,
    pub interests: String,
    pub points: u64,
    pub badge_count: usize,
    pub enrolled_count: usize,
    pub completed_count: usize,
    pub education: String,
    pub occupation: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub joined: String,
    pub last_login: String,
}

impl StudentView {
    pub fn status(&self) -> Status {
        Status::from_active(self.is_active)
    }
}

impl From<RawStudent> for StudentView {
    fn from(raw: RawStudent) -> Self {
        let enrolled = raw.enrolled_courses.unwrap_or_default();
        Self {
            full_name: super::full_name(raw.first_name.as_deref(), raw.last_name.as_deref()),
            email: text(&raw.email),
            phone: or_na(raw.phone.as_deref()),
            avatar: present(raw.avatar),
            skills: join_or_na(&raw.skills.unwrap_or_default()),
            interests: join_or_na(&raw.interests.unwrap_or_default()),
            points: raw.points.unwrap_or_default(),
            badge_count: raw.badges.map(|b| b.len()).unwrap_or_default(),
            enrolled_count: enrolled.len(),
            completed_count: enrolled
                .iter()
                .filter(|e| e.completed.unwrap_or(false))
                .count(),
            education: or_na(raw.education.as_deref()),
            occupation: or_na(raw.occupation.as_deref()),
            is_active: raw.is_active.unwrap_or(false),
            is_verified: raw.is_verified.unwrap_or(false),
            joined: format_date(raw.created_at.as_deref()),
            last_login: format_date(raw.last_login.as_deref()),
            id: raw.id,
        }
    }
}

impl Searchable for StudentView {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.full_name.as_str(), self.email.as_str()]
    }
}

/// Response of the toggle-active endpoint; only `isActive` matters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveFlag {
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Enroll-instructor form as typed by the admin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstructorForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: String,
    /// Comma-separated.
    pub expertise: String,
    pub bio: String,
    pub linkedin: String,
    pub twitter: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInstructor {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub expertise: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub social_links: SocialLinks,
    pub is_active: bool,
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(value.to_string())
    }
}

fn valid_email(value: &str) -> Result<String, FormError> {
    let email = required(value, "Email")?;
    if is_plausible_email(&email) {
        Ok(email)
    } else {
        Err(FormError::InvalidEmail)
    }
}

fn optional(value: &str) -> Option<String> {
    present(Some(value.trim().to_string()))
}

impl InstructorForm {
    pub fn validate(&self) -> Result<NewInstructor, FormError> {
        Ok(NewInstructor {
            first_name: required(&self.first_name, "First name")?,
            last_name: required(&self.last_name, "Last name")?,
            email: valid_email(&self.email)?,
            phone: optional(&self.phone),
            avatar: optional(&self.avatar),
            expertise: split_list(&self.expertise),
            bio: optional(&self.bio),
            social_links: SocialLinks {
                linkedin: optional(&self.linkedin),
                twitter: optional(&self.twitter),
            },
            is_active: self.is_active,
        })
    }
}

/// Enroll-student form as typed by the admin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: String,
    /// Comma-separated.
    pub skills: String,
    /// Comma-separated.
    pub interests: String,
    pub education: String,
    pub occupation: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    pub is_active: bool,
}

impl StudentForm {
    pub fn validate(&self) -> Result<NewStudent, FormError> {
        Ok(NewStudent {
            first_name: required(&self.first_name, "First name")?,
            last_name: required(&self.last_name, "Last name")?,
            email: valid_email(&self.email)?,
            phone: optional(&self.phone),
            avatar: optional(&self.avatar),
            skills: split_list(&self.skills),
            interests: split_list(&self.interests),
            education: optional(&self.education),
            occupation: optional(&self.occupation),
            is_active: self.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::listing::filter_items;

    const INSTRUCTOR_JSON: &str = r#"{
        "_id": "6650a1",
        "firstName": "Maya",
        "lastName": "Chen",
        "email": "maya@lms.io",
        "phone": null,
        "isActive": true,
        "isVerified": true,
        "expertise": ["Rust", "Systems"],
        "rating": 4.8,
        "totalStudents": 120,
        "totalCourses": 3,
        "earnings": 5400.5,
        "socialLinks": {"linkedin": "https://linkedin.com/in/maya", "twitter": ""},
        "createdAt": "2025-05-12T08:30:00.000Z"
    }"#;

    #[test]
    fn test_instructor_mapping() {
        let raw: RawInstructor = serde_json::from_str(INSTRUCTOR_JSON).unwrap();
        let view = InstructorView::from(raw);

        assert_eq!(view.id, "6650a1");
        assert_eq!(view.full_name, "Maya Chen");
        assert_eq!(view.phone, "N/A");
        assert_eq!(view.expertise, "Rust, Systems");
        assert_eq!(view.total_courses, 3);
        assert_eq!(view.joined, "May 12, 2025");
        assert_eq!(view.last_login, "N/A");
        assert_eq!(view.linkedin.as_deref(), Some("https://linkedin.com/in/maya"));
        assert_eq!(view.twitter, None);
        assert_eq!(view.status(), Status::Active);
    }

    #[test]
    fn test_instructor_with_minimal_fields() {
        let raw: RawInstructor = serde_json::from_str(r#"{"_id":"x"}"#).unwrap();
        let view = InstructorView::from(raw);

        assert_eq!(view.full_name, "Unknown");
        assert_eq!(view.expertise, "N/A");
        assert_eq!(view.bio, "N/A");
        assert_eq!(view.status(), Status::Inactive);
    }

    #[test]
    fn test_student_mapping_counts_enrollments() {
        let raw: RawStudent = serde_json::from_str(
            r#"{
                "_id": "s1",
                "firstName": "Jay",
                "lastName": "Student",
                "email": "jayp78088@gmail.com",
                "isActive": false,
                "skills": ["HTML", "CSS"],
                "interests": [],
                "points": 40,
                "badges": [{"icon": "star", "dateEarned": "2025-04-01"}],
                "enrolledCourses": [
                    {"course": "c1", "completed": true, "progress": 100},
                    {"course": {"_id": "c2", "title": "Rust"}, "completed": false, "progress": 20}
                ]
            }"#,
        )
        .unwrap();
        let view = StudentView::from(raw);

        assert_eq!(view.full_name, "Jay Student");
        assert_eq!(view.skills, "HTML, CSS");
        assert_eq!(view.interests, "N/A");
        assert_eq!(view.enrolled_count, 2);
        assert_eq!(view.completed_count, 1);
        assert_eq!(view.badge_count, 1);
        assert_eq!(view.status(), Status::Inactive);
    }

    #[test]
    fn test_student_search_matches_name_and_email() {
        let students: Vec<StudentView> = [
            r#"{"_id":"a1","firstName":"Jay","lastName":"Student","email":"js@lms.io"}"#,
            r#"{"_id":"a2","firstName":"Priya","lastName":"Shah","email":"jayp78088@gmail.com"}"#,
            r#"{"_id":"a3","firstName":"Tom","lastName":"Reed","email":"tom@lms.io"}"#,
        ]
        .iter()
        .map(|json| StudentView::from(serde_json::from_str::<RawStudent>(json).unwrap()))
        .collect();

        let matched = filter_items(&students, "jay");
        assert_eq!(matched.len(), 2);
        assert_eq!(filter_items(&students, "A3")[0].full_name, "Tom Reed");
    }

    #[test]
    fn test_instructor_form_validation() {
        let mut form = InstructorForm {
            first_name: " Maya ".into(),
            last_name: "Chen".into(),
            email: "maya@lms.io".into(),
            expertise: "Rust, , Systems".into(),
            is_active: true,
            ..Default::default()
        };

        let payload = form.validate().unwrap();
        assert_eq!(payload.first_name, "Maya");
        assert_eq!(payload.expertise, vec!["Rust", "Systems"]);
        assert_eq!(payload.phone, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["firstName"], "Maya");
        assert_eq!(json["isActive"], true);
        assert!(json.get("phone").is_none());

        form.last_name = "  ".into();
        assert_eq!(form.validate(), Err(FormError::Required("Last name")));

        form.last_name = "Chen".into();
        form.email = "maya".into();
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));
    }

    #[test]
    fn test_student_form_splits_lists() {
        let form = StudentForm {
            first_name: "Jay".into(),
            last_name: "Student".into(),
            email: "jay@lms.io".into(),
            skills: "HTML,CSS , ".into(),
            interests: "web".into(),
            ..Default::default()
        };

        let payload = form.validate().unwrap();
        assert_eq!(payload.skills, vec!["HTML", "CSS"]);
        assert_eq!(payload.interests, vec!["web"]);
        assert!(!payload.is_active);
    }
}
