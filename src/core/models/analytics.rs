//! Revenue, enrollment and activity reports.

use derive_more::Display;
use serde::Deserialize;

use super::{PersonRef, present, text};
use crate::core::fetch::Blank;
use crate::core::format::{
    NOT_AVAILABLE, format_date, format_usd, group_thousands, month_abbrev, parse_timestamp,
};
use crate::core::listing::Searchable;
use crate::core::status::Status;

/// Bucketing granularity for the revenue report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Timeframe {
    #[display("Day")]
    Day,
    #[default]
    #[display("Month")]
    Month,
    #[display("Year")]
    Year,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Day, Timeframe::Month, Timeframe::Year];

    pub fn query_value(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Bucket label as the aggregation pipeline emits it: a string, a bare
/// number, or `{ year, month, day }` parts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BucketLabel {
    Text(String),
    Number(i64),
    Parts {
        #[serde(default)]
        year: Option<i64>,
        #[serde(default)]
        month: Option<u32>,
        #[serde(default)]
        day: Option<u32>,
    },
}

impl BucketLabel {
    pub fn display(&self, timeframe: Timeframe) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(n) => match (timeframe, u32::try_from(*n).ok().and_then(month_abbrev)) {
                (Timeframe::Month, Some(name)) => name.to_string(),
                _ => n.to_string(),
            },
            Self::Parts { year, month, day } => {
                let month = month.and_then(month_abbrev);
                match (day, month, year) {
                    (Some(d), Some(m), _) => format!("{m} {d}"),
                    (None, Some(m), Some(y)) => format!("{m} {y}"),
                    (None, Some(m), None) => m.to_string(),
                    (_, None, Some(y)) => y.to_string(),
                    _ => "?".to_string(),
                }
            }
        }
    }
}

/// Label keys seen across report endpoints, read side by side so a payload
/// carrying several of them still parses. `label` wins over `_id`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BucketKeys {
    #[serde(default)]
    label: Option<BucketLabel>,
    #[serde(rename = "_id", default)]
    id: Option<BucketLabel>,
    #[serde(default)]
    period: Option<BucketLabel>,
    #[serde(default)]
    date: Option<BucketLabel>,
}

impl BucketKeys {
    pub fn display(&self, timeframe: Timeframe) -> String {
        [&self.label, &self.id, &self.period, &self.date]
            .into_iter()
            .find_map(Option::as_ref)
            .map_or_else(|| "?".to_string(), |label| label.display(timeframe))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRevenueBucket {
    #[serde(flatten)]
    pub keys: BucketKeys,
    #[serde(default)]
    revenue: Option<f64>,
    #[serde(default)]
    total: Option<f64>,
    #[serde(default)]
    total_revenue: Option<f64>,
    #[serde(default)]
    amount: Option<f64>,
}

impl RawRevenueBucket {
    pub fn value(&self) -> f64 {
        self.revenue
            .or(self.total)
            .or(self.total_revenue)
            .or(self.amount)
            .unwrap_or_default()
    }
}

/// Either a bare bucket list or `{ buckets | revenue, total }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RevenuePayload {
    Buckets(Vec<RawRevenueBucket>),
    Wrapped {
        #[serde(alias = "revenue", alias = "data")]
        buckets: Vec<RawRevenueBucket>,
        #[serde(default, alias = "totalRevenue")]
        total: Option<f64>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueBucket {
    pub label: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueReport {
    pub timeframe: Timeframe,
    pub buckets: Vec<RevenueBucket>,
    pub total: f64,
}

impl RevenueReport {
    /// The total is always the bucket sum so the headline matches the chart.
    pub fn from_payload(timeframe: Timeframe, payload: RevenuePayload) -> Self {
        let raw = match payload {
            RevenuePayload::Buckets(buckets) | RevenuePayload::Wrapped { buckets, .. } => buckets,
        };
        let buckets: Vec<RevenueBucket> = raw
            .into_iter()
            .map(|b| RevenueBucket {
                label: b.keys.display(timeframe),
                revenue: b.value(),
            })
            .collect();
        let total = buckets.iter().map(|b| b.revenue).sum();
        Self {
            timeframe,
            buckets,
            total,
        }
    }

    pub fn formatted_total(&self) -> String {
        format_usd(self.total)
    }

    /// `(label, value)` pairs for the chart.
    pub fn series(&self) -> Vec<(String, f64)> {
        self.buckets
            .iter()
            .map(|b| (b.label.clone(), b.revenue))
            .collect()
    }
}

impl Blank for RevenueReport {
    fn is_blank(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawEnrollmentStat {
    #[serde(flatten)]
    pub keys: BucketKeys,
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    enrollments: Option<u64>,
    #[serde(default)]
    total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentPoint {
    pub label: String,
    pub count: u64,
}

impl From<RawEnrollmentStat> for EnrollmentPoint {
    fn from(raw: RawEnrollmentStat) -> Self {
        Self {
            label: raw.keys.display(Timeframe::Month),
            count: raw.count.or(raw.enrollments).or(raw.total).unwrap_or_default(),
        }
    }
}

/// `data` of `/admin/analytics/total-enrollments`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TotalEnrollments {
    Count(u64),
    Object {
        #[serde(alias = "total", alias = "count")]
        #[serde(rename = "totalEnrollments")]
        total_enrollments: u64,
    },
}

impl TotalEnrollments {
    pub fn value(&self) -> u64 {
        match *self {
            Self::Count(n) => n,
            Self::Object { total_enrollments } => total_enrollments,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentReport {
    pub points: Vec<EnrollmentPoint>,
    pub total: u64,
}

impl EnrollmentReport {
    pub fn formatted_total(&self) -> String {
        group_thousands(self.total)
    }

    pub fn series(&self) -> Vec<(String, f64)> {
        self.points
            .iter()
            .map(|p| (p.label.clone(), p.count as f64))
            .collect()
    }
}

impl Blank for EnrollmentReport {
    fn is_blank(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRef {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInstructorActivity {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub instructor: Option<PersonRef>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstructorActivityView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub course: String,
    pub created_at: String,
    /// Unix seconds for sorting.
    pub timestamp: i64,
}

impl From<RawInstructorActivity> for InstructorActivityView {
    fn from(raw: RawInstructorActivity) -> Self {
        let person = raw.instructor.unwrap_or_default();
        Self {
            name: person.full_name(),
            email: text(&person.email),
            course: text(&raw.title),
            created_at: format_date(raw.created_at.as_deref()),
            timestamp: timestamp(raw.created_at.as_deref()),
            id: raw.id,
        }
    }
}

impl Searchable for InstructorActivityView {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.name.as_str(), self.email.as_str(), self.course.as_str()]
    }
}

pub const NO_COURSE_ASSIGNED: &str = "No Course Assigned";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStudentActivity {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub student: Option<PersonRef>,
    #[serde(default)]
    pub course: Option<CourseRef>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentActivityView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub assignment: String,
    pub created_at: String,
    pub timestamp: i64,
}

impl From<RawStudentActivity> for StudentActivityView {
    fn from(raw: RawStudentActivity) -> Self {
        let person = raw.student.unwrap_or_default();
        Self {
            name: person.full_name(),
            email: text(&person.email),
            assignment: raw
                .course
                .and_then(|c| c.title)
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| NO_COURSE_ASSIGNED.to_string()),
            created_at: format_date(raw.created_at.as_deref()),
            timestamp: timestamp(raw.created_at.as_deref()),
            id: raw.id,
        }
    }
}

impl Searchable for StudentActivityView {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.name.as_str(),
            self.email.as_str(),
            self.assignment.as_str(),
        ]
    }
}

/// `course` arrives either as a bare title or as a populated course.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CourseField {
    Title(String),
    Course(CourseRef),
}

impl CourseField {
    fn title(self) -> Option<String> {
        match self {
            Self::Title(title) => Some(title),
            Self::Course(course) => course.title,
        }
    }
}

/// One row of `/admin/analytics/drop-out`: a student whose membership lapsed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDropOut {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(rename = "_id", default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub student: Option<PersonRef>,
    #[serde(default)]
    pub course: Option<CourseField>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<String>,
}

pub const NO_COURSE: &str = "No Course";
pub const NO_FEATURES: &str = "No features available";

#[derive(Debug, Clone, PartialEq)]
pub struct DropOutView {
    pub id: String,
    pub student_name: String,
    pub course: String,
    /// `$9.99`, or `N/A` when the plan had no price.
    pub price: String,
    pub features: Vec<String>,
    pub status: Status,
}

impl DropOutView {
    /// Features to list; a plan without any shows a single placeholder.
    pub fn feature_lines(&self) -> Vec<String> {
        if self.features.is_empty() {
            vec![NO_FEATURES.to_string()]
        } else {
            self.features.clone()
        }
    }
}

impl From<RawDropOut> for DropOutView {
    fn from(raw: RawDropOut) -> Self {
        let student_name = present(raw.student_name)
            .or_else(|| raw.student.map(|s| s.full_name()))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let course = raw
            .course
            .and_then(CourseField::title)
            .and_then(|t| present(Some(t)))
            .unwrap_or_else(|| NO_COURSE.to_string());
        let id = match (raw.object_id, raw.id) {
            (Some(id), _) => id,
            (None, Some(serde_json::Value::String(id))) => id,
            (None, Some(other)) if !other.is_null() => other.to_string(),
            _ => format!("{student_name}:{course}"),
        };
        Self {
            id,
            student_name,
            course,
            price: raw
                .price
                .filter(|p| *p > 0.0)
                .map_or_else(|| NOT_AVAILABLE.to_string(), |p| format!("${p:.2}")),
            features: raw
                .features
                .unwrap_or_default()
                .into_iter()
                .filter(|f| !f.trim().is_empty())
                .collect(),
            status: raw.status.as_deref().map_or(Status::Unknown, Status::from_api),
        }
    }
}

impl Searchable for DropOutView {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.student_name.as_str(), self.course.as_str()]
    }
}

fn timestamp(raw: Option<&str>) -> i64 {
    raw.and_then(parse_timestamp)
        .map(|dt| dt.timestamp())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_revenue_report() {
        let json = r#"[
            {"_id": 1, "revenue": 1000}, {"_id": 2, "revenue": 1500},
            {"_id": 3, "revenue": 900}, {"_id": 4, "revenue": 2000},
            {"_id": 5, "revenue": 1200}, {"_id": 6, "revenue": 800},
            {"_id": 7, "revenue": 1700}, {"_id": 8, "revenue": 1100},
            {"_id": 9, "revenue": 1300}, {"_id": 10, "revenue": 900},
            {"_id": 11, "revenue": 1000}, {"_id": 12, "revenue": 945}
        ]"#;
        let payload: RevenuePayload = serde_json::from_str(json).unwrap();
        let report = RevenueReport::from_payload(Timeframe::Month, payload);

        assert_eq!(report.buckets.len(), 12);
        assert_eq!(report.buckets[0].label, "Jan");
        assert_eq!(report.buckets[11].label, "Dec");
        assert_eq!(report.total, 14345.0);
        assert_eq!(report.formatted_total(), "$14,345");
    }

    #[test]
    fn test_wrapped_revenue_payload_uses_bucket_sum() {
        let json = r#"{"revenue":[{"label":"2024","total":500},{"label":"2025","total":250}],"total":999}"#;
        let payload: RevenuePayload = serde_json::from_str(json).unwrap();
        let report = RevenueReport::from_payload(Timeframe::Year, payload);

        assert_eq!(report.total, 750.0);
        assert_eq!(
            report.series(),
            vec![("2024".to_string(), 500.0), ("2025".to_string(), 250.0)]
        );
    }

    #[test]
    fn test_bucket_with_every_key_spelling_parses() {
        let json = r#"[{"_id":7,"label":"Jul","revenue":300,"total":999,"amount":1}]"#;
        let payload: RevenuePayload = serde_json::from_str(json).unwrap();
        let report = RevenueReport::from_payload(Timeframe::Month, payload);

        assert_eq!(report.buckets[0].label, "Jul");
        assert_eq!(report.total, 300.0);

        let raw: RawEnrollmentStat =
            serde_json::from_str(r#"{"_id":4,"period":"Apr","count":9,"total":50}"#).unwrap();
        assert_eq!(EnrollmentPoint::from(raw), EnrollmentPoint { label: "Apr".into(), count: 9 });
    }

    #[test]
    fn test_empty_report_resolves_to_empty_state() {
        use crate::core::fetch::{ResourceState, ViewState};

        let payload: RevenuePayload = serde_json::from_str("[]").unwrap();
        let mut revenue = ResourceState::new();
        let generation = revenue.begin(true).unwrap();
        revenue.resolve(generation, Ok(RevenueReport::from_payload(Timeframe::Month, payload)), "x");
        assert_eq!(revenue.view_state(), ViewState::Empty);

        let mut enrollments = ResourceState::new();
        let generation = enrollments.begin(true).unwrap();
        enrollments.resolve(generation, Ok(EnrollmentReport { points: Vec::new(), total: 0 }), "x");
        assert_eq!(enrollments.view_state(), ViewState::Empty);

        let json = r#"[{"_id":1,"revenue":10}]"#;
        let report = RevenueReport::from_payload(Timeframe::Month, serde_json::from_str(json).unwrap());
        let generation = revenue.begin(true).unwrap();
        revenue.resolve(generation, Ok(report), "x");
        assert_eq!(revenue.view_state(), ViewState::Ready);
    }

    #[test]
    fn test_bucket_label_parts() {
        let parts: BucketLabel = serde_json::from_str(r#"{"year":2025,"month":5,"day":12}"#).unwrap();
        assert_eq!(parts.display(Timeframe::Day), "May 12");

        let parts: BucketLabel = serde_json::from_str(r#"{"year":2025,"month":5}"#).unwrap();
        assert_eq!(parts.display(Timeframe::Month), "May 2025");

        assert_eq!(BucketLabel::Number(2025).display(Timeframe::Year), "2025");
        assert_eq!(BucketLabel::Number(3).display(Timeframe::Month), "Mar");
        assert_eq!(BucketLabel::Text("2025-05-12".into()).display(Timeframe::Day), "2025-05-12");
    }

    #[test]
    fn test_timeframe_query_values() {
        assert_eq!(Timeframe::default(), Timeframe::Month);
        assert_eq!(Timeframe::Day.query_value(), "day");
        assert_eq!(Timeframe::Year.to_string(), "Year");
    }

    #[test]
    fn test_total_enrollments_shapes() {
        let object: TotalEnrollments = serde_json::from_str(r#"{"totalEnrollments":321}"#).unwrap();
        let bare: TotalEnrollments = serde_json::from_str("42").unwrap();
        assert_eq!(object.value(), 321);
        assert_eq!(bare.value(), 42);
    }

    #[test]
    fn test_enrollment_points() {
        let raw: Vec<RawEnrollmentStat> =
            serde_json::from_str(r#"[{"_id":{"year":2025,"month":4},"count":12},{"label":"May","enrollments":30}]"#)
                .unwrap();
        let report = EnrollmentReport {
            points: raw.into_iter().map(EnrollmentPoint::from).collect(),
            total: 1042,
        };

        assert_eq!(report.points[0].label, "Apr 2025");
        assert_eq!(report.points[1].count, 30);
        assert_eq!(report.formatted_total(), "1,042");
        assert_eq!(report.series()[1], ("May".to_string(), 30.0));
    }

    #[test]
    fn test_instructor_activity_mapping() {
        let raw: RawInstructorActivity = serde_json::from_str(
            r#"{"_id":"a1","instructor":{"firstName":"Maya","lastName":"Chen","email":"maya@lms.io"},"title":"Rust 101","createdAt":"2025-05-12T10:00:00Z"}"#,
        )
        .unwrap();
        let view = InstructorActivityView::from(raw);

        assert_eq!(view.name, "Maya Chen");
        assert_eq!(view.course, "Rust 101");
        assert_eq!(view.created_at, "May 12, 2025");
        assert!(view.timestamp > 0);
    }

    #[test]
    fn test_drop_out_mapping() {
        let raw: Vec<RawDropOut> = serde_json::from_str(
            r#"[
                {"id":2,"studentName":"Jane Smith","course":"Web Development Pro","price":19.99,
                 "features":["Live webinars","1:1 mentor sessions"],"status":"Active"},
                {"_id":"d7","student":{"firstName":"Alex","lastName":"Johnson"},
                 "course":{"title":"Enterprise Learning"},"features":[],"status":"inactive"},
                {"studentName":"","price":0}
            ]"#,
        )
        .unwrap();
        let rows: Vec<DropOutView> = raw.into_iter().map(DropOutView::from).collect();

        assert_eq!(rows[0].id, "2");
        assert_eq!(rows[0].price, "$19.99");
        assert_eq!(rows[0].status, Status::Active);
        assert_eq!(rows[0].feature_lines().len(), 2);

        assert_eq!(rows[1].id, "d7");
        assert_eq!(rows[1].student_name, "Alex Johnson");
        assert_eq!(rows[1].course, "Enterprise Learning");
        assert_eq!(rows[1].status, Status::Inactive);
        assert_eq!(rows[1].feature_lines(), vec![NO_FEATURES.to_string()]);

        assert_eq!(rows[2].student_name, "N/A");
        assert_eq!(rows[2].course, NO_COURSE);
        assert_eq!(rows[2].price, "N/A");
        assert_eq!(rows[2].status, Status::Unknown);
    }

    #[test]
    fn test_student_activity_without_course() {
        let raw: RawStudentActivity = serde_json::from_str(
            r#"{"_id":"a2","student":{"firstName":"Jay","lastName":"Student","email":"jay@lms.io"}}"#,
        )
        .unwrap();
        let view = StudentActivityView::from(raw);

        assert_eq!(view.assignment, "No Course Assigned");
        assert_eq!(view.created_at, "N/A");
        assert_eq!(view.timestamp, 0);
    }
}
