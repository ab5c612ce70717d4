//! Typed backend operations.
//!
//! One method per route. Each decodes the raw records and maps them into
//! view models so pages never see backend JSON.

use serde::Deserialize;

use super::api::{ApiClient, ApiRequest, Credentials, Envelope, PDF_MIME, segment};
use super::error::ApiError;
use super::fetch::Paged;
use super::http::{FilePart, Transport};
use super::listing::SortOrder;
use super::models::*;
use super::session::{LoginCredentials, Session, SessionUser};
use super::status::Status;

/// Route table, relative to the API base URL.
pub mod paths {
    use super::segment;

    pub const LOGIN: &str = "/auth/login";
    pub const ME: &str = "/auth/me";
    pub const UPDATE_DETAILS: &str = "/auth/updatedetails";
    pub const INSTRUCTORS: &str = "/admin/users/instructors";
    pub const STUDENTS: &str = "/admin/users/students";
    pub const REVENUE: &str = "/admin/analytics/revenue";
    pub const ENROLLMENTS: &str = "/admin/analytics/enrollments";
    pub const TOTAL_ENROLLMENTS: &str = "/admin/analytics/total-enrollments";
    pub const INSTRUCTOR_ACTIVITY: &str = "/admin/analytics/instructor-activity";
    pub const STUDENT_ACTIVITY: &str = "/admin/analytics/student-activity";
    pub const DROP_OUTS: &str = "/admin/analytics/drop-out";
    pub const TICKETS: &str = "/admin/tickets";
    pub const CONTACTS: &str = "/contacts";

    pub fn toggle_student(id: &str) -> String {
        format!("{STUDENTS}/{}/toggle-active", segment(id))
    }

    pub fn instructor_courses(id: &str) -> String {
        format!("/admin/instructors/{}/courses", segment(id))
    }

    pub fn course(id: &str) -> String {
        format!("/admin/courses/{}", segment(id))
    }

    pub fn course_media(id: &str, suffix: &str) -> String {
        format!("{}/{suffix}", course(id))
    }

    pub fn ticket_download(id: &str) -> String {
        format!("{TICKETS}/{}/download", segment(id))
    }

    pub fn ticket_resolve(id: &str) -> String {
        format!("{TICKETS}/{}/resolve", segment(id))
    }
}

/// `POST /auth/login` answers either flat or inside `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LoginResponse {
    Flat {
        token: String,
        #[serde(default)]
        user: Option<SessionUser>,
    },
    Wrapped {
        data: LoginData,
    },
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
    #[serde(default)]
    user: Option<SessionUser>,
}

impl LoginResponse {
    fn into_parts(self) -> (String, Option<SessionUser>) {
        match self {
            Self::Flat { token, user } => (token, user),
            Self::Wrapped { data } => (data.token, data.user),
        }
    }
}

fn to_json<B: serde::Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

fn map_all<R, V: From<R>>(raw: Vec<R>) -> Vec<V> {
    raw.into_iter().map(V::from).collect()
}

impl<T: Transport, C: Credentials> ApiClient<T, C> {
    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    /// Exchange credentials for a session. When the login response has no
    /// user, the profile is fetched with the new token.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Session, ApiError> {
        credentials.validate().map_err(ApiError::InvalidRequest)?;

        let request = ApiRequest::post(paths::LOGIN)
            .anonymous()
            .json(to_json(credentials)?);
        let response = match self.send(request).await {
            Ok(response) => response,
            Err(ApiError::Unauthorized) | Err(ApiError::Validation { .. }) => {
                return Err(ApiError::InvalidCredentials);
            }
            Err(err) => return Err(err),
        };

        let (token, user) = response.json::<LoginResponse>()?.into_parts();
        let user = match user {
            Some(user) => user,
            None => {
                let me = ApiRequest::get(paths::ME).anonymous().with_bearer(&token);
                self.fetch_json::<Envelope<RawProfile>>(me)
                    .await?
                    .into_result()?
                    .data
                    .into_session_user()
            }
        };
        Ok(Session { token, user })
    }

    /// `GET /auth/me` with the current token.
    pub async fn current_profile(&self) -> Result<AdminProfile, ApiError> {
        let raw: RawProfile = self.fetch_data(ApiRequest::get(paths::ME)).await?;
        Ok(raw.into())
    }

    pub async fn current_user(&self) -> Result<SessionUser, ApiError> {
        Ok(self.current_profile().await?.session_user())
    }

    pub async fn update_profile(&self, form: &ProfileForm) -> Result<AdminProfile, ApiError> {
        let request = ApiRequest::put(paths::UPDATE_DETAILS).json(to_json(form)?);
        let raw: RawProfile = self.fetch_data(request).await?;
        Ok(raw.into())
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn instructors(&self) -> Result<Vec<InstructorView>, ApiError> {
        let raw: Vec<RawInstructor> = self.fetch_data(ApiRequest::get(paths::INSTRUCTORS)).await?;
        Ok(map_all(raw))
    }

    pub async fn enroll_instructor(&self, form: &InstructorForm) -> Result<InstructorView, ApiError> {
        let payload = form
            .validate()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let request = ApiRequest::post(paths::INSTRUCTORS).json(to_json(&payload)?);
        let raw: RawInstructor = self.fetch_data(request).await?;
        Ok(raw.into())
    }

    pub async fn students(&self) -> Result<Vec<StudentView>, ApiError> {
        let raw: Vec<RawStudent> = self.fetch_data(ApiRequest::get(paths::STUDENTS)).await?;
        Ok(map_all(raw))
    }

    pub async fn enroll_student(&self, form: &StudentForm) -> Result<StudentView, ApiError> {
        let payload = form
            .validate()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let request = ApiRequest::post(paths::STUDENTS).json(to_json(&payload)?);
        let raw: RawStudent = self.fetch_data(request).await?;
        Ok(raw.into())
    }

    /// Flip a student's active flag. Returns the new flag, taken from the
    /// response when present.
    pub async fn toggle_student_active(&self, id: &str, currently_active: bool) -> Result<bool, ApiError> {
        let response = self.send(ApiRequest::patch(paths::toggle_student(id))).await?;
        let reported = response
            .json::<Envelope<ActiveFlag>>()
            .ok()
            .and_then(|env| env.data.is_active);
        Ok(reported.unwrap_or(!currently_active))
    }

    // ------------------------------------------------------------------
    // Courses
    // ------------------------------------------------------------------

    pub async fn instructor_courses(&self, instructor_id: &str) -> Result<Vec<CourseView>, ApiError> {
        let raw: Vec<RawCourse> = self
            .fetch_data(ApiRequest::get(paths::instructor_courses(instructor_id)))
            .await?;
        Ok(map_all(raw))
    }

    pub async fn update_course(&self, id: &str, details: &CourseDetails) -> Result<CourseDetails, ApiError> {
        let details = details
            .validate()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let request = ApiRequest::put(paths::course(id)).json(to_json(&details)?);
        self.fetch_unit(request).await?;
        Ok(details)
    }

    pub async fn set_course_status(&self, id: &str, status: Status) -> Result<(), ApiError> {
        let request = ApiRequest::put(paths::course(id))
            .json(serde_json::json!({ "status": status.api_value() }));
        self.fetch_unit(request).await
    }

    pub async fn delete_course(&self, id: &str) -> Result<(), ApiError> {
        self.fetch_unit(ApiRequest::delete(paths::course(id))).await
    }

    /// Upload a thumbnail or promo video. The part's field name is forced
    /// to the one the backend expects.
    pub async fn upload_course_media(
        &self,
        id: &str,
        media: CourseMedia,
        mut file: FilePart,
    ) -> Result<(), ApiError> {
        file.field = media.field().to_string();
        let request = ApiRequest::post(paths::course_media(id, media.path())).multipart(file);
        self.fetch_unit(request).await
    }

    // ------------------------------------------------------------------
    // Analytics
    // ------------------------------------------------------------------

    pub async fn revenue(&self, timeframe: Timeframe) -> Result<RevenueReport, ApiError> {
        let request = ApiRequest::get(paths::REVENUE).query("timeframe", timeframe.query_value());
        let payload: RevenuePayload = self.fetch_data(request).await?;
        Ok(RevenueReport::from_payload(timeframe, payload))
    }

    pub async fn total_enrollments(&self) -> Result<u64, ApiError> {
        let total: TotalEnrollments = self
            .fetch_data(ApiRequest::get(paths::TOTAL_ENROLLMENTS))
            .await?;
        Ok(total.value())
    }

    pub async fn enrollment_report(&self) -> Result<EnrollmentReport, ApiError> {
        let raw: Vec<RawEnrollmentStat> = self.fetch_data(ApiRequest::get(paths::ENROLLMENTS)).await?;
        let total = self.total_enrollments().await?;
        Ok(EnrollmentReport {
            points: map_all(raw),
            total,
        })
    }

    /// Lapsed memberships. A missing `data` field means nobody dropped out.
    pub async fn drop_outs(&self) -> Result<Vec<DropOutView>, ApiError> {
        let raw: Option<Vec<RawDropOut>> = self.fetch_data(ApiRequest::get(paths::DROP_OUTS)).await?;
        Ok(map_all(raw.unwrap_or_default()))
    }

    pub async fn instructor_activity(
        &self,
        limit: usize,
        sort: SortOrder,
    ) -> Result<Vec<InstructorActivityView>, ApiError> {
        let request = ApiRequest::get(paths::INSTRUCTOR_ACTIVITY)
            .query("limit", limit)
            .query("sort", sort.query_value());
        let raw: Vec<RawInstructorActivity> = self.fetch_data(request).await?;
        let mut rows: Vec<InstructorActivityView> = map_all(raw);
        sort_by_time(&mut rows, sort, |r| r.timestamp);
        Ok(rows)
    }

    pub async fn student_activity(
        &self,
        limit: usize,
        sort: SortOrder,
    ) -> Result<Vec<StudentActivityView>, ApiError> {
        let request = ApiRequest::get(paths::STUDENT_ACTIVITY)
            .query("limit", limit)
            .query("sort", sort.query_value());
        let raw: Vec<RawStudentActivity> = self.fetch_data(request).await?;
        let mut rows: Vec<StudentActivityView> = map_all(raw);
        sort_by_time(&mut rows, sort, |r| r.timestamp);
        Ok(rows)
    }

    // ------------------------------------------------------------------
    // Tickets and contacts
    // ------------------------------------------------------------------

    pub async fn tickets(&self, query: &TicketQuery) -> Result<Paged<TicketView>, ApiError> {
        let request = query
            .query_pairs()
            .into_iter()
            .fold(ApiRequest::get(paths::TICKETS), |req, (k, v)| req.query(k, v));
        let envelope = self.fetch_envelope::<Vec<RawTicket>>(request).await?;
        let items: Vec<TicketView> = map_all(envelope.data);
        let total = envelope
            .total
            .or(envelope.count)
            .map(|t| t as usize)
            .unwrap_or(items.len());
        Ok(Paged { items, total })
    }

    /// PDF bytes of a ticket. Any other content type is an error and no
    /// bytes are returned.
    pub async fn download_ticket(&self, id: &str) -> Result<Vec<u8>, ApiError> {
        self.fetch_file(ApiRequest::get(paths::ticket_download(id)), PDF_MIME)
            .await
    }

    pub async fn resolve_ticket(&self, id: &str, resolution: &TicketResolution) -> Result<(), ApiError> {
        let request = ApiRequest::patch(paths::ticket_resolve(id)).json(to_json(resolution)?);
        self.fetch_unit(request).await
    }

    pub async fn contacts(&self) -> Result<Vec<ContactView>, ApiError> {
        let payload: ContactsPayload = self.fetch_json(ApiRequest::get(paths::CONTACTS)).await?;
        Ok(map_all(payload.into_contacts()))
    }
}

/// Keep activity rows in the requested order even if the backend ignores
/// the `sort` parameter. Stable, so equal timestamps keep backend order.
fn sort_by_time<R>(rows: &mut [R], sort: SortOrder, key: impl Fn(&R) -> i64) {
    match sort {
        SortOrder::Newest => rows.sort_by_key(|r| std::cmp::Reverse(key(r))),
        SortOrder::Oldest => rows.sort_by_key(key),
    }
}

pub const DOWNLOAD_NOT_PDF_MESSAGE: &str =
    "Failed to download ticket: Server did not return a PDF file.";

/// Inline message for a failed ticket download.
pub fn download_error_message(err: &ApiError) -> String {
    match err {
        ApiError::UnexpectedContentType { .. } => DOWNLOAD_NOT_PDF_MESSAGE.to_string(),
        other => format!(
            "Failed to download ticket: {}",
            other.user_message("Please try again later.")
        ),
    }
}

impl RawProfile {
    fn into_session_user(self) -> SessionUser {
        AdminProfile::from(self).session_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_encode_ids() {
        assert_eq!(paths::toggle_student("s1"), "/admin/users/students/s1/toggle-active");
        assert_eq!(paths::instructor_courses("i 1"), "/admin/instructors/i%201/courses");
        assert_eq!(
            paths::course_media("c1", CourseMedia::PromoVideo.path()),
            "/admin/courses/c1/promo-video"
        );
        assert_eq!(paths::ticket_download("t-9"), "/admin/tickets/t-9/download");
        assert_eq!(paths::ticket_resolve("t-9"), "/admin/tickets/t-9/resolve");
    }

    #[test]
    fn test_login_response_shapes() {
        let flat: LoginResponse = serde_json::from_str(
            r#"{"success":true,"token":"abc","user":{"_id":"u1","firstName":"Ada","lastName":"L","email":"a@b.co","role":"admin"}}"#,
        )
        .unwrap();
        let (token, user) = flat.into_parts();
        assert_eq!(token, "abc");
        assert_eq!(user.map(|u| u.first_name), Some("Ada".to_string()));

        let wrapped: LoginResponse =
            serde_json::from_str(r#"{"success":true,"data":{"token":"xyz"}}"#).unwrap();
        let (token, user) = wrapped.into_parts();
        assert_eq!(token, "xyz");
        assert!(user.is_none());
    }

    #[test]
    fn test_sort_by_time() {
        let mut rows = vec![3_i64, 1, 2];
        sort_by_time(&mut rows, SortOrder::Newest, |r| *r);
        assert_eq!(rows, vec![3, 2, 1]);
        sort_by_time(&mut rows, SortOrder::Oldest, |r| *r);
        assert_eq!(rows, vec![1, 2, 3]);
    }

    #[test]
    fn test_download_error_message() {
        let wrong_type = ApiError::UnexpectedContentType {
            expected: "application/pdf".into(),
            actual: "text/html".into(),
        };
        assert_eq!(
            download_error_message(&wrong_type),
            "Failed to download ticket: Server did not return a PDF file."
        );
        assert_eq!(
            download_error_message(&ApiError::NotFound),
            "Failed to download ticket: Resource not found."
        );
    }
}
