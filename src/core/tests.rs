#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::executor::block_on;
    use serde_json::json;

    use crate::core::api::ApiClient;
    use crate::core::error::{ApiError, TransportError};
    use crate::core::fetch::{ListViewModel, Paged, Resolution, ViewState};
    use crate::core::http::{FilePart, HttpBody, HttpRequest, HttpResponse, Method, Transport};
    use crate::core::listing::SortOrder;
    use crate::core::models::*;
    use crate::core::session::{
        LoginCredentials, Session, SessionPhase, SessionStore, SessionUser, TokenStorage,
    };

    type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError>>;

    /// Answers every request through `respond` and keeps a copy of it.
    struct RecordingTransport {
        log: Rc<RefCell<Vec<HttpRequest>>>,
        respond: Responder,
    }

    impl Transport for RecordingTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let response = (self.respond)(&request);
            self.log.borrow_mut().push(request);
            response
        }
    }

    /// Token storage the test can inspect after the store has taken it.
    #[derive(Clone, Default)]
    struct SharedStorage(Rc<RefCell<Option<String>>>);

    impl TokenStorage for SharedStorage {
        fn load(&self) -> Option<String> {
            self.0.borrow().clone()
        }

        fn store(&self, token: &str) {
            *self.0.borrow_mut() = Some(token.to_string());
        }

        fn clear(&self) {
            *self.0.borrow_mut() = None;
        }
    }

    type Store = Rc<RefCell<SessionStore<SharedStorage>>>;
    type TestClient = ApiClient<RecordingTransport, Store>;

    struct Harness {
        client: TestClient,
        store: Store,
        storage: SharedStorage,
        log: Rc<RefCell<Vec<HttpRequest>>>,
    }

    impl Harness {
        fn calls(&self) -> usize {
            self.log.borrow().len()
        }

        fn request(&self, index: usize) -> HttpRequest {
            self.log.borrow()[index].clone()
        }
    }

    fn json_response(status: u16, body: serde_json::Value) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            content_type: Some("application/json; charset=utf-8".to_string()),
            body: body.to_string().into_bytes(),
        })
    }

    fn admin() -> SessionUser {
        SessionUser {
            id: "u1".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@lms.io".into(),
            role: "admin".into(),
            avatar: None,
        }
    }

    fn harness(
        signed_in: bool,
        respond: impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + 'static,
    ) -> Harness {
        let storage = SharedStorage::default();
        let mut store = SessionStore::new(storage.clone());
        if signed_in {
            store.sign_in(Session {
                token: "tok".into(),
                user: admin(),
            });
        } else {
            store.restore_token();
        }
        let store = Rc::new(RefCell::new(store));
        let log = Rc::new(RefCell::new(Vec::new()));
        let transport = RecordingTransport {
            log: log.clone(),
            respond: Box::new(respond),
        };
        Harness {
            client: ApiClient::new(transport, store.clone(), "http://api.test/v1"),
            store,
            storage,
            log,
        }
    }

    #[test]
    fn test_missing_token_never_hits_network() {
        let h = harness(false, |_| json_response(200, json!({"success": true, "data": []})));

        assert_eq!(block_on(h.client.instructors()), Err(ApiError::MissingToken));
        assert_eq!(block_on(h.client.students()), Err(ApiError::MissingToken));
        assert_eq!(h.calls(), 0);
    }

    #[test]
    fn test_list_model_reports_missing_token() {
        let mut model: ListViewModel<InstructorView> = ListViewModel::new();

        assert_eq!(model.begin(false), None);
        assert!(!model.loading);
        assert_eq!(
            model.view_state(0),
            ViewState::Error("No authentication token found. Please log in.".into())
        );
    }

    #[test]
    fn test_requests_carry_bearer_token() {
        let h = harness(true, |_| json_response(200, json!({"success": true, "data": []})));

        let rows = block_on(h.client.instructor_activity(20, SortOrder::Oldest)).unwrap();
        assert!(rows.is_empty());

        let sent = h.request(0);
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.header("Authorization"), Some("Bearer tok"));
        assert_eq!(
            sent.url,
            "http://api.test/v1/admin/analytics/instructor-activity?limit=20&sort=createdAt%3Aasc"
        );
    }

    #[test]
    fn test_unauthorized_clears_session() {
        let h = harness(true, |_| json_response(401, json!({"message": "jwt expired"})));
        assert_eq!(h.storage.load(), Some("tok".to_string()));

        let result = block_on(h.client.students());

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert!(result.unwrap_err().requires_login());
        assert_eq!(h.store.borrow().phase(), SessionPhase::Anonymous);
        assert_eq!(h.storage.load(), None);

        // the next call short-circuits
        assert_eq!(block_on(h.client.students()), Err(ApiError::MissingToken));
        assert_eq!(h.calls(), 1);
    }

    #[test]
    fn test_server_error_keeps_previous_rows() {
        let h = harness(true, |_| json_response(500, json!({"message": "db down"})));
        let mut model: ListViewModel<StudentView> = ListViewModel::new();
        let seeded = StudentView::from(RawStudent {
            id: "s1".into(),
            first_name: Some("Grace".into()),
            ..Default::default()
        });

        let generation = model.begin(true).unwrap();
        model.resolve(generation, Ok(Paged::from(vec![seeded.clone()])), "unused");

        let generation = model.begin(true).unwrap();
        let outcome = model.resolve(
            generation,
            block_on(h.client.students()).map(Paged::from),
            "Failed to load students",
        );

        assert_eq!(outcome, Resolution::Failed { requires_login: false });
        assert_eq!(model.items, vec![seeded]);
        assert_eq!(model.error.as_deref(), Some("db down"));
        assert_eq!(h.store.borrow().phase(), SessionPhase::Authenticated);
    }

    #[test]
    fn test_enrolled_instructor_is_prepended() {
        let h = harness(true, |req| match req.method {
            Method::Get => json_response(
                200,
                json!({"success": true, "data": [
                    {"_id": "i1", "firstName": "Old", "lastName": "Timer", "email": "old@lms.io"}
                ]}),
            ),
            _ => json_response(
                201,
                json!({"success": true, "data":
                    {"_id": "i2", "firstName": "New", "lastName": "Hire", "email": "new@lms.io", "isActive": true}
                }),
            ),
        });
        let mut model: ListViewModel<InstructorView> = ListViewModel::new();
        let generation = model.begin(true).unwrap();
        model.resolve(generation, block_on(h.client.instructors()).map(Paged::from), "");

        let form = InstructorForm {
            first_name: "New".into(),
            last_name: "Hire".into(),
            email: "new@lms.io".into(),
            expertise: "rust, wasm".into(),
            is_active: true,
            ..Default::default()
        };
        let created = block_on(h.client.enroll_instructor(&form)).unwrap();
        model.prepend(created);

        assert_eq!(model.items.len(), 2);
        assert_eq!(model.items[0].id, "i2");
        assert_eq!(model.items[0].full_name, "New Hire");
        assert_eq!(model.items[1].id, "i1");

        let post = h.request(1);
        assert_eq!(post.method, Method::Post);
        let HttpBody::Json(body) = post.body else {
            panic!("expected a json body");
        };
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["expertise"], json!(["rust", "wasm"]));
    }

    #[test]
    fn test_invalid_enrollment_is_rejected_locally() {
        let h = harness(true, |_| json_response(201, json!({"success": true, "data": {}})));
        let form = StudentForm {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "not-an-email".into(),
            ..Default::default()
        };

        let result = block_on(h.client.enroll_student(&form));

        assert_eq!(
            result,
            Err(ApiError::InvalidRequest("Please enter a valid email address".into()))
        );
        assert_eq!(h.calls(), 0);
    }

    #[test]
    fn test_toggle_twice_restores_status() {
        let h = harness(true, |_| json_response(200, json!({"success": true, "data": {}})));
        let mut model: ListViewModel<StudentView> = ListViewModel::new();
        model.prepend(StudentView::from(RawStudent {
            id: "s1".into(),
            is_active: Some(true),
            ..Default::default()
        }));
        let original = model.items[0].status();

        for _ in 0..2 {
            let current = model.items[0].is_active;
            let next = block_on(h.client.toggle_student_active("s1", current)).unwrap();
            model.update_where(|s| s.id == "s1", |s| s.is_active = next);
        }

        assert_eq!(model.items[0].status(), original);
        assert_eq!(h.calls(), 2);
        for i in 0..2 {
            let sent = h.request(i);
            assert_eq!(sent.method, Method::Patch);
            assert!(sent.url.ends_with("/admin/users/students/s1/toggle-active"));
        }
    }

    #[test]
    fn test_toggle_prefers_reported_flag() {
        let h = harness(true, |_| {
            json_response(200, json!({"success": true, "data": {"isActive": true}}))
        });
        assert_eq!(block_on(h.client.toggle_student_active("s1", true)), Ok(true));
    }

    #[test]
    fn test_monthly_revenue_has_one_point_per_bucket() {
        let h = harness(true, |req| {
            assert!(req.url.ends_with("/admin/analytics/revenue?timeframe=month"));
            let buckets: Vec<_> = (1..=12)
                .map(|m| json!({"_id": {"year": 2025, "month": m}, "revenue": 1000 + m * 10}))
                .collect();
            json_response(200, json!({"success": true, "data": buckets}))
        });

        let report = block_on(h.client.revenue(Timeframe::Month)).unwrap();
        let geometry = crate::core::chart::layout(
            &report.series(),
            crate::core::chart::ChartFrame::default(),
            4,
        );

        assert_eq!(report.buckets.len(), 12);
        assert_eq!(geometry.points.len(), 12);
        assert_eq!(report.buckets[0].label, "Jan 2025");
        assert_eq!(report.formatted_total(), "$12,780");
    }

    #[test]
    fn test_drop_outs_read_the_analytics_route() {
        let h = harness(true, |req| {
            assert!(req.url.ends_with("/admin/analytics/drop-out"));
            json_response(
                200,
                json!({"success": true, "data": [
                    {"id": 1, "studentName": "John Doe", "course": "Intro to Coding", "price": 9.99,
                     "features": ["Community forums"], "status": "Active"}
                ]}),
            )
        });

        let rows = block_on(h.client.drop_outs()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].student_name, "John Doe");
        assert_eq!(rows[0].price, "$9.99");

        let empty = harness(true, |_| json_response(200, json!({"success": true})));
        assert_eq!(block_on(empty.client.drop_outs()), Ok(Vec::new()));
    }

    #[test]
    fn test_ticket_download_requires_pdf() {
        let h = harness(true, |req| {
            if req.url.contains("/t1/") {
                Ok(HttpResponse {
                    status: 200,
                    content_type: Some("application/pdf".into()),
                    body: b"%PDF-1.7".to_vec(),
                })
            } else {
                Ok(HttpResponse {
                    status: 200,
                    content_type: Some("text/html".into()),
                    body: b"<html></html>".to_vec(),
                })
            }
        });

        assert_eq!(block_on(h.client.download_ticket("t1")), Ok(b"%PDF-1.7".to_vec()));
        assert_eq!(h.request(0).header("Accept"), Some("application/pdf"));

        let err = block_on(h.client.download_ticket("t2")).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedContentType { .. }));
        assert_eq!(
            crate::core::endpoints::download_error_message(&err),
            "Failed to download ticket: Server did not return a PDF file."
        );
    }

    #[test]
    fn test_tickets_use_server_total() {
        let h = harness(true, |_| {
            json_response(
                200,
                json!({"success": true, "total": 42, "data": [
                    {"_id": "t1", "user": {"firstName": "Ada", "lastName": "L"}, "status": "in-progress", "category": "billing"}
                ]}),
            )
        });
        let query = TicketQuery::current_month(
            chrono::NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(),
            10,
        );

        let page = block_on(h.client.tickets(&query)).unwrap();

        assert_eq!(page.total, 42);
        assert_eq!(page.items[0].category, "Billing");
        assert_eq!(page.items[0].status, crate::core::status::Status::InProgress);
        assert_eq!(
            h.request(0).url,
            "http://api.test/v1/admin/tickets?startDate=2025-05-01&endDate=2025-05-12&page=1&limit=10"
        );
    }

    #[test]
    fn test_course_media_upload_uses_backend_field() {
        let h = harness(true, |_| json_response(200, json!({"success": true, "data": {}})));
        let file = FilePart {
            field: "file".into(),
            file_name: "promo.mp4".into(),
            mime_type: "video/mp4".into(),
            bytes: vec![0, 1],
        };

        block_on(h.client.upload_course_media("c1", CourseMedia::PromoVideo, file)).unwrap();

        let sent = h.request(0);
        assert!(sent.url.ends_with("/admin/courses/c1/promo-video"));
        let HttpBody::Multipart(part) = sent.body else {
            panic!("expected multipart");
        };
        assert_eq!(part.field, "promoVideo");
    }

    #[test]
    fn test_login_with_user_in_response() {
        let h = harness(false, |_| {
            json_response(
                200,
                json!({"success": true, "token": "fresh", "user": {"_id": "u1", "firstName": "Ada", "role": "admin"}}),
            )
        });

        let session = block_on(h.client.login(&LoginCredentials::new(" ada@lms.io ", "secret"))).unwrap();

        assert_eq!(session.token, "fresh");
        assert_eq!(session.user.first_name, "Ada");
        assert_eq!(h.calls(), 1);
        assert_eq!(h.request(0).header("Authorization"), None);

        h.store.borrow_mut().sign_in(session);
        assert_eq!(h.storage.load(), Some("fresh".to_string()));
    }

    #[test]
    fn test_login_fetches_profile_when_user_missing() {
        let h = harness(false, |req| {
            if req.url.ends_with("/auth/login") {
                json_response(200, json!({"success": true, "data": {"token": "fresh"}}))
            } else {
                json_response(
                    200,
                    json!({"success": true, "data": {"_id": "u1", "firstName": "Ada", "lastName": "Lovelace", "email": "ada@lms.io"}}),
                )
            }
        });

        let session = block_on(h.client.login(&LoginCredentials::new("ada@lms.io", "secret"))).unwrap();

        assert_eq!(session.user.full_name(), "Ada Lovelace");
        assert_eq!(h.calls(), 2);
        assert_eq!(h.request(1).header("Authorization"), Some("Bearer fresh"));
    }

    #[test]
    fn test_login_rejection_is_invalid_credentials() {
        let h = harness(false, |_| json_response(401, json!({"message": "Invalid credentials"})));

        let result = block_on(h.client.login(&LoginCredentials::new("ada@lms.io", "wrong")));

        assert_eq!(result, Err(ApiError::InvalidCredentials));
        assert_eq!(
            result.unwrap_err().user_message(""),
            "Invalid email or password."
        );
    }

    #[test]
    fn test_restore_with_rejected_token_ends_anonymous() {
        let storage = SharedStorage::default();
        storage.store("stale");
        let store = Rc::new(RefCell::new(SessionStore::new(storage.clone())));
        assert_eq!(store.borrow_mut().restore_token(), Some("stale".to_string()));

        let log = Rc::new(RefCell::new(Vec::new()));
        let client = ApiClient::new(
            RecordingTransport {
                log: log.clone(),
                respond: Box::new(|_| json_response(401, json!({}))),
            },
            store.clone(),
            "http://api.test",
        );

        let user = block_on(client.current_user()).ok();
        store.borrow_mut().finish_restore(user);

        assert_eq!(store.borrow().phase(), SessionPhase::Anonymous);
        assert_eq!(storage.load(), None);
        assert_eq!(log.borrow()[0].header("Authorization"), Some("Bearer stale"));
    }

    #[test]
    fn test_network_failure_message() {
        let h = harness(true, |_| Err(TransportError::Network("connection refused".into())));

        let err = block_on(h.client.contacts()).unwrap_err();

        assert!(err.is_transient());
        assert_eq!(
            err.user_message("Failed to load contacts"),
            "Failed to fetch data. Please try again later."
        );
    }
}
