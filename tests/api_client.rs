//! End-to-end checks of the API client against a local mock backend.

#![cfg(feature = "ssr")]

use std::cell::RefCell;

use axum::Router;
use axum::body::Bytes;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use serde_json::json;

use lms_admin::core::ApiClient;
use lms_admin::core::error::ApiError;
use lms_admin::core::http::FilePart;
use lms_admin::core::models::{CourseMedia, Timeframe};
use lms_admin::core::native::ReqwestTransport;
use lms_admin::core::session::{MemoryTokenStorage, Session, SessionPhase, SessionStore, SessionUser};

const TOKEN: &str = "integration-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {TOKEN}").as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(json!({"success": false, "message": "Not authorized"})),
    )
        .into_response()
}

async fn instructors(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    axum::Json(json!({"success": true, "data": [
        {"_id": "i1", "firstName": "Ada", "lastName": "Lovelace", "email": "ada@lms.io", "isActive": true}
    ]}))
    .into_response()
}

async fn revenue(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    axum::Json(json!({"success": true, "data": {
        "revenue": [
            {"_id": {"year": 2025, "month": 1}, "revenue": 1200.5},
            {"_id": {"year": 2025, "month": 2}, "revenue": 800}
        ],
        "totalRevenue": 99999
    }}))
    .into_response()
}

async fn download(Path(id): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if id == "pdf" {
        ([(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.4 ticket".to_vec()).into_response()
    } else {
        ([(header::CONTENT_TYPE, "text/html")], "<h1>login</h1>").into_response()
    }
}

async fn toggle(Path(_id): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    axum::Json(json!({"success": true, "data": {"isActive": false}})).into_response()
}

async fn thumbnail(Path(_id): Path<String>, headers: HeaderMap, body: Bytes) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let text = String::from_utf8_lossy(&body);
    if content_type.starts_with("multipart/form-data") && text.contains("name=\"thumbnail\"") {
        axum::Json(json!({"success": true, "data": {}})).into_response()
    } else {
        (StatusCode::BAD_REQUEST, axum::Json(json!({"message": "thumbnail missing"}))).into_response()
    }
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/v1/admin/users/instructors", get(instructors))
        .route("/api/v1/admin/users/students/{id}/toggle-active", patch(toggle))
        .route("/api/v1/admin/analytics/revenue", get(revenue))
        .route("/api/v1/admin/tickets/{id}/download", get(download))
        .route("/api/v1/admin/courses/{id}/thumbnail", post(thumbnail));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/v1")
}

type Store = RefCell<SessionStore<MemoryTokenStorage>>;

fn signed_in(token: &str) -> Store {
    let mut store = SessionStore::new(MemoryTokenStorage::default());
    store.sign_in(Session {
        token: token.to_string(),
        user: SessionUser {
            id: "u1".into(),
            first_name: "Ada".into(),
            role: "admin".into(),
            ..Default::default()
        },
    });
    RefCell::new(store)
}

#[tokio::test]
async fn test_lists_instructors_with_token() {
    let base = spawn_backend().await;
    let store = signed_in(TOKEN);
    let client = ApiClient::new(ReqwestTransport::new(5_000).unwrap(), &store, base);

    let rows = client.instructors().await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].full_name, "Ada Lovelace");
    assert!(rows[0].is_active);
}

#[tokio::test]
async fn test_rejected_token_ends_session() {
    let base = spawn_backend().await;
    let store = signed_in("stale-token");
    let client = ApiClient::new(ReqwestTransport::new(5_000).unwrap(), &store, base);

    let result = client.instructors().await;

    assert_eq!(result, Err(ApiError::Unauthorized));
    assert_eq!(store.borrow().phase(), SessionPhase::Anonymous);
    assert_eq!(store.borrow().token(), None);
}

#[tokio::test]
async fn test_revenue_total_is_bucket_sum() {
    let base = spawn_backend().await;
    let store = signed_in(TOKEN);
    let client = ApiClient::new(ReqwestTransport::new(5_000).unwrap(), &store, base);

    let report = client.revenue(Timeframe::Month).await.unwrap();

    assert_eq!(report.buckets.len(), 2);
    assert_eq!(report.total, 2000.5);
    assert_eq!(report.formatted_total(), "$2,001");
}

#[tokio::test]
async fn test_ticket_download_content_type() {
    let base = spawn_backend().await;
    let store = signed_in(TOKEN);
    let client = ApiClient::new(ReqwestTransport::new(5_000).unwrap(), &store, base);

    let bytes = client.download_ticket("pdf").await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let err = client.download_ticket("html").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::UnexpectedContentType {
            expected: "application/pdf".into(),
            actual: "text/html".into(),
        }
    );
}

#[tokio::test]
async fn test_toggle_uses_reported_flag() {
    let base = spawn_backend().await;
    let store = signed_in(TOKEN);
    let client = ApiClient::new(ReqwestTransport::new(5_000).unwrap(), &store, base);

    assert_eq!(client.toggle_student_active("s1", true).await, Ok(false));
}

#[tokio::test]
async fn test_thumbnail_upload_is_multipart() {
    let base = spawn_backend().await;
    let store = signed_in(TOKEN);
    let client = ApiClient::new(ReqwestTransport::new(5_000).unwrap(), &store, base);
    let file = FilePart {
        field: String::new(),
        file_name: "cover.png".into(),
        mime_type: "image/png".into(),
        bytes: vec![0x89, b'P', b'N', b'G'],
    };

    let result = client
        .upload_course_media("c1", CourseMedia::Thumbnail, file)
        .await;

    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let store = signed_in(TOKEN);
    let client = ApiClient::new(
        ReqwestTransport::new(2_000).unwrap(),
        &store,
        "http://127.0.0.1:9/api/v1",
    );

    let err = client.instructors().await.unwrap_err();

    assert!(err.is_transient());
}
