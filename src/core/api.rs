//! Authenticated API client.
//!
//! [`ApiClient`] attaches the bearer token, classifies failures into
//! [`ApiError`] and reports 401s to the session through [`Credentials`].
//! It is generic over the [`Transport`] so the same code runs in the
//! browser, on the server and in tests.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::config::join_url;
use super::error::ApiError;
use super::http::{FilePart, HttpBody, HttpRequest, HttpResponse, Method, Transport};
use super::session::{SessionStore, TokenStorage};

pub const JSON_MIME: &str = "application/json";
pub const PDF_MIME: &str = "application/pdf";

/// Source of the bearer token and sink for session expiry.
pub trait Credentials {
    fn bearer_token(&self) -> Option<String>;

    /// Called once per request that came back 401.
    fn session_expired(&self);
}

impl<C: Credentials + ?Sized> Credentials for &C {
    fn bearer_token(&self) -> Option<String> {
        (**self).bearer_token()
    }

    fn session_expired(&self) {
        (**self).session_expired()
    }
}

impl<C: Credentials + ?Sized> Credentials for Rc<C> {
    fn bearer_token(&self) -> Option<String> {
        (**self).bearer_token()
    }

    fn session_expired(&self) {
        (**self).session_expired()
    }
}

impl<S: TokenStorage> Credentials for RefCell<SessionStore<S>> {
    fn bearer_token(&self) -> Option<String> {
        self.borrow().token()
    }

    fn session_expired(&self) {
        self.borrow_mut().expire();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(FilePart),
}

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub accept: &'static str,
    pub authenticated: bool,
    /// Token to use instead of the session's, e.g. right after login.
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            accept: JSON_MIME,
            authenticated: true,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn multipart(mut self, part: FilePart) -> Self {
        self.body = RequestBody::Multipart(part);
        self
    }

    pub fn accept(mut self, mime: &'static str) -> Self {
        self.accept = mime;
        self
    }

    /// Send without the session token (login).
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// Send with an explicit token that is not yet part of the session.
    pub fn with_bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    /// Absolute URL with an encoded query string.
    pub fn url(&self, base_url: &str) -> String {
        let mut url = join_url(base_url, &self.path);
        for (i, (key, value)) in self.query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    fn into_http(self, base_url: &str, token: Option<&str>) -> Result<HttpRequest, ApiError> {
        let url = self.url(base_url);
        let mut headers = vec![("Accept".to_string(), self.accept.to_string())];
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        // multipart boundaries are set by the transport
        let body = match self.body {
            RequestBody::Empty => HttpBody::Empty,
            RequestBody::Json(value) => {
                headers.push(("Content-Type".to_string(), JSON_MIME.to_string()));
                HttpBody::Json(serde_json::to_string(&value)?)
            }
            RequestBody::Multipart(part) => HttpBody::Multipart(part),
        };

        Ok(HttpRequest {
            method: self.method,
            url,
            headers,
            body,
        })
    }
}

/// Percent-encode a value used as a single path segment.
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Standard response wrapper: `{ success, data, total?, count?, message? }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: T,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Reject bodies that carry `success: false` with a 2xx status.
    pub fn into_result(self) -> Result<Self, ApiError> {
        if self.success == Some(false) {
            return Err(ApiError::Decode(
                self.message
                    .unwrap_or_else(|| "Invalid API response".to_string()),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient<T, C> {
    transport: T,
    credentials: C,
    base_url: String,
}

impl<T: Transport, C: Credentials> ApiClient<T, C> {
    pub fn new(transport: T, credentials: C, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            credentials,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    /// Send a request and return the raw response if it succeeded.
    ///
    /// Authenticated requests without a token fail with
    /// [`ApiError::MissingToken`] before touching the network.
    pub async fn send(&self, request: ApiRequest) -> Result<HttpResponse, ApiError> {
        let authenticated = request.authenticated;
        let token = match (&request.bearer, authenticated) {
            (Some(explicit), _) => Some(explicit.clone()),
            (None, true) => match self.credentials.bearer_token() {
                Some(token) => Some(token),
                None => return Err(ApiError::MissingToken),
            },
            (None, false) => None,
        };

        let http = request.into_http(&self.base_url, token.as_deref())?;
        let response = self.transport.send(http).await?;
        if response.is_success() {
            return Ok(response);
        }

        let err = ApiError::from_status(response.status, response.server_message());
        if authenticated && err == ApiError::Unauthorized {
            self.credentials.session_expired();
        }
        Err(err)
    }

    /// Decode the whole body.
    pub async fn fetch_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        self.send(request).await?.json()
    }

    /// Decode an [`Envelope`] and reject `success: false`.
    pub async fn fetch_envelope<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Envelope<R>, ApiError> {
        self.fetch_json::<Envelope<R>>(request).await?.into_result()
    }

    /// Decode the `data` field of an [`Envelope`].
    pub async fn fetch_data<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        Ok(self.fetch_envelope(request).await?.data)
    }

    /// Send and ignore the body.
    pub async fn fetch_unit(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    /// Download a binary body, insisting on `expected_mime`.
    pub async fn fetch_file(
        &self,
        request: ApiRequest,
        expected_mime: &'static str,
    ) -> Result<Vec<u8>, ApiError> {
        let response = self.send(request.accept(expected_mime)).await?;
        match response.media_type() {
            Some(actual) if actual == expected_mime => Ok(response.body),
            actual => Err(ApiError::UnexpectedContentType {
                expected: expected_mime.to_string(),
                actual: actual.unwrap_or_else(|| "unknown".to_string()),
            }),
        }
    }
}
