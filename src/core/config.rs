//! Application configuration from environment variables.
//!
//! The server loads configuration using `Config::from_env()` after calling
//! `dotenvy::dotenv()`. The browser bundle uses `Config::bundled()`, which
//! reads the same variables at compile time.

use thiserror::Error;

/// Backend used when `LMS_API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "https://lms-backend-flwq.onrender.com/api/v1";

/// Requests slower than this are reported as timeouts.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Rows per page for client-side pagination.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// localStorage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "authToken";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be an http(s) URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the REST backend, without a trailing slash
    /// Example: https://lms-backend-flwq.onrender.com/api/v1
    pub api_base_url: String,

    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u32,

    /// Rows per page on client-side paginated screens
    pub page_size: usize,

    /// localStorage key for the bearer token
    pub token_storage_key: String,

    /// Overrides the Leptos `site-addr` when set (`LMS_LISTEN_ADDR`)
    pub listen_addr: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Configuration baked into the client bundle at compile time.
    ///
    /// Invalid values fall back to defaults because the browser has no
    /// place to report a startup error.
    pub fn bundled() -> Self {
        let baked = |name: &str| match name {
            "LMS_API_BASE_URL" => option_env!("LMS_API_BASE_URL").map(str::to_string),
            "LMS_REQUEST_TIMEOUT_MS" => option_env!("LMS_REQUEST_TIMEOUT_MS").map(str::to_string),
            "LMS_PAGE_SIZE" => option_env!("LMS_PAGE_SIZE").map(str::to_string),
            _ => None,
        };
        Self::from_lookup(baked).unwrap_or_default()
    }

    /// Build a config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = match non_empty(lookup("LMS_API_BASE_URL")) {
            Some(url) => parse_base_url("LMS_API_BASE_URL", &url)?,
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        let request_timeout_ms = match non_empty(lookup("LMS_REQUEST_TIMEOUT_MS")) {
            Some(raw) => parse_positive("LMS_REQUEST_TIMEOUT_MS", &raw)?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        let page_size = match non_empty(lookup("LMS_PAGE_SIZE")) {
            Some(raw) => parse_positive("LMS_PAGE_SIZE", &raw)?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            api_base_url,
            request_timeout_ms,
            page_size,
            token_storage_key: TOKEN_STORAGE_KEY.to_string(),
            listen_addr: non_empty(lookup("LMS_LISTEN_ADDR")),
        })
    }

    /// Absolute URL for an API path such as `/auth/me`.
    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.api_base_url, path)
    }

    /// Check if a non-default backend is configured
    pub fn has_custom_backend(&self) -> bool {
        self.api_base_url != DEFAULT_API_BASE_URL
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            page_size: DEFAULT_PAGE_SIZE,
            token_storage_key: TOKEN_STORAGE_KEY.to_string(),
            listen_addr: None,
        }
    }
}

/// Join a base URL and a path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_base_url(name: &'static str, value: &str) -> Result<String, ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        })
    }
}

fn parse_positive<N>(name: &'static str, value: &str) -> Result<N, ConfigError>
where
    N: std::str::FromStr + Default + PartialOrd,
{
    match value.parse::<N>() {
        Ok(n) if n > N::default() => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        }),
    }
}
