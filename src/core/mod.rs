//! Core domain models and business logic for the LMS admin dashboard

pub mod api;
pub mod chart;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod fetch;
pub mod format;
pub mod http;
pub mod layout;
pub mod listing;
pub mod models;
#[cfg(feature = "ssr")]
pub mod native;
pub mod session;
pub mod status;
#[cfg(test)]
mod tests;

pub use api::{ApiClient, ApiRequest, Credentials};
pub use error::{ApiError, TransportError};
pub use session::{Session, SessionStore, SessionUser, TokenStorage};
pub use status::{Status, StatusTone};
