//! Auth context for the admin session
//!
//! This module provides a reactive authentication context that:
//! - Wraps the [`SessionStore`] in a signal so every page sees one session
//! - Restores a stored token after hydration and validates it with `/auth/me`
//! - Is the single session-expiry hook for 401 responses

use leptos::logging::warn;
use leptos::prelude::*;
#[cfg(not(feature = "ssr"))]
use leptos::task::spawn_local;

use crate::core::api::Credentials;
use crate::core::config::Config;
use crate::core::error::ApiError;
use crate::core::session::{LoginCredentials, SessionPhase, SessionStore, SessionUser};
use crate::ui::auth_utils::BrowserTokenStorage;
use crate::ui::fetch::AdminClient;

const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again later.";

/// Auth context providing the session and login state
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    /// Token and user; only login, logout and 401 handling write here
    pub session: RwSignal<SessionStore<BrowserTokenStorage>>,
    /// Loading state for the login request
    pub loading: RwSignal<bool>,
    /// Error message from the last login attempt
    pub error: RwSignal<Option<String>>,
}

impl AuthContext {
    pub fn phase(&self) -> SessionPhase {
        self.session.with(|s| s.phase())
    }

    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.phase() == SessionPhase::Authenticated
    }

    /// Get current user (if authenticated)
    pub fn user(&self) -> Option<SessionUser> {
        self.session.with(|s| s.user().cloned())
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Drop the session and the stored token.
    pub fn logout(&self) {
        self.session.update(|s| s.sign_out());
        log_session_event("signed out");
    }

    /// Refresh the cached user after a profile edit.
    pub fn update_user(&self, user: SessionUser) {
        self.session.update(|s| s.update_user(user));
    }
}

impl Credentials for AuthContext {
    /// Uses `with_untracked` since this is called from request code, not views
    fn bearer_token(&self) -> Option<String> {
        self.session.try_with_untracked(|s| s.token()).flatten()
    }

    fn session_expired(&self) {
        let had_session = self.session.try_update(|s| s.expire()).unwrap_or(false);
        if had_session {
            warn!("Session expired; redirecting to login");
        }
    }
}

fn log_session_event(event: &str) {
    leptos::logging::log!("session {event}");
}

/// Provide auth context to the component tree
pub fn provide_auth_context(config: &Config) -> AuthContext {
    // Start in Restoring on both server and client to avoid hydration mismatch
    let storage = BrowserTokenStorage::new(config.token_storage_key.clone());
    let ctx = AuthContext {
        session: RwSignal::new(SessionStore::new(storage)),
        loading: RwSignal::new(false),
        error: RwSignal::new(None),
    };

    // Validate the stored token after hydration (client-side only)
    #[cfg(not(feature = "ssr"))]
    {
        use crate::core::ApiClient;
        use crate::ui::transport::BrowserTransport;

        let timeout_ms = config.request_timeout_ms;
        let base_url = config.api_base_url.clone();
        let session = ctx.session;

        Effect::new(move |_| {
            let pending = session.try_update(|s| s.restore_token()).flatten();
            if pending.is_none() {
                return;
            }

            let client = ApiClient::new(BrowserTransport::new(timeout_ms), ctx, base_url.clone());
            spawn_local(async move {
                let user = match client.current_user().await {
                    Ok(user) => Some(user),
                    Err(err) => {
                        warn!("Stored token rejected: {err}");
                        None
                    }
                };
                session.update(|s| s.finish_restore(user));
            });
        });
    }

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Login with email and password.
///
/// Validation failures and backend rejections end up in `error` of the
/// client's [`AuthContext`]; nothing is sent when validation fails.
pub async fn login(client: &AdminClient, credentials: LoginCredentials) -> Result<(), ApiError> {
    let ctx = *client.credentials();
    ctx.loading.set(true);
    ctx.error.set(None);

    let result = client.login(&credentials).await;

    ctx.loading.set(false);

    match result {
        Ok(session) => {
            ctx.session.update(|s| s.sign_in(session));
            log_session_event("signed in");
            Ok(())
        }
        Err(err) => {
            warn!("Login failed: {err}");
            ctx.error.set(Some(err.user_message(LOGIN_FAILED_MESSAGE)));
            Err(err)
        }
    }
}
