//! Session state: the bearer token and the signed-in admin.
//!
//! [`SessionStore`] is the only writer of session state. Login, logout and
//! 401 handling go through it; pages only read the token.

use serde::{Deserialize, Serialize};

/// Authenticated user as returned by `/auth/login` and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl SessionUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Two-letter avatar fallback.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// A stored token is being validated.
    #[default]
    Restoring,
    Anonymous,
    Authenticated(Session),
}

/// Coarse view of [`SessionState`] used by the route gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Restoring,
    Anonymous,
    Authenticated,
}

/// Persistent home of the bearer token between visits.
pub trait TokenStorage {
    fn load(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

/// In-memory storage for tests and server-side rendering.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: std::sync::Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: std::sync::Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn store(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

#[derive(Debug)]
pub struct SessionStore<S: TokenStorage> {
    storage: S,
    state: SessionState,
    /// Token read from storage while `state` is `Restoring`.
    pending_token: Option<String>,
}

impl<S: TokenStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: SessionState::Restoring,
            pending_token: None,
        }
    }

    /// Read the persisted token. Returns `None` and settles to `Anonymous`
    /// when nothing is stored.
    pub fn restore_token(&mut self) -> Option<String> {
        match self.storage.load().filter(|t| !t.trim().is_empty()) {
            Some(token) => {
                self.state = SessionState::Restoring;
                self.pending_token = Some(token.clone());
                Some(token)
            }
            None => {
                self.pending_token = None;
                self.state = SessionState::Anonymous;
                None
            }
        }
    }

    /// Complete a restore with the user returned by `/auth/me`, or with
    /// `None` when the stored token could not be validated.
    pub fn finish_restore(&mut self, user: Option<SessionUser>) {
        match (self.pending_token.take(), user) {
            (Some(token), Some(user)) => {
                self.state = SessionState::Authenticated(Session { token, user });
            }
            _ => self.state = SessionState::Anonymous,
        }
    }

    pub fn sign_in(&mut self, session: Session) {
        self.storage.store(&session.token);
        self.pending_token = None;
        self.state = SessionState::Authenticated(session);
    }

    pub fn sign_out(&mut self) {
        self.storage.clear();
        self.pending_token = None;
        self.state = SessionState::Anonymous;
    }

    /// Drop the session after a 401. Returns `true` if there was a session
    /// to drop, so callers log and redirect once.
    pub fn expire(&mut self) -> bool {
        let had_session = !matches!(self.state, SessionState::Anonymous);
        self.sign_out();
        had_session
    }

    /// Replace the cached profile after the user edits it.
    pub fn update_user(&mut self, user: SessionUser) {
        if let SessionState::Authenticated(session) = &mut self.state {
            session.user = user;
        }
    }

    /// Token to send with the next request. While restoring this is the
    /// stored token being validated.
    pub fn token(&self) -> Option<String> {
        match &self.state {
            SessionState::Authenticated(session) => Some(session.token.clone()),
            SessionState::Restoring => self.pending_token.clone(),
            SessionState::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match &self.state {
            SessionState::Authenticated(session) => Some(&session.user),
            _ => None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        match self.state {
            SessionState::Restoring => SessionPhase::Restoring,
            SessionState::Anonymous => SessionPhase::Anonymous,
            SessionState::Authenticated(_) => SessionPhase::Authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == SessionPhase::Authenticated
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    /// Check fields before any network call.
    pub fn validate(&self) -> Result<(), String> {
        if self.email.is_empty() {
            return Err("Email is required".to_string());
        }
        if !is_plausible_email(&self.email) {
            return Err("Please enter a valid email address".to_string());
        }
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        Ok(())
    }
}

/// `local@domain.tld` with no whitespace.
pub fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}
