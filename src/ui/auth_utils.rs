//! Bearer token persistence in `localStorage`

use crate::core::session::TokenStorage;

/// Keeps the token under a single `localStorage` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserTokenStorage {
    key: String,
}

impl BrowserTokenStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[cfg(not(feature = "ssr"))]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(not(feature = "ssr"))]
impl TokenStorage for BrowserTokenStorage {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(&self.key).ok()?
    }

    fn store(&self, token: &str) {
        if let Some(storage) = local_storage()
            && storage.set_item(&self.key, token).is_err()
        {
            leptos::logging::warn!("Failed to persist auth token");
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

/// No storage on the server; every render starts anonymous-pending.
#[cfg(feature = "ssr")]
impl TokenStorage for BrowserTokenStorage {
    fn load(&self) -> Option<String> {
        None
    }

    fn store(&self, _token: &str) {}

    fn clear(&self) {}
}
