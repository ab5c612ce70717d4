//! Authenticated fetch hooks shared by every screen.
//!
//! [`use_api_list`] and [`use_api_resource`] run the whole lifecycle: wait
//! for a dependency change, check the token, abort the previous request,
//! fetch, and apply the result only if it is still the newest one.

use std::future::Future;

use futures::future::{AbortHandle, Abortable};
use leptos::logging::{error, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::auth::{AuthContext, use_auth_context};
use super::transport::BrowserTransport;
use crate::core::api::{ApiClient, Credentials};
use crate::core::config::Config;
use crate::core::error::ApiError;
use crate::core::fetch::{ListViewModel, Paged, Resolution, ResourceState};

pub type AdminClient = ApiClient<BrowserTransport, AuthContext>;

/// API client bound to the app's config and session.
pub fn use_api_client() -> AdminClient {
    let config = expect_context::<Config>();
    let auth = use_auth_context();
    ApiClient::new(
        BrowserTransport::new(config.request_timeout_ms),
        auth,
        config.api_base_url,
    )
}

/// A list screen's model plus a manual refresh trigger.
pub struct ApiList<T: Send + Sync + 'static> {
    pub model: RwSignal<ListViewModel<T>>,
    refresh: RwSignal<u64>,
}

impl<T: Send + Sync + 'static> Clone for ApiList<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ApiList<T> {}

impl<T: Send + Sync + 'static> ApiList<T> {
    /// Fetch again with the same dependencies.
    pub fn refresh(&self) {
        self.refresh.update(|n| *n += 1);
    }
}

/// A single-payload screen's state plus a manual refresh trigger.
pub struct ApiResource<T: Send + Sync + 'static> {
    pub state: RwSignal<ResourceState<T>>,
    refresh: RwSignal<u64>,
}

impl<T: Send + Sync + 'static> Clone for ApiResource<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ApiResource<T> {}

impl<T: Send + Sync + 'static> ApiResource<T> {
    pub fn refresh(&self) {
        self.refresh.update(|n| *n += 1);
    }
}

/// The in-flight request of one hook; a new trigger aborts the old one.
#[derive(Clone, Copy)]
struct InFlight(StoredValue<Option<AbortHandle>>);

impl InFlight {
    fn new() -> Self {
        let inflight = Self(StoredValue::new(None));
        on_cleanup(move || inflight.abort());
        inflight
    }

    fn abort(&self) {
        if let Some(handle) = self.0.try_update_value(Option::take).flatten() {
            handle.abort();
        }
    }

    /// Abort the previous request and register a new one.
    fn replace<F: Future>(&self, future: F) -> Abortable<F> {
        self.abort();
        let (handle, registration) = AbortHandle::new_pair();
        self.0.set_value(Some(handle));
        Abortable::new(future, registration)
    }
}

fn report(resolution: &Resolution, fallback: &str) {
    if let Resolution::Failed { requires_login } = resolution {
        if *requires_login {
            warn!("{fallback} Session is no longer valid");
        } else {
            error!("{fallback}");
        }
    }
}

/// Token memo shared by the hooks so a login, logout or 401 refetches.
fn token_memo(client: &AdminClient) -> Memo<bool> {
    let auth = *client.credentials();
    Memo::new(move |_| auth.session.with(|s| s.token().is_some()))
}

/// Keep a list model in sync with `fetch(client, deps())`.
///
/// `deps` is tracked: any signal it reads (page, sort, date range) triggers
/// a new fetch. Failed fetches keep the previous items and set `error`
/// from `fallback` unless the server sent a message.
pub fn use_api_list<T, K, F, Fut>(
    deps: impl Fn() -> K + 'static,
    fetch: F,
    fallback: &'static str,
) -> ApiList<T>
where
    T: Send + Sync + 'static,
    K: 'static,
    F: Fn(AdminClient, K) -> Fut + 'static,
    Fut: Future<Output = Result<Paged<T>, ApiError>> + 'static,
{
    let client = use_api_client();
    let mut initial = ListViewModel::new();
    // first render shows the spinner, not an empty table
    initial.loading = true;
    let model = RwSignal::new(initial);
    let refresh = RwSignal::new(0u64);
    let has_token = token_memo(&client);
    let inflight = InFlight::new();

    Effect::new(move |_| {
        refresh.track();
        has_token.track();
        let key = deps();

        let token_present = client.credentials().bearer_token().is_some();
        let Some(generation) = model.try_update(|m| m.begin(token_present)).flatten() else {
            inflight.abort();
            warn!("{fallback} No authentication token");
            return;
        };

        let request = inflight.replace(fetch(client.clone(), key));
        spawn_local(async move {
            let result = request.await.unwrap_or(Err(ApiError::Cancelled));
            if let Some(resolution) = model.try_update(|m| m.resolve(generation, result, fallback)) {
                report(&resolution, fallback);
            }
        });
    });

    ApiList { model, refresh }
}

/// Keep a single payload in sync with `fetch(client, deps())`.
pub fn use_api_resource<T, K, F, Fut>(
    deps: impl Fn() -> K + 'static,
    fetch: F,
    fallback: &'static str,
) -> ApiResource<T>
where
    T: Send + Sync + 'static,
    K: 'static,
    F: Fn(AdminClient, K) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_api_client();
    let mut initial = ResourceState::new();
    initial.loading = true;
    let state = RwSignal::new(initial);
    let refresh = RwSignal::new(0u64);
    let has_token = token_memo(&client);
    let inflight = InFlight::new();

    Effect::new(move |_| {
        refresh.track();
        has_token.track();
        let key = deps();

        let token_present = client.credentials().bearer_token().is_some();
        let Some(generation) = state.try_update(|s| s.begin(token_present)).flatten() else {
            inflight.abort();
            warn!("{fallback} No authentication token");
            return;
        };

        let request = inflight.replace(fetch(client.clone(), key));
        spawn_local(async move {
            let result = request.await.unwrap_or(Err(ApiError::Cancelled));
            if let Some(resolution) = state.try_update(|s| s.resolve(generation, result, fallback)) {
                report(&resolution, fallback);
            }
        });
    });

    ApiResource { state, refresh }
}
