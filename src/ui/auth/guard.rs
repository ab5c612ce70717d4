//! Route gate for admin screens

use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_auth_context;
use crate::core::session::SessionPhase;
use crate::ui::common::LoadingSpinner;

/// Renders `children` only for an authenticated session.
///
/// Shows a spinner while a stored token is being validated and redirects
/// to `/login` once the session is anonymous, including after a 401.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth_context();
    let phase = Memo::new(move |_| auth.phase());

    move || match phase.get() {
        SessionPhase::Restoring => view! {
            <div class="min-h-screen flex items-center justify-center">
                <LoadingSpinner message="Checking your session..." />
            </div>
        }
        .into_any(),
        SessionPhase::Anonymous => view! { <Redirect path="/login" /> }.into_any(),
        SessionPhase::Authenticated => children().into_any(),
    }
}
