//! Login page component
//!
//! A standalone page for admin login, redirects to the dashboard on success.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::ui::auth::{LoginForm, use_auth_context};

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_context();

    // Redirect if already authenticated
    Effect::new(move |_| {
        if auth.is_authenticated() {
            let navigate = use_navigate();
            navigate("/", Default::default());
        }
    });

    let on_success = move |_| {
        let navigate = use_navigate();
        navigate("/", Default::default());
    };

    view! {
        <div class="min-h-screen bg-gray-50 flex items-center justify-center p-4">
            <div class="w-full max-w-md card p-8">
                <LoginForm on_success=Callback::new(on_success) />
            </div>
        </div>
    }
}
