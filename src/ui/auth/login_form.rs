//! Admin sign-in form

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::{login, use_auth_context};
use crate::core::session::LoginCredentials;
use crate::ui::common::{ErrorMessage, FormField, Spinner, SpinnerSize};
use crate::ui::fetch::use_api_client;
use crate::ui::icon::{Icon, icons};

/// Email/password form. Credentials are checked locally first; a rejected
/// form never reaches the network.
#[component]
pub fn LoginForm(
    /// Runs once the session is signed in
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();
    let client = use_api_client();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let invalid = RwSignal::new(None::<String>);

    // local validation first, then whatever the backend said
    let error = Signal::derive(move || invalid.get().or_else(|| auth.error.get()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.clear_error();

        let credentials = LoginCredentials::new(email.get_untracked(), password.get_untracked());
        if let Err(reason) = credentials.validate() {
            invalid.set(Some(reason));
            return;
        }
        invalid.set(None);

        let client = client.clone();
        spawn_local(async move {
            if login(&client, credentials).await.is_ok()
                && let Some(callback) = on_success
            {
                callback.run(());
            }
        });
    };

    let edit = move |field: RwSignal<String>| {
        Callback::new(move |value: String| {
            field.set(value);
            invalid.set(None);
        })
    };

    let edit_password = edit(password);

    view! {
        <form on:submit=on_submit class="space-y-5">
            <div class="text-center">
                <h2 class="text-2xl font-bold text-gray-900">"Admin Login"</h2>
                <p class="mt-2 subtitle">"Sign in to manage courses, people and support"</p>
            </div>

            <ErrorMessage error=error />

            <FormField
                label="Email"
                input_type="email"
                placeholder="admin@example.com"
                value=email
                on_input=edit(email)
                disabled=auth.loading
            />

            <div class="space-y-1.5">
                <label for="password" class="label">"Password"</label>
                <div class="relative">
                    <input
                        id="password"
                        type=move || if show_password.get() { "text" } else { "password" }
                        autocomplete="current-password"
                        placeholder="Enter your password"
                        class="input-base pr-10"
                        prop:value=move || password.get()
                        on:input=move |ev| edit_password.run(event_target_value(&ev))
                        disabled=move || auth.loading.get()
                    />
                    <button
                        type="button"
                        class="absolute inset-y-0 right-0 px-3 flex items-center opacity-60 hover:opacity-100"
                        aria-label="Toggle password visibility"
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || {
                            let name = if show_password.get() { icons::EYE_CLOSED } else { icons::EYE };
                            view! { <Icon name=name class="h-5 w-5" /> }
                        }}
                    </button>
                </div>
            </div>

            <button type="submit" class="btn-primary w-full" disabled=move || auth.loading.get()>
                <Show when=move || auth.loading.get() fallback=|| "Sign In">
                    <Spinner size=SpinnerSize::Small />
                    <span class="ml-2">"Signing in..."</span>
                </Show>
            </button>
        </form>
    }
}
