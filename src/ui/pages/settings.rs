//! Admin profile settings.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::models::{AdminProfile, PROFILE_UPDATED_MESSAGE, ProfileForm, profile_error_message};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{Avatar, DataView, Detail, ErrorMessage, FormField, SuccessMessage, bind};
use crate::ui::fetch::{ApiResource, use_api_client, use_api_resource};

const UPDATE_FAILED: &str = "Failed to update profile.";

#[component]
pub fn SettingsPage() -> impl IntoView {
    let profile = use_api_resource(
        || (),
        |client, ()| async move { client.current_profile().await },
        "Failed to fetch profile.",
    );
    let state = Signal::derive(move || profile.state.with(|s| s.view_state()));

    view! {
        <div class="p-4 sm:p-6 space-y-6">
            <h1 class="text-2xl sm:text-3xl font-bold text-gray-800">"Settings"</h1>
            <DataView
                state=state
                table=move || view! { <ProfileEditor profile=profile /> }
                on_retry=Callback::new(move |_| profile.refresh())
            />
        </div>
    }
}

/// Form seeded from the loaded profile. A saved profile replaces the loaded
/// one and the session's cached user.
#[component]
fn ProfileEditor(profile: ApiResource<AdminProfile>) -> impl IntoView {
    let client = use_api_client();
    let auth = use_auth_context();
    let loaded = move || profile.state.with(|s| s.data.clone());

    let form = RwSignal::new(ProfileForm::default());
    Effect::new(move |_| {
        if let Some(p) = loaded() {
            form.set(p.form());
        }
    });

    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);

    let first_name = bind(form, |f| &f.first_name, |f, v| f.first_name = v);
    let last_name = bind(form, |f| &f.last_name, |f, v| f.last_name = v);
    let email = bind(form, |f| &f.email, |f, v| f.email = v);
    let phone = bind(form, |f| &f.phone, |f, v| f.phone = v);
    let avatar = bind(form, |f| &f.avatar, |f, v| f.avatar = v);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        success.set(None);
        let draft = match form.get_untracked().validate() {
            Ok(draft) => draft,
            Err(invalid) => {
                error.set(Some(profile_error_message(&invalid.to_string())));
                return;
            }
        };
        error.set(None);
        saving.set(true);

        let client = client.clone();
        spawn_local(async move {
            let result = client.update_profile(&draft).await;
            saving.try_set(false);
            match result {
                Ok(updated) => {
                    auth.update_user(updated.session_user());
                    profile.state.try_update(|s| s.data = Some(updated));
                    success.try_set(Some(PROFILE_UPDATED_MESSAGE.to_string()));
                }
                Err(err) => {
                    error.try_set(Some(profile_error_message(&err.user_message(UPDATE_FAILED))));
                }
            }
        });
    };

    view! {
        <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
            {move || loaded().map(|p| view! {
                <div class="card p-6 flex flex-col items-center text-center gap-3">
                    <Avatar src=p.avatar.clone() name=p.full_name() size="w-24 h-24" />
                    <h2 class="text-lg font-semibold text-gray-800">{p.full_name()}</h2>
                    <dl class="w-full grid grid-cols-1 gap-2 text-sm text-left">
                        <Detail label="Email" value=p.email.clone() />
                        <Detail label="Role" value=p.role.clone() />
                        <Detail label="Last updated" value=p.last_updated.clone() />
                    </dl>
                </div>
            })}

            <form class="card p-6 space-y-4 lg:col-span-2" on:submit=on_submit>
                <h2 class="text-lg sm:text-xl font-semibold text-gray-800">"Profile"</h2>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <FormField label="First Name" required=true value=first_name.value on_input=first_name.on_input disabled=saving />
                    <FormField label="Last Name" value=last_name.value on_input=last_name.on_input disabled=saving />
                    <FormField label="Email" required=true input_type="email" value=email.value on_input=email.on_input disabled=saving />
                    <FormField label="Phone" input_type="tel" value=phone.value on_input=phone.on_input disabled=saving />
                </div>
                <FormField label="Avatar URL" placeholder="Optional image URL" value=avatar.value on_input=avatar.on_input disabled=saving />

                <ErrorMessage error=error />
                <SuccessMessage message=success />

                <div class="flex justify-end">
                    <button type="submit" class="btn-primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
