//! Instructor roster: search, client-side pages, enrollment and details.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::config::Config;
use crate::core::fetch::Paged;
use crate::core::format::{NOT_AVAILABLE, format_usd};
use crate::core::models::{InstructorForm, InstructorView};
use crate::ui::common::{
    Avatar, BaseModal, CheckboxField, DataView, Detail, ErrorMessage, FormField, Pagination,
    SearchInput, StatusBadge, TextAreaField, bind,
};
use crate::ui::fetch::{ApiList, use_api_client, use_api_list};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::use_notifications;
use crate::ui::selection::{Selection, use_selection};

const FETCH_FAILED: &str = "Failed to fetch instructors.";
const ENROLL_FAILED: &str = "Failed to enroll instructor.";

#[component]
pub fn InstructorsPage() -> impl IntoView {
    let page_size = expect_context::<Config>().page_size;
    let list = use_api_list(
        || (),
        |client, ()| async move { client.instructors().await.map(Paged::from) },
        FETCH_FAILED,
    );
    let selected = use_selection::<InstructorView>();
    let show_form = RwSignal::new(false);

    let page = Memo::new(move |_| list.model.with(|m| m.client_page(page_size)));
    let state = Signal::derive(move || list.model.with(|m| m.view_state(page.with(|p| p.rows.len()))));
    let on_search = Callback::new(move |term: String| list.model.update(|m| m.set_search(term)));
    let on_page = Callback::new(move |p: usize| list.model.update(|m| m.set_page(p)));

    let table = move || {
        view! {
            <div class="overflow-x-auto">
                <table class="min-w-full bg-white">
                    <thead class="bg-gray-100">
                        <tr>
                            <th class="th">"Name"</th>
                            <th class="th">"Email"</th>
                            <th class="th">"Phone"</th>
                            <th class="th">"Expertise"</th>
                            <th class="th">"Courses"</th>
                            <th class="th">"Status"</th>
                            <th class="th">"Action"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || page.get().rows
                            key=|i| i.id.clone()
                            children=move |instructor| {
                                let status = instructor.status();
                                let row = instructor.clone();
                                view! {
                                    <tr class="border-b border-gray-100 hover:bg-gray-50">
                                        <td class="td">
                                            <div class="flex items-center gap-3">
                                                <Avatar src=instructor.avatar.clone() name=instructor.full_name.clone() />
                                                <span class="font-medium">{instructor.full_name}</span>
                                            </div>
                                        </td>
                                        <td class="td">{instructor.email}</td>
                                        <td class="td">{instructor.phone}</td>
                                        <td class="td">{instructor.expertise}</td>
                                        <td class="td">{instructor.total_courses}</td>
                                        <td class="td"><StatusBadge status=status /></td>
                                        <td class="td">
                                            <button class="btn-secondary" on:click=move |_| selected.select(row.clone())>
                                                "View"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        }
    };

    let cards = move || {
        view! {
            <div class="grid grid-cols-1 gap-4">
                <For
                    each=move || page.get().rows
                    key=|i| i.id.clone()
                    children=move |instructor| {
                        let status = instructor.status();
                        let row = instructor.clone();
                        view! {
                            <div class="card p-4 space-y-2">
                                <div class="flex items-center gap-3">
                                    <Avatar src=instructor.avatar.clone() name=instructor.full_name.clone() size="w-12 h-12" />
                                    <div class="flex-1 min-w-0">
                                        <h3 class="font-semibold text-gray-800 truncate">{instructor.full_name}</h3>
                                        <p class="text-sm text-gray-500 truncate">{instructor.email}</p>
                                    </div>
                                    <StatusBadge status=status />
                                </div>
                                <p class="text-sm text-gray-600">"Expertise: " {instructor.expertise}</p>
                                <p class="text-sm text-gray-600">"Courses: " {instructor.total_courses}</p>
                                <button class="btn-secondary w-full" on:click=move |_| selected.select(row.clone())>
                                    "View details"
                                </button>
                            </div>
                        }
                    }
                />
            </div>
        }
    };

    view! {
        <div class="p-4 sm:p-6 space-y-6">
            <div class="flex flex-col sm:flex-row sm:items-center justify-between gap-4">
                <h1 class="text-2xl sm:text-3xl font-bold text-gray-800">"Manage Instructors"</h1>
                <button class="btn-primary" on:click=move |_| show_form.update(|v| *v = !*v)>
                    <Icon name=icons::PLUS class="w-4 h-4 mr-1" />
                    {move || if show_form.get() { "Close form" } else { "Enroll Instructor" }}
                </button>
            </div>

            <Show when=move || show_form.get()>
                <EnrollInstructorForm list=list on_done=Callback::new(move |_| show_form.set(false)) />
            </Show>

            <div class="card p-4 sm:p-6 space-y-4">
                <SearchInput placeholder="Search by name, email or ID..." on_search=on_search />
                <DataView state=state table=table cards=cards on_retry=Callback::new(move |_| list.refresh()) />
                <Pagination window=Signal::derive(move || page.with(|p| p.window)) on_page=on_page />
            </div>

            <InstructorDetails selected=selected />
        </div>
    }
}

/// New-instructor form; the record is prepended once the server returns it.
#[component]
fn EnrollInstructorForm(list: ApiList<InstructorView>, on_done: Callback<()>) -> impl IntoView {
    let client = use_api_client();
    let notifications = use_notifications();
    let form = RwSignal::new(InstructorForm {
        is_active: true,
        ..Default::default()
    });
    let submitting = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let first_name = bind(form, |f| &f.first_name, |f, v| f.first_name = v);
    let last_name = bind(form, |f| &f.last_name, |f, v| f.last_name = v);
    let email = bind(form, |f| &f.email, |f, v| f.email = v);
    let phone = bind(form, |f| &f.phone, |f, v| f.phone = v);
    let avatar = bind(form, |f| &f.avatar, |f, v| f.avatar = v);
    let expertise = bind(form, |f| &f.expertise, |f, v| f.expertise = v);
    let bio = bind(form, |f| &f.bio, |f, v| f.bio = v);
    let linkedin = bind(form, |f| &f.linkedin, |f, v| f.linkedin = v);
    let twitter = bind(form, |f| &f.twitter, |f, v| f.twitter = v);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = form.get_untracked();
        if let Err(invalid) = draft.validate() {
            error.set(Some(invalid.to_string()));
            return;
        }
        error.set(None);
        submitting.set(true);

        let client = client.clone();
        spawn_local(async move {
            let result = client.enroll_instructor(&draft).await;
            submitting.try_set(false);
            match result {
                Ok(instructor) => {
                    notifications.success(format!("{} enrolled as an instructor.", instructor.full_name));
                    list.model.update(|m| m.prepend(instructor));
                    on_done.run(());
                }
                Err(err) => {
                    error.try_set(Some(err.user_message(ENROLL_FAILED)));
                }
            }
        });
    };

    view! {
        <form class="card p-4 sm:p-6 space-y-4" on:submit=on_submit>
            <h2 class="text-lg sm:text-xl font-semibold text-gray-800">"Enroll New Instructor"</h2>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <FormField label="First Name" required=true value=first_name.value on_input=first_name.on_input />
                <FormField label="Last Name" required=true value=last_name.value on_input=last_name.on_input />
                <FormField label="Email" required=true input_type="email" value=email.value on_input=email.on_input />
                <FormField label="Phone" input_type="tel" value=phone.value on_input=phone.on_input />
                <FormField label="Avatar URL" placeholder="Optional image URL" value=avatar.value on_input=avatar.on_input />
                <FormField
                    label="Expertise (comma-separated)"
                    placeholder="e.g., JavaScript, React"
                    value=expertise.value
                    on_input=expertise.on_input
                />
                <FormField label="LinkedIn URL" placeholder="Optional" value=linkedin.value on_input=linkedin.on_input />
                <FormField label="Twitter URL" placeholder="Optional" value=twitter.value on_input=twitter.on_input />
            </div>
            <TextAreaField label="Bio" value=bio.value on_input=bio.on_input />
            <CheckboxField
                label="Active"
                checked=Signal::derive(move || form.with(|f| f.is_active))
                on_change=Callback::new(move |checked| form.update(|f| f.is_active = checked))
            />

            <ErrorMessage error=error />

            <div class="flex justify-end">
                <button type="submit" class="btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Enrolling..." } else { "Enroll Instructor" }}
                </button>
            </div>
        </form>
    }
}

#[component]
fn InstructorDetails(selected: Selection<InstructorView>) -> impl IntoView {
    let title = Signal::derive(move || selected.map_or(String::new(), |i| i.full_name.clone()));

    view! {
        <BaseModal
            title=title
            is_open=Signal::derive(move || selected.is_open())
            on_close=Callback::new(move |_| selected.clear())
        >
            {move || selected.get().map(|i| {
                let status = i.status();
                let verified = if i.is_verified { "Yes" } else { "No" };
                let linkedin = i.linkedin.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
                let twitter = i.twitter.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
                view! {
                    <div class="space-y-4">
                        <div class="flex items-center gap-4">
                            <Avatar src=i.avatar.clone() name=i.full_name.clone() size="w-16 h-16" />
                            <div>
                                <p class="text-gray-600">{i.email.clone()}</p>
                                <StatusBadge status=status />
                            </div>
                        </div>
                        <dl class="grid grid-cols-1 sm:grid-cols-2 gap-3 text-sm">
                            <Detail label="Phone" value=i.phone.clone() />
                            <Detail label="Expertise" value=i.expertise.clone() />
                            <Detail label="Courses" value=i.total_courses.to_string() />
                            <Detail label="Students" value=i.total_students.to_string() />
                            <Detail label="Rating" value=format!("{:.1}", i.rating) />
                            <Detail label="Earnings" value=format_usd(i.earnings) />
                            <Detail label="Verified" value=verified />
                            <Detail label="Joined" value=i.joined.clone() />
                            <Detail label="Last login" value=i.last_login.clone() />
                            <Detail label="LinkedIn" value=linkedin />
                            <Detail label="Twitter" value=twitter />
                        </dl>
                        <div>
                            <h4 class="label">"Bio"</h4>
                            <p class="text-sm text-gray-700 whitespace-pre-line">{i.bio.clone()}</p>
                        </div>
                    </div>
                }
            })}
        </BaseModal>
    }
}
