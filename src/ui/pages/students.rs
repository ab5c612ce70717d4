//! Student roster: search, client-side pages, enrollment, details and the
//! active/inactive toggle.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::config::Config;
use crate::core::fetch::Paged;
use crate::core::models::{StudentForm, StudentView};
use crate::ui::common::{
    Avatar, BaseModal, CheckboxField, ConfirmDialog, DataView, Detail, ErrorMessage, FormField,
    Pagination, SearchInput, StatusBadge, bind,
};
use crate::ui::fetch::{ApiList, use_api_client, use_api_list};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::use_notifications;
use crate::ui::selection::{Selection, use_selection};

const FETCH_FAILED: &str = "Failed to fetch students.";
const ENROLL_FAILED: &str = "Failed to enroll student.";
const TOGGLE_FAILED: &str = "Failed to update student status.";

fn toggle_label(student: &StudentView) -> &'static str {
    if student.is_active { "Deactivate" } else { "Activate" }
}

#[component]
pub fn StudentsPage() -> impl IntoView {
    let page_size = expect_context::<Config>().page_size;
    let list = use_api_list(
        || (),
        |client, ()| async move { client.students().await.map(Paged::from) },
        FETCH_FAILED,
    );
    let details = use_selection::<StudentView>();
    let toggling = use_selection::<StudentView>();
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
                            <th class="th">"Skills"</th>
                            <th class="th">"Enrolled Courses"</th>
                            <th class="th">"Status"</th>
                            <th class="th">"Action"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || page.get().rows
                            key=|s| (s.id.clone(), s.is_active)
                            children=move |student| {
                                let status = student.status();
                                let label = toggle_label(&student);
                                let for_details = student.clone();
                                let for_toggle = student.clone();
                                view! {
                                    <tr class="border-b border-gray-100 hover:bg-gray-50">
                                        <td class="td">
                                            <div class="flex items-center gap-3">
                                                <Avatar src=student.avatar.clone() name=student.full_name.clone() />
                                                <span class="font-medium">{student.full_name}</span>
                                            </div>
                                        </td>
                                        <td class="td">{student.email}</td>
                                        <td class="td">{student.phone}</td>
                                        <td class="td">{student.skills}</td>
                                        <td class="td">{student.enrolled_count}</td>
                                        <td class="td"><StatusBadge status=status /></td>
                                        <td class="td">
                                            <div class="flex gap-2">
                                                <button class="btn-secondary" on:click=move |_| details.select(for_details.clone())>
                                                    "View"
                                                </button>
                                                <button class="btn-secondary" on:click=move |_| toggling.select(for_toggle.clone())>
                                                    {label}
                                                </button>
                                            </div>
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
                    key=|s| (s.id.clone(), s.is_active)
                    children=move |student| {
                        let status = student.status();
                        let label = toggle_label(&student);
                        let for_details = student.clone();
                        let for_toggle = student.clone();
                        view! {
                            <div class="card p-4 space-y-2">
                                <div class="flex items-center gap-3">
                                    <Avatar src=student.avatar.clone() name=student.full_name.clone() size="w-12 h-12" />
                                    <div class="flex-1 min-w-0">
                                        <h3 class="font-semibold text-gray-800 truncate">{student.full_name}</h3>
                                        <p class="text-sm text-gray-500 truncate">{student.email}</p>
                                    </div>
                                    <StatusBadge status=status />
                                </div>
                                <p class="text-sm text-gray-600">"Skills: " {student.skills}</p>
                                <p class="text-sm text-gray-600">"Enrolled courses: " {student.enrolled_count}</p>
                                <div class="flex gap-2">
                                    <button class="btn-secondary flex-1" on:click=move |_| details.select(for_details.clone())>
                                        "View details"
                                    </button>
                                    <button class="btn-secondary flex-1" on:click=move |_| toggling.select(for_toggle.clone())>
                                        {label}
                                    </button>
                                </div>
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
                <h1 class="text-2xl sm:text-3xl font-bold text-gray-800">"Manage Students"</h1>
                <button class="btn-primary" on:click=move |_| show_form.update(|v| *v = !*v)>
                    <Icon name=icons::PLUS class="w-4 h-4 mr-1" />
                    {move || if show_form.get() { "Close form" } else { "Enroll Student" }}
                </button>
            </div>

            <Show when=move || show_form.get()>
                <EnrollStudentForm list=list on_done=Callback::new(move |_| show_form.set(false)) />
            </Show>

            <div class="card p-4 sm:p-6 space-y-4">
                <SearchInput placeholder="Search by name, email or ID..." on_search=on_search />
                <DataView state=state table=table cards=cards on_retry=Callback::new(move |_| list.refresh()) />
                <Pagination window=Signal::derive(move || page.with(|p| p.window)) on_page=on_page />
            </div>

            <StudentDetails selected=details />
            <ToggleActiveDialog list=list target=toggling details=details />
        </div>
    }
}

/// Confirms and applies an active-flag flip; the row changes only after the
/// server answers.
#[component]
fn ToggleActiveDialog(
    list: ApiList<StudentView>,
    target: Selection<StudentView>,
    details: Selection<StudentView>,
) -> impl IntoView {
    let client = use_api_client();
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let message = Signal::derive(move || {
        target.map_or(String::new(), |s| {
            let action = if s.is_active { "deactivate" } else { "activate" };
            format!("Do you want to {action} {}?", s.full_name)
        })
    });

    let close = move || {
        error.set(None);
        target.clear();
    };

    let on_confirm = Callback::new(move |_| {
        let Some(student) = target.get_untracked() else {
            return;
        };
        busy.set(true);
        error.set(None);
        let client = client.clone();
        spawn_local(async move {
            let result = client.toggle_student_active(&student.id, student.is_active).await;
            busy.try_set(false);
            match result {
                Ok(is_active) => {
                    list.model.try_update(|m| m.update_where(|s| s.id == student.id, |s| s.is_active = is_active));
                    if details.map_or(false, |d| d.id == student.id) {
                        details.update(|d| d.is_active = is_active);
                    }
                    close();
                }
                Err(err) => {
                    error.try_set(Some(err.user_message(TOGGLE_FAILED)));
                }
            }
        });
    });

    view! {
        <ConfirmDialog
            title="Change student status"
            message=message
            is_open=Signal::derive(move || target.is_open())
            on_confirm=on_confirm
            on_cancel=Callback::new(move |_| close())
            confirm_text="Yes, continue"
            busy=busy
            error=error
        />
    }
}

#[component]
fn EnrollStudentForm(list: ApiList<StudentView>, on_done: Callback<()>) -> impl IntoView {
    let client = use_api_client();
    let notifications = use_notifications();
    let form = RwSignal::new(StudentForm {
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
    let skills = bind(form, |f| &f.skills, |f, v| f.skills = v);
    let interests = bind(form, |f| &f.interests, |f, v| f.interests = v);
    let education = bind(form, |f| &f.education, |f, v| f.education = v);
    let occupation = bind(form, |f| &f.occupation, |f, v| f.occupation = v);

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
            let result = client.enroll_student(&draft).await;
            submitting.try_set(false);
            match result {
                Ok(student) => {
                    notifications.success(format!("{} enrolled as a student.", student.full_name));
                    list.model.update(|m| m.prepend(student));
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
            <h2 class="text-lg sm:text-xl font-semibold text-gray-800">"Enroll New Student"</h2>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <FormField label="First Name" required=true value=first_name.value on_input=first_name.on_input />
                <FormField label="Last Name" required=true value=last_name.value on_input=last_name.on_input />
                <FormField label="Email" required=true input_type="email" value=email.value on_input=email.on_input />
                <FormField label="Phone" input_type="tel" value=phone.value on_input=phone.on_input />
                <FormField label="Avatar URL" placeholder="Optional image URL" value=avatar.value on_input=avatar.on_input />
                <FormField
                    label="Skills (comma-separated)"
                    placeholder="e.g., JavaScript, React"
                    value=skills.value
                    on_input=skills.on_input
                />
                <FormField
                    label="Interests (comma-separated)"
                    placeholder="e.g., Web Development, AI"
                    value=interests.value
                    on_input=interests.on_input
                />
                <FormField
                    label="Education"
                    placeholder="e.g., B.Tech in Computer Science"
                    value=education.value
                    on_input=education.on_input
                />
                <FormField
                    label="Occupation"
                    placeholder="e.g., Software Engineer"
                    value=occupation.value
                    on_input=occupation.on_input
                />
            </div>
            <CheckboxField
                label="Active"
                checked=Signal::derive(move || form.with(|f| f.is_active))
                on_change=Callback::new(move |checked| form.update(|f| f.is_active = checked))
            />

            <ErrorMessage error=error />

            <div class="flex justify-end">
                <button type="submit" class="btn-primary" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Enrolling..." } else { "Enroll Student" }}
                </button>
            </div>
        </form>
    }
}

#[component]
fn StudentDetails(selected: Selection<StudentView>) -> impl IntoView {
    let title = Signal::derive(move || selected.map_or(String::new(), |s| s.full_name.clone()));

    view! {
        <BaseModal
            title=title
            is_open=Signal::derive(move || selected.is_open())
            on_close=Callback::new(move |_| selected.clear())
        >
            {move || selected.get().map(|s| {
                let status = s.status();
                let verified = if s.is_verified { "Yes" } else { "No" };
                view! {
                    <div class="space-y-4">
                        <div class="flex items-center gap-4">
                            <Avatar src=s.avatar.clone() name=s.full_name.clone() size="w-16 h-16" />
                            <div>
                                <p class="text-gray-600">{s.email.clone()}</p>
                                <StatusBadge status=status />
                            </div>
                        </div>
                        <dl class="grid grid-cols-1 sm:grid-cols-2 gap-3 text-sm">
                            <Detail label="Phone" value=s.phone.clone() />
                            <Detail label="Skills" value=s.skills.clone() />
                            <Detail label="Interests" value=s.interests.clone() />
                            <Detail label="Education" value=s.education.clone() />
                            <Detail label="Occupation" value=s.occupation.clone() />
                            <Detail label="Points" value=s.points.to_string() />
                            <Detail label="Badges" value=s.badge_count.to_string() />
                            <Detail label="Enrolled courses" value=s.enrolled_count.to_string() />
                            <Detail label="Completed courses" value=s.completed_count.to_string() />
                            <Detail label="Verified" value=verified />
                            <Detail label="Joined" value=s.joined.clone() />
                            <Detail label="Last login" value=s.last_login.clone() />
                        </dl>
                    </div>
                }
            })}
        </BaseModal>
    }
}
