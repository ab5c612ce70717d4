//! Course catalog per instructor with an editor for details, status, media
//! and deletion. Outcomes are reported through toasts.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::config::Config;
use crate::core::fetch::Paged;
use crate::core::http::FilePart;
use crate::core::models::{CourseDetails, CourseMedia, CourseView};
use crate::core::status::Status;
use crate::ui::common::{
    BaseModal, ConfirmDialog, DataView, ErrorMessage, FormField, Pagination, SearchInput,
    SelectField, StatusBadge, TextAreaField, bind,
};
use crate::ui::fetch::{ApiList, use_api_client, use_api_list};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::use_notifications;
use crate::ui::selection::{Selection, use_selection};
use crate::ui::upload::{picked_file, use_file_preview};

#[component]
pub fn CoursesPage() -> impl IntoView {
    let page_size = expect_context::<Config>().page_size;
    let instructors = use_api_list(
        || (),
        |client, ()| async move { client.instructors().await.map(Paged::from) },
        "Failed to fetch instructors.",
    );
    let instructor_id = RwSignal::new(None::<String>);

    // default to the first instructor once the roster arrives
    Effect::new(move |_| {
        let first = instructors.model.with(|m| m.items.first().map(|i| i.id.clone()));
        if instructor_id.with_untracked(Option::is_none) && first.is_some() {
            instructor_id.set(first);
        }
    });

    let courses = use_api_list(
        move || instructor_id.get(),
        |client, id: Option<String>| async move {
            match id {
                Some(id) => client.instructor_courses(&id).await.map(Paged::from),
                None => Ok(Paged::from(Vec::new())),
            }
        },
        "Failed to fetch courses.",
    );
    let selected = use_selection::<CourseView>();

    let page = Memo::new(move |_| courses.model.with(|m| m.client_page(page_size)));
    let state = Signal::derive(move || {
        // the course list waits for the roster
        if instructors.model.with(|m| m.loading) {
            return instructors.model.with(|m| m.view_state(0));
        }
        courses.model.with(|m| m.view_state(page.with(|p| p.rows.len())))
    });
    let on_search = Callback::new(move |term: String| courses.model.update(|m| m.set_search(term)));
    let on_page = Callback::new(move |p: usize| courses.model.update(|m| m.set_page(p)));

    let grid = move || {
        view! {
            <div class="grid grid-cols-1 sm:grid-cols-2 xl:grid-cols-3 gap-4">
                <For
                    each=move || page.get().rows
                    key=|c| (c.id.clone(), c.title.clone(), c.status)
                    children=move |course| {
                        let row = course.clone();
                        let status = course.status;
                        view! {
                            <div class="card overflow-hidden flex flex-col">
                                <div class="relative h-36 bg-gray-100">
                                    {course.thumbnail.clone().map(|src| view! {
                                        <img src=src alt=course.title.clone() class="h-36 w-full object-cover" />
                                    })}
                                    <span class="absolute top-2 right-2 bg-indigo-600 text-white text-xs px-2 py-1 rounded-full">
                                        {format!("★ {:.1}", course.rating)}
                                    </span>
                                </div>
                                <div class="p-4 flex-1 space-y-1">
                                    <div class="flex items-start justify-between gap-2">
                                        <h3 class="font-semibold text-gray-800">{course.title}</h3>
                                        <StatusBadge status=status />
                                    </div>
                                    <p class="text-xs text-gray-500">{course.category} " · " {course.level}</p>
                                    <p class="text-xs text-gray-500">
                                        {course.total_lessons} " lessons · " {course.enrolled} " enrolled · " {course.price}
                                    </p>
                                </div>
                                <button class="btn-secondary m-4 mt-0" on:click=move |_| selected.select(row.clone())>
                                    <Icon name=icons::EDIT class="w-4 h-4 mr-1" />
                                    "Edit"
                                </button>
                            </div>
                        }
                    }
                />
            </div>
        }
        .into_any()
    };

    let instructor_picker = move || {
        let options = instructors.model.with(|m| {
            m.items
                .iter()
                .map(|i| (i.id.clone(), i.full_name.clone()))
                .collect::<Vec<_>>()
        });
        view! {
            <select
                class="select-base sm:max-w-xs"
                aria-label="Instructor"
                prop:value=move || instructor_id.get().unwrap_or_default()
                on:change=move |ev| {
                    let id = event_target_value(&ev);
                    courses.model.update(|m| m.set_page(1));
                    instructor_id.set((!id.is_empty()).then_some(id));
                }
            >
                {options.into_iter().map(|(id, name)| view! { <option value=id>{name}</option> }).collect_view()}
            </select>
        }
    };

    view! {
        <div class="p-4 sm:p-6 space-y-6">
            <h1 class="text-2xl sm:text-3xl font-bold text-gray-800">"Manage Courses"</h1>

            <div class="card p-4 sm:p-6 space-y-4">
                <div class="flex flex-col sm:flex-row gap-3">
                    {instructor_picker}
                    <SearchInput placeholder="Search courses by title, category or ID..." on_search=on_search />
                </div>
                <DataView state=state table=grid on_retry=Callback::new(move |_| courses.refresh()) />
                <Pagination window=Signal::derive(move || page.with(|p| p.window)) on_page=on_page />
            </div>

            <BaseModal
                title=Signal::derive(move || selected.map_or(String::new(), |c| format!("Edit: {}", c.title)))
                is_open=Signal::derive(move || selected.is_open())
                on_close=Callback::new(move |_| selected.clear())
                max_width="max-w-3xl"
            >
                {selected.get_untracked().map(|course| view! {
                    <CourseEditor course=course list=courses selected=selected />
                }.into_any())}
            </BaseModal>
        </div>
    }
}

/// Editor for one course. Every action waits for the server before the
/// list changes.
#[component]
fn CourseEditor(course: CourseView, list: ApiList<CourseView>, selected: Selection<CourseView>) -> impl IntoView {
    let client = use_api_client();
    let notifications = use_notifications();
    let course_id = StoredValue::new(course.id.clone());

    let details = RwSignal::new(CourseDetails::from_view(&course));
    let status = RwSignal::new(StatusChange::new(course.status));
    let status_busy = RwSignal::new(false);
    let status_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let confirm_delete = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let delete_error = RwSignal::new(None::<String>);

    let title = bind(details, |d| &d.title, |d, v| d.title = v);
    let subtitle = bind(details, |d| &d.subtitle, |d, v| d.subtitle = v);
    let description = bind(details, |d| &d.description, |d, v| d.description = v);
    let category = bind(details, |d| &d.category, |d, v| d.category = v);
    let sub_category = bind(details, |d| &d.sub_category, |d, v| d.sub_category = v);
    let level = bind(details, |d| &d.level, |d, v| d.level = v);

    let save_details = {
        let client = client.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let draft = details.get_untracked();
            if let Err(invalid) = draft.validate() {
                error.set(Some(invalid.to_string()));
                return;
            }
            error.set(None);
            saving.set(true);
            let client = client.clone();
            let id = course_id.get_value();
            spawn_local(async move {
                let result = client.update_course(&id, &draft).await;
                saving.try_set(false);
                match result {
                    Ok(saved) => {
                        list.model.update(|m| {
                            m.update_where(|c| c.id == id, |c| saved.apply_to(c));
                        });
                        selected.update(|c| saved.apply_to(c));
                        notifications.success("Course details updated.");
                    }
                    Err(err) => notifications.error(err.user_message("Failed to update course.")),
                }
            });
        }
    };

    let pick_status = Callback::new(move |value: String| {
        status_error.set(None);
        status.update(|change| {
            change.propose(Status::from_api(&value));
        });
    });

    let cancel_status = Callback::new(move |_| {
        status_error.set(None);
        status.update(StatusChange::cancel);
    });

    let confirm_status = {
        let client = client.clone();
        Callback::new(move |_| {
            let Some(next) = status.with_untracked(|change| change.pending) else {
                return;
            };
            status_busy.set(true);
            status_error.set(None);
            let client = client.clone();
            let id = course_id.get_value();
            spawn_local(async move {
                let result = client.set_course_status(&id, next).await;
                status_busy.try_set(false);
                match result {
                    Ok(()) => {
                        status.try_update(|change| change.commit(next));
                        list.model.update(|m| {
                            m.update_where(|c| c.id == id, |c| c.status = next);
                        });
                        selected.update(|c| c.status = next);
                        notifications.success(format!("Course is now {next}."));
                    }
                    Err(err) => {
                        status_error.try_set(Some(err.user_message("Failed to change course status.")));
                    }
                }
            });
        })
    };

    let on_delete = {
        let client = client.clone();
        Callback::new(move |_| {
            deleting.set(true);
            delete_error.set(None);
            let client = client.clone();
            let id = course_id.get_value();
            spawn_local(async move {
                let result = client.delete_course(&id).await;
                deleting.try_set(false);
                match result {
                    Ok(()) => {
                        list.model.update(|m| {
                            m.remove_where(|c| c.id == id);
                        });
                        notifications.success("Course deleted.");
                        confirm_delete.try_set(false);
                        selected.clear();
                    }
                    Err(err) => {
                        delete_error.try_set(Some(err.user_message("Failed to delete course.")));
                    }
                }
            });
        })
    };

    let status_options = Status::COURSE_STATES
        .iter()
        .map(|s| (s.api_value().to_string(), s.to_string()))
        .collect::<Vec<_>>();

    view! {
        <div class="space-y-6">
            <form class="space-y-4" on:submit=save_details>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <FormField label="Title" required=true value=title.value on_input=title.on_input />
                    <FormField label="Subtitle" value=subtitle.value on_input=subtitle.on_input />
                    <FormField label="Category" value=category.value on_input=category.on_input />
                    <FormField label="Sub-category" value=sub_category.value on_input=sub_category.on_input />
                    <FormField label="Level" placeholder="e.g., beginner" value=level.value on_input=level.on_input />
                </div>
                <TextAreaField label="Description" rows=4 value=description.value on_input=description.on_input />
                <ErrorMessage error=error />
                <div class="flex justify-end">
                    <button type="submit" class="btn-primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save details" }}
                    </button>
                </div>
            </form>

            <div class="border-t border-gray-200 pt-4">
                <SelectField
                    label="Status"
                    value=Signal::derive(move || status.with(|c| c.shown().api_value().to_string()))
                    on_change=pick_status
                    options=status_options
                    disabled=status_busy
                />
            </div>

            <div class="border-t border-gray-200 pt-4 grid grid-cols-1 md:grid-cols-2 gap-4">
                <MediaUpload course_id=course_id.get_value() media=CourseMedia::Thumbnail current=course.thumbnail.clone() />
                <MediaUpload course_id=course_id.get_value() media=CourseMedia::PromoVideo current=course.promo_video.clone() />
            </div>

            <div class="border-t border-gray-200 pt-4 flex justify-between items-center">
                <p class="text-sm text-gray-500">"Deleting a course cannot be undone."</p>
                <button class="btn-danger" on:click=move |_| confirm_delete.set(true)>
                    <Icon name=icons::TRASH class="w-4 h-4 mr-1" />
                    "Delete course"
                </button>
            </div>

            <ConfirmDialog
                title="Delete course"
                message=format!("Delete \"{}\"? Students will lose access to it.", course.title)
                is_open=confirm_delete
                on_confirm=on_delete
                on_cancel=Callback::new(move |_| {
                    delete_error.set(None);
                    confirm_delete.set(false);
                })
                confirm_text="Delete"
                is_destructive=true
                busy=deleting
                error=delete_error
            />

            <ConfirmDialog
                title="Change status"
                message=Signal::derive(move || {
                    status.with(|c| c.pending.map(|next| format!("Mark this course as {next}?")).unwrap_or_default())
                })
                is_open=Signal::derive(move || status.with(|c| c.pending.is_some()))
                on_confirm=confirm_status
                on_cancel=cancel_status
                confirm_text="Change status"
                busy=status_busy
                error=status_error
            />
        </div>
    }
    .into_any()
}

/// File picker with a local preview for one kind of course media.
#[component]
fn MediaUpload(course_id: String, media: CourseMedia, current: Option<String>) -> impl IntoView {
    let client = use_api_client();
    let notifications = use_notifications();
    let preview = use_file_preview();
    let pending = RwSignal::new(None::<FilePart>);
    let uploading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let course_id = StoredValue::new(course_id);
    let picks = StoredValue::new(PickSequence::default());

    let on_pick = move |ev: leptos::ev::Event| {
        error.set(None);
        pending.set(None);
        picks.update_value(|p| {
            p.advance();
        });
        let ticket = picks.get_value();
        let Some(file) = picked_file(&ev) else {
            preview.clear();
            return;
        };
        match file.object_url() {
            Some(url) => preview.set(url),
            None => preview.clear(),
        }
        spawn_local(async move {
            let result = file.read().await;
            // a newer pick owns the preview now
            if picks.try_get_value() != Some(ticket) {
                return;
            }
            match result {
                Ok(part) => {
                    pending.try_set(Some(part));
                }
                Err(err) => {
                    error.try_set(Some(err.user_message("Could not read the file.")));
                }
            }
        });
    };

    let on_upload = move |_| {
        let Some(part) = pending.get_untracked() else {
            return;
        };
        uploading.set(true);
        let client = client.clone();
        let id = course_id.get_value();
        spawn_local(async move {
            let result = client.upload_course_media(&id, media, part).await;
            uploading.try_set(false);
            match result {
                Ok(()) => {
                    pending.try_set(None);
                    notifications.success(format!("Uploaded {media}."));
                }
                Err(err) => notifications.error(err.user_message(&format!("Failed to upload {media}."))),
            }
        });
    };

    let shown = move || preview.url().or_else(|| current.clone());

    view! {
        <div class="space-y-2">
            <label class="label">{format!("Upload {media}")}</label>
            {move || shown().map(|src| match media {
                CourseMedia::Thumbnail => view! {
                    <img src=src alt="Thumbnail preview" class="h-32 w-full object-cover rounded-lg" />
                }.into_any(),
                CourseMedia::PromoVideo => view! {
                    <video src=src controls=true class="h-32 w-full rounded-lg bg-black"></video>
                }.into_any(),
            })}
            <input type="file" accept=media.accept() class="block w-full text-sm" on:change=on_pick />
            <ErrorMessage error=error />
            <button
                class="btn-secondary w-full"
                disabled=move || uploading.get() || pending.with(Option::is_none)
                on:click=on_upload
            >
                <Icon name=icons::UPLOAD class="w-4 h-4 mr-1" />
                {move || if uploading.get() { "Uploading...".to_string() } else { format!("Upload {media}") }}
            </button>
        </div>
    }
}

/// Status picked in the select, held until the admin confirms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StatusChange {
    current: Status,
    pending: Option<Status>,
}

impl StatusChange {
    fn new(current: Status) -> Self {
        Self { current, pending: None }
    }

    /// Re-picking the saved status asks nothing.
    fn propose(&mut self, next: Status) -> bool {
        self.pending = (next != self.current).then_some(next);
        self.pending.is_some()
    }

    fn cancel(&mut self) {
        self.pending = None;
    }

    fn commit(&mut self, next: Status) {
        self.current = next;
        self.pending = None;
    }

    /// What the select shows; cancelling snaps it back to the saved value.
    fn shown(&self) -> Status {
        self.pending.unwrap_or(self.current)
    }
}

/// Counts file picks so a slow read of an earlier file cannot replace a
/// later one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PickSequence(u64);

impl PickSequence {
    fn advance(&mut self) -> Self {
        self.0 += 1;
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_status_change_is_dropped() {
        let mut change = StatusChange::new(Status::Draft);

        assert!(change.propose(Status::Published));
        assert_eq!(change.shown(), Status::Published);

        change.cancel();
        assert_eq!(change.pending, None);
        assert_eq!(change.current, Status::Draft);
        assert_eq!(change.shown(), Status::Draft);
    }

    #[test]
    fn test_confirmed_status_change_becomes_current() {
        let mut change = StatusChange::new(Status::Draft);
        change.propose(Status::Archived);
        change.commit(Status::Archived);

        assert_eq!(change, StatusChange::new(Status::Archived));
    }

    #[test]
    fn test_picking_saved_status_opens_no_dialog() {
        let mut change = StatusChange::new(Status::Published);
        assert!(!change.propose(Status::Published));
        assert_eq!(change.pending, None);
    }

    #[test]
    fn test_earlier_pick_goes_stale() {
        let mut picks = PickSequence::default();
        let first = picks.advance();
        let second = picks.advance();

        assert_ne!(picks, first);
        assert_eq!(picks, second);
    }
}
