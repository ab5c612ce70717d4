//! Recent instructor and student activity, each panel with its own sort
//! order, search box and pages.

use std::future::Future;

use leptos::prelude::*;

use crate::core::config::Config;
use crate::core::error::ApiError;
use crate::core::fetch::Paged;
use crate::core::listing::{Searchable, SortOrder};
use crate::core::models::{InstructorActivityView, StudentActivityView};
use crate::ui::common::{DataView, Pagination, SearchInput};
use crate::ui::fetch::{AdminClient, use_api_list};

/// Rows requested per panel
const ACTIVITY_LIMIT: usize = 50;

/// One activity line, whichever side it comes from
#[derive(Debug, Clone, PartialEq)]
struct ActivityRow {
    id: String,
    name: String,
    email: String,
    /// Course created or course assigned
    detail: String,
    created_at: String,
}

impl Searchable for ActivityRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.name.as_str(), self.email.as_str(), self.detail.as_str()]
    }
}

impl From<InstructorActivityView> for ActivityRow {
    fn from(a: InstructorActivityView) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
            detail: a.course,
            created_at: a.created_at,
        }
    }
}

impl From<StudentActivityView> for ActivityRow {
    fn from(a: StudentActivityView) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
            detail: a.assignment,
            created_at: a.created_at,
        }
    }
}

#[component]
pub fn ActivitiesPage() -> impl IntoView {
    view! {
        <div class="p-4 sm:p-6 space-y-6">
            <h1 class="text-2xl sm:text-3xl font-bold text-gray-800">"Track Activities"</h1>
            <ActivityPanel
                title="Instructor Activity"
                detail_header="Courses"
                fallback="Failed to fetch instructor activity."
                fetch=|client: AdminClient, sort: SortOrder| async move {
                    client
                        .instructor_activity(ACTIVITY_LIMIT, sort)
                        .await
                        .map(|rows| rows.into_iter().map(ActivityRow::from).collect::<Vec<_>>())
                }
            />
            <ActivityPanel
                title="Student Activity"
                detail_header="Assignment"
                fallback="Failed to fetch student activity."
                fetch=|client: AdminClient, sort: SortOrder| async move {
                    client
                        .student_activity(ACTIVITY_LIMIT, sort)
                        .await
                        .map(|rows| rows.into_iter().map(ActivityRow::from).collect::<Vec<_>>())
                }
            />
        </div>
    }
}

/// The sort order is a fetch dependency: changing it asks the backend again.
#[component]
fn ActivityPanel<F, Fut>(
    title: &'static str,
    detail_header: &'static str,
    fallback: &'static str,
    fetch: F,
) -> impl IntoView
where
    F: Fn(AdminClient, SortOrder) -> Fut + 'static,
    Fut: Future<Output = Result<Vec<ActivityRow>, ApiError>> + 'static,
{
    let page_size = expect_context::<Config>().page_size;
    let sort = RwSignal::new(SortOrder::Newest);
    let list = use_api_list(
        move || sort.get(),
        move |client, sort| {
            let request = fetch(client, sort);
            async move { request.await.map(Paged::from) }
        },
        fallback,
    );

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
                            <th class="th">"User's Name"</th>
                            <th class="th">"ID"</th>
                            <th class="th">"Email"</th>
                            <th class="th">{detail_header}</th>
                            <th class="th">"Created"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || page.get().rows
                            key=|row| row.id.clone()
                            children=|row| view! {
                                <tr class="border-b border-gray-100 hover:bg-gray-50">
                                    <td class="td font-medium">{row.name}</td>
                                    <td class="td text-xs text-gray-500">{row.id}</td>
                                    <td class="td">{row.email}</td>
                                    <td class="td">{row.detail}</td>
                                    <td class="td whitespace-nowrap">{row.created_at}</td>
                                </tr>
                            }
                        />
                    </tbody>
                </table>
            </div>
        }
    };

    let cards = move || {
        view! {
            <div class="space-y-3">
                <For
                    each=move || page.get().rows
                    key=|row| row.id.clone()
                    children=move |row| view! {
                        <div class="card p-4 space-y-1">
                            <h3 class="text-base font-medium text-gray-800">{row.name}</h3>
                            <p class="text-sm text-gray-500">{row.email}</p>
                            <p class="text-sm text-gray-600">{detail_header} ": " {row.detail}</p>
                            <p class="text-xs text-gray-400">{row.created_at}</p>
                        </div>
                    }
                />
            </div>
        }
    };

    let on_sort = move |ev: leptos::ev::Event| {
        sort.set(SortOrder::from_query_value(&event_target_value(&ev)));
        list.model.update(|m| m.set_page(1));
    };

    view! {
        <section class="card p-4 sm:p-6 space-y-4">
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-3">
                <h2 class="text-lg md:text-xl font-semibold text-indigo-700">{title}</h2>
                <div class="flex flex-col sm:flex-row gap-3">
                    <SearchInput placeholder="Search by name, email, or ID" on_search=on_search />
                    <select
                        class="select-base sm:w-36"
                        aria-label="Sort order"
                        prop:value=move || sort.get().query_value()
                        on:change=on_sort
                    >
                        {SortOrder::ALL
                            .into_iter()
                            .map(|order| view! { <option value=order.query_value()>{order.to_string()}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>
            <DataView state=state table=table cards=cards on_retry=Callback::new(move |_| list.refresh()) />
            <Pagination window=Signal::derive(move || page.with(|p| p.window)) on_page=on_page />
        </section>
    }
}
