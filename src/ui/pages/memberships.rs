//! Enrollment totals next to the memberships students let lapse.

use leptos::prelude::*;

use super::enrollments::EnrollmentsPanel;
use crate::core::config::Config;
use crate::core::fetch::Paged;
use crate::ui::common::{DataView, Pagination, SearchInput, StatusBadge};
use crate::ui::fetch::use_api_list;

#[component]
pub fn MembershipsPage() -> impl IntoView {
    view! {
        <div class="p-4 sm:p-6 space-y-6">
            <h1 class="text-2xl sm:text-3xl font-bold text-gray-800">"Memberships"</h1>
            <EnrollmentsPanel />
            <LostMembershipsPanel />
        </div>
    }
}

/// Students who dropped out, with the plan they left.
#[component]
fn LostMembershipsPanel() -> impl IntoView {
    let page_size = expect_context::<Config>().page_size;
    let list = use_api_list(
        || (),
        |client, ()| async move { client.drop_outs().await.map(Paged::from) },
        "Failed to fetch memberships.",
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
                            <th class="th">"Student Name"</th>
                            <th class="th">"Course"</th>
                            <th class="th">"Price"</th>
                            <th class="th">"Features"</th>
                            <th class="th">"Status"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || page.get().rows
                            key=|m| m.id.clone()
                            children=move |membership| {
                                let features = membership.feature_lines();
                                view! {
                                    <tr class="border-b border-gray-100 hover:bg-gray-50">
                                        <td class="td font-medium">{membership.student_name}</td>
                                        <td class="td">{membership.course}</td>
                                        <td class="td whitespace-nowrap">{membership.price}</td>
                                        <td class="td text-gray-600">
                                            <ul class="list-disc list-inside">
                                                {features.into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}
                                            </ul>
                                        </td>
                                        <td class="td"><StatusBadge status=membership.status /></td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        }
        .into_any()
    };

    let cards = move || {
        view! {
            <div class="space-y-3">
                <For
                    each=move || page.get().rows
                    key=|m| m.id.clone()
                    children=move |membership| {
                        let features = membership.feature_lines();
                        view! {
                            <div class="card p-4 space-y-2">
                                <div class="flex items-start justify-between gap-2">
                                    <h3 class="text-base font-medium text-gray-800">{membership.student_name}</h3>
                                    <StatusBadge status=membership.status />
                                </div>
                                <p class="text-sm text-gray-600">{membership.course}</p>
                                <p class="text-sm font-bold text-gray-800">{membership.price}</p>
                                <ul class="list-disc list-inside text-sm text-gray-600">
                                    {features.into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}
                                </ul>
                            </div>
                        }
                    }
                />
            </div>
        }
        .into_any()
    };

    view! {
        <section class="card p-4 sm:p-6 space-y-4">
            <div>
                <h2 class="text-xl font-medium text-red-500">"Lost Memberships"</h2>
                <p class="text-sm text-gray-500">"Students whose membership lapsed, with the plan they left."</p>
            </div>
            <SearchInput placeholder="Search by student, course or ID..." on_search=on_search />
            <DataView state=state table=table cards=cards on_retry=Callback::new(move |_| list.refresh()) />
            <Pagination window=Signal::derive(move || page.with(|p| p.window)) on_page=on_page />
        </section>
    }
}
