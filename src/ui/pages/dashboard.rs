//! Dashboard page component
//!
//! Headline revenue and enrollment figures plus the newest instructors and
//! students, each card loading independently.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::fetch::{Paged, ViewState};
use crate::core::format::group_thousands;
use crate::core::models::Timeframe;
use crate::ui::common::{Avatar, DataView};
use crate::ui::fetch::{use_api_list, use_api_resource};

/// People shown per roster card
const RECENT_LIMIT: usize = 5;

#[component]
fn InfoCard(
    title: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] state: Signal<ViewState>,
    link: &'static str,
    href: &'static str,
) -> impl IntoView {
    view! {
        <div class="card p-6 flex flex-col items-center justify-center text-center">
            <h3 class="text-sm text-gray-500 mb-1">{title}</h3>
            <DataView
                state=state
                table=move || view! { <div class="text-3xl font-bold">{move || value.get()}</div> }
            />
            <A href=href attr:class="text-sm text-indigo-600 block mt-4 hover:underline">
                {link} " →"
            </A>
        </div>
    }
}

/// Name plus a secondary line
#[derive(Clone)]
struct RosterRow {
    id: String,
    name: String,
    avatar: Option<String>,
    detail: String,
}

#[component]
fn RosterCard(
    title: &'static str,
    #[prop(into)] rows: Signal<Vec<RosterRow>>,
    #[prop(into)] state: Signal<ViewState>,
    href: &'static str,
) -> impl IntoView {
    view! {
        <div class="card p-6">
            <div class="flex justify-between items-center mb-4">
                <h3 class="text-lg font-semibold">{title}</h3>
                <A href=href attr:class="text-sm text-indigo-600 hover:underline">"View all"</A>
            </div>
            <DataView
                state=state
                table=move || view! {
                    <ul class="space-y-2">
                        <For
                            each=move || rows.get()
                            key=|row| row.id.clone()
                            children=|row| view! {
                                <li class="flex items-center gap-3 p-2 rounded-xl hover:bg-indigo-50">
                                    <Avatar src=row.avatar name=row.name.clone() />
                                    <div>
                                        <div class="font-medium text-sm">{row.name}</div>
                                        <div class="text-xs text-gray-500">{row.detail}</div>
                                    </div>
                                </li>
                            }
                        />
                    </ul>
                }
            />
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let revenue = use_api_resource(
        || (),
        |client, ()| async move { client.revenue(Timeframe::Month).await },
        "Failed to fetch revenue data.",
    );
    let enrollments = use_api_resource(
        || (),
        |client, ()| async move { client.total_enrollments().await },
        "Failed to fetch enrollment data.",
    );
    let instructors = use_api_list(
        || (),
        |client, ()| async move { client.instructors().await.map(Paged::from) },
        "Failed to fetch instructors.",
    );
    let students = use_api_list(
        || (),
        |client, ()| async move { client.students().await.map(Paged::from) },
        "Failed to fetch students.",
    );

    let revenue_total = Signal::derive(move || {
        revenue
            .state
            .with(|s| s.data.as_ref().map(|r| r.formatted_total()).unwrap_or_default())
    });
    let enrollment_total = Signal::derive(move || {
        enrollments.state.with(|s| {
            s.data
                .map(group_thousands)
                .unwrap_or_default()
        })
    });

    let instructor_rows = Signal::derive(move || {
        instructors.model.with(|m| {
            m.items
                .iter()
                .take(RECENT_LIMIT)
                .map(|i| RosterRow {
                    id: i.id.clone(),
                    name: i.full_name.clone(),
                    avatar: i.avatar.clone(),
                    detail: i.expertise.clone(),
                })
                .collect()
        })
    });
    let student_rows = Signal::derive(move || {
        students.model.with(|m| {
            m.items
                .iter()
                .take(RECENT_LIMIT)
                .map(|s| RosterRow {
                    id: s.id.clone(),
                    name: s.full_name.clone(),
                    avatar: s.avatar.clone(),
                    detail: s.email.clone(),
                })
                .collect()
        })
    });

    view! {
        <div class="p-6 space-y-6">
            <h1 class="text-2xl sm:text-3xl font-bold text-gray-800">"Dashboard"</h1>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <InfoCard
                    title="Revenue"
                    value=revenue_total
                    state=Signal::derive(move || revenue.state.with(|s| s.view_state()))
                    link="Revenues report"
                    href="/revenues-report"
                />
                <InfoCard
                    title="Total enrollments"
                    value=enrollment_total
                    state=Signal::derive(move || enrollments.state.with(|s| s.view_state()))
                    link="All enrollments"
                    href="/memberships"
                />
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <RosterCard
                    title="Instructors"
                    rows=instructor_rows
                    state=Signal::derive(move || {
                        instructors.model.with(|m| m.view_state(m.items.len()))
                    })
                    href="/manage-instructor"
                />
                <RosterCard
                    title="Students"
                    rows=student_rows
                    state=Signal::derive(move || students.model.with(|m| m.view_state(m.items.len())))
                    href="/manage-student"
                />
            </div>
        </div>
    }
}
