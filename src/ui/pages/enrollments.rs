//! Monthly enrollment counts.

use leptos::prelude::*;

use crate::core::format::group_thousands;
use crate::ui::chart::{ChartKind, SeriesChart};
use crate::ui::common::DataView;
use crate::ui::fetch::use_api_resource;

fn count_tick(value: f64) -> String {
    group_thousands(value.max(0.0).round() as u64)
}

#[component]
pub fn EnrollmentsPanel() -> impl IntoView {
    let report = use_api_resource(
        || (),
        |client, ()| async move { client.enrollment_report().await },
        "Failed to fetch enrollment data.",
    );

    let state = Signal::derive(move || report.state.with(|s| s.view_state()));
    let total = Signal::derive(move || {
        report
            .state
            .with(|s| s.data.as_ref().map(|r| r.formatted_total()).unwrap_or_default())
    });
    let series = Signal::derive(move || {
        report
            .state
            .with(|s| s.data.as_ref().map(|r| r.series()).unwrap_or_default())
    });

    view! {
        <section class="card p-4 sm:p-6 space-y-4">
            <div>
                <p class="text-sm text-gray-500">"Total enrollments"</p>
                <p class="text-3xl font-bold text-gray-900">{move || total.get()}</p>
            </div>
            <DataView
                state=state
                table=move || view! {
                    <SeriesChart series=series kind=ChartKind::Bar tick_label=count_tick title="Enrollments per month" />
                }
                on_retry=Callback::new(move |_| report.refresh())
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_tick_rounds_and_groups() {
        assert_eq!(count_tick(1234.4), "1,234");
        assert_eq!(count_tick(-3.0), "0");
    }
}
