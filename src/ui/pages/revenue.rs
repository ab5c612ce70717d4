//! Revenue report with a day / month / year switch.

use leptos::prelude::*;

use crate::core::format::format_usd;
use crate::core::models::Timeframe;
use crate::ui::chart::{ChartKind, SeriesChart};
use crate::ui::common::DataView;
use crate::ui::fetch::use_api_resource;

#[component]
pub fn RevenuePage() -> impl IntoView {
    let timeframe = RwSignal::new(Timeframe::default());
    let report = use_api_resource(
        move || timeframe.get(),
        |client, timeframe| async move { client.revenue(timeframe).await },
        "Failed to fetch revenue data.",
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
        <div class="p-4 sm:p-6 space-y-6">
            <div class="flex flex-col sm:flex-row sm:items-center justify-between gap-4">
                <h1 class="text-2xl sm:text-3xl font-bold text-gray-800">"Revenue Report"</h1>
                <div class="flex gap-2" role="group" aria-label="Timeframe">
                    {Timeframe::ALL
                        .into_iter()
                        .map(|option| view! {
                            <button
                                class=move || if timeframe.get() == option { "btn-page-active" } else { "btn-page" }
                                on:click=move |_| timeframe.set(option)
                            >
                                {option.to_string()}
                            </button>
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="card p-4 sm:p-6 space-y-4">
                <div>
                    <p class="text-sm text-gray-500">
                        {move || format!("Total revenue by {}", timeframe.get().query_value())}
                    </p>
                    <p class="text-3xl font-bold text-gray-900">{move || total.get()}</p>
                </div>
                <DataView
                    state=state
                    table=move || view! {
                        <SeriesChart series=series kind=ChartKind::Line tick_label=format_usd title="Revenue" />
                    }
                    on_retry=Callback::new(move |_| report.refresh())
                />
            </div>
        </div>
    }
}
