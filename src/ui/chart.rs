//! SVG line and bar charts for report series.

use leptos::prelude::*;

use crate::core::chart::{ChartFrame, layout};

/// Horizontal grid lines above the baseline
const TICK_COUNT: usize = 4;

/// At most this many x-axis labels are drawn
const MAX_X_LABELS: usize = 12;

const MAX_BAR_WIDTH: f64 = 48.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

/// One point (or bar) per bucket of `series`
#[component]
pub fn SeriesChart(
    /// `(label, value)` pairs in display order
    #[prop(into)]
    series: Signal<Vec<(String, f64)>>,
    #[prop(default = ChartKind::Line)]
    kind: ChartKind,
    /// Formats y-axis tick values
    #[prop(default = default_tick_label)]
    tick_label: fn(f64) -> String,
    /// Accessible description
    #[prop(default = "Chart")]
    title: &'static str,
) -> impl IntoView {
    let frame = ChartFrame::default();
    let geometry = Memo::new(move |_| series.with(|s| layout(s, frame, TICK_COUNT)));

    let grid = move || {
        geometry
            .get()
            .ticks
            .into_iter()
            .map(|(y, value)| {
                view! {
                    <g>
                        <line
                            x1=frame.padding
                            x2=frame.width - frame.padding
                            y1=y
                            y2=y
                            class="stroke-gray-200"
                            stroke-width="1"
                        />
                        <text x=frame.padding - 6.0 y=y + 4.0 text-anchor="end" class="fill-gray-500 text-[10px]">
                            {tick_label(value)}
                        </text>
                    </g>
                }
            })
            .collect_view()
    };

    let x_labels = move || {
        let points = geometry.get().points;
        let step = points.len().div_ceil(MAX_X_LABELS).max(1);
        points
            .into_iter()
            .step_by(step)
            .map(|p| {
                view! {
                    <text x=p.x y=frame.baseline() + 16.0 text-anchor="middle" class="fill-gray-500 text-[10px]">
                        {p.label}
                    </text>
                }
            })
            .collect_view()
    };

    let marks = move || {
        let geometry = geometry.get();
        match kind {
            ChartKind::Line => {
                let dots = geometry
                    .points
                    .iter()
                    .map(|p| {
                        view! {
                            <circle cx=p.x cy=p.y r="3.5" class="fill-indigo-600">
                                <title>{format!("{}: {}", p.label, tick_label(p.value))}</title>
                            </circle>
                        }
                    })
                    .collect_view();
                view! {
                    <g>
                        <polyline
                            points=geometry.polyline()
                            fill="none"
                            class="stroke-indigo-600"
                            stroke-width="2"
                        />
                        {dots}
                    </g>
                }
                .into_any()
            }
            ChartKind::Bar => {
                let width = geometry.bar_width().min(MAX_BAR_WIDTH);
                let baseline = geometry.frame.baseline();
                geometry
                    .points
                    .into_iter()
                    .map(|p| {
                        view! {
                            <rect
                                x=p.x - width / 2.0
                                y=p.y
                                width=width
                                height=(baseline - p.y).max(0.0)
                                rx="3"
                                class="fill-indigo-500"
                            >
                                <title>{format!("{}: {}", p.label, tick_label(p.value))}</title>
                            </rect>
                        }
                    })
                    .collect_view()
                    .into_any()
            }
        }
    };

    view! {
        <svg
            viewBox=frame.view_box()
            class="w-full h-auto"
            role="img"
            aria-label=title
            preserveAspectRatio="xMidYMid meet"
        >
            {grid}
            {marks}
            {x_labels}
        </svg>
    }
}

fn default_tick_label(value: f64) -> String {
    format!("{value:.0}")
}
