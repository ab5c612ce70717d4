use leptos::prelude::*;

use crate::core::status::Status;

/// Pill showing a record status, coloured by its tone
#[component]
pub fn StatusBadge(
    /// Status to display
    #[prop(into)]
    status: Signal<Status>,
) -> impl IntoView {
    view! {
        <span class=move || {
            format!(
                "inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium {}",
                status.get().tone().class()
            )
        }>
            {move || status.get().to_string()}
        </span>
    }
}

