use leptos::prelude::*;

use crate::core::listing::SEARCH_DEBOUNCE_MS;
use crate::ui::icon::{Icon, icons};

/// Search box that reports the term after typing pauses.
///
/// Every keystroke bumps a sequence number; only the timer belonging to the
/// latest keystroke fires `on_search`.
#[component]
pub fn SearchInput(
    /// Placeholder text
    #[prop(default = "Search...")]
    placeholder: &'static str,
    /// Called with the settled term
    on_search: Callback<String>,
) -> impl IntoView {
    let text = RwSignal::new(String::new());
    let sequence = StoredValue::new(0u64);

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        text.set(value.clone());
        sequence.update_value(|n| *n += 1);
        let ticket = sequence.get_value();

        #[cfg(not(feature = "ssr"))]
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if sequence.try_get_value() == Some(ticket) {
                on_search.run(value);
            }
        });
        #[cfg(feature = "ssr")]
        {
            let _ = (ticket, SEARCH_DEBOUNCE_MS);
            on_search.run(value);
        }
    };

    view! {
        <div class="relative w-full sm:max-w-xs">
            <span class="absolute inset-y-0 left-0 pl-3 flex items-center pointer-events-none">
                <Icon name=icons::SEARCH class="w-4 h-4 opacity-60"/>
            </span>
            <input
                type="search"
                class="input-base pl-9"
                placeholder=placeholder
                prop:value=move || text.get()
                on:input=on_input
            />
        </div>
    }
}
