use leptos::prelude::*;

use crate::core::listing::{PageButton, PageWindow, page_buttons};
use crate::ui::icon::{Icon, icons};

/// Page controls under a list: summary, previous/next and numbered buttons
/// with ellipsis compaction.
#[component]
pub fn Pagination(
    /// Current window over the (filtered or server) total
    #[prop(into)]
    window: Signal<PageWindow>,
    /// Called with the 1-based page to show
    on_page: Callback<usize>,
) -> impl IntoView {
    let buttons = move || {
        let w = window.get();
        page_buttons(w.page, w.total_pages())
    };

    view! {
        <Show when=move || { window.get().total_items > 0 }>
            <nav class="flex flex-col sm:flex-row items-center justify-between gap-3 pt-4" aria-label="Pagination">
                <p class="text-sm text-gray-600">{move || window.get().summary()}</p>
                <div class="flex items-center gap-1">
                    <button
                        class="btn-page"
                        disabled=move || !window.get().has_previous()
                        on:click=move |_| on_page.run(window.get_untracked().page.saturating_sub(1))
                        aria-label="Previous page"
                    >
                        <Icon name=icons::CHEVRON_LEFT class="w-4 h-4"/>
                    </button>
                    {move || buttons().into_iter().map(|button| match button {
                        PageButton::Page(page) => view! {
                            <button
                                class="btn-page"
                                class:btn-page-active=move || window.get().page == page
                                on:click=move |_| on_page.run(page)
                            >
                                {page}
                            </button>
                        }.into_any(),
                        PageButton::Ellipsis => view! {
                            <span class="px-2 text-gray-400">"…"</span>
                        }.into_any(),
                    }).collect_view()}
                    <button
                        class="btn-page"
                        disabled=move || !window.get().has_next()
                        on:click=move |_| on_page.run(window.get_untracked().page + 1)
                        aria-label="Next page"
                    >
                        <Icon name=icons::CHEVRON_RIGHT class="w-4 h-4"/>
                    </button>
                </div>
            </nav>
        </Show>
    }
}
