//! Loading, error, empty and data states of a list panel.

use leptos::prelude::*;

use super::message::ErrorMessage;
use super::spinner::LoadingSpinner;
use crate::core::fetch::ViewState;
use crate::core::layout::Layout;
use crate::ui::viewport::use_layout;

/// Renders exactly one of the four states, in priority order.
#[component]
pub fn DataView(
    /// Current state, usually from `ListViewModel::view_state`
    #[prop(into)]
    state: Signal<ViewState>,
    /// Wide viewports
    #[prop(into)]
    table: ViewFn,
    /// Narrow viewports; falls back to `table` when absent
    #[prop(optional, into)]
    cards: Option<ViewFn>,
    /// Optional retry action shown under errors
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
) -> impl IntoView {
    let layout = use_layout();
    // rebuild only when the state itself changes
    let state = Memo::new(move |_| state.get());

    move || match state.get() {
        ViewState::Loading => view! { <LoadingSpinner /> }.into_any(),
        ViewState::Error(message) => view! {
            <div class="py-8 space-y-3">
                <ErrorMessage error=Signal::stored(Some(message)) />
                {on_retry.map(|retry| view! {
                    <button class="btn-secondary" on:click=move |_| retry.run(())>"Try again"</button>
                })}
            </div>
        }
        .into_any(),
        ViewState::Empty => view! {
            <p class="py-12 text-center text-gray-500">{ViewState::empty_message()}</p>
        }
        .into_any(),
        ViewState::Ready => match (layout.get(), cards.as_ref()) {
            (Layout::Cards, Some(cards)) => cards.run(),
            _ => table.run(),
        },
    }
}
