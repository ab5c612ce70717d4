//! Tickets and contact requests share one screen behind a tab switch.

use leptos::prelude::*;

use super::contacts::ContactsPanel;
use super::tickets::TicketsPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SupportTab {
    Tickets,
    Contacts,
}

impl SupportTab {
    fn label(self) -> &'static str {
        match self {
            Self::Tickets => "Tickets",
            Self::Contacts => "Contacts",
        }
    }
}

#[component]
pub fn TicketContactPage() -> impl IntoView {
    let tab = RwSignal::new(SupportTab::Tickets);

    let tab_button = move |which: SupportTab| {
        view! {
            <button
                class=move || if tab.get() == which { "btn-page-active" } else { "btn-page" }
                on:click=move |_| tab.set(which)
            >
                {which.label()}
            </button>
        }
    };

    view! {
        <div class="p-4 sm:p-6 space-y-6">
            <div class="flex flex-col sm:flex-row sm:items-center justify-between gap-4">
                <h1 class="text-2xl sm:text-3xl font-bold text-gray-800">"Tickets & Contacts"</h1>
                <div class="flex gap-2" role="tablist">
                    {tab_button(SupportTab::Tickets)}
                    {tab_button(SupportTab::Contacts)}
                </div>
            </div>
            {move || match tab.get() {
                SupportTab::Tickets => view! { <TicketsPanel /> }.into_any(),
                SupportTab::Contacts => view! { <ContactsPanel /> }.into_any(),
            }}
        </div>
    }
}
