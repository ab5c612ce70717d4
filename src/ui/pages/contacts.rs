//! Contact-form submissions, searched and paged in the browser.

use leptos::prelude::*;

use crate::core::config::Config;
use crate::core::fetch::Paged;
use crate::core::models::ContactView;
use crate::ui::common::{BaseModal, DataView, Detail, Pagination, SearchInput};
use crate::ui::fetch::use_api_list;
use crate::ui::selection::use_selection;

/// Characters of the query shown in the table before it is cut.
const QUERY_PREVIEW: usize = 60;

fn preview(query: &str) -> String {
    if query.chars().count() <= QUERY_PREVIEW {
        return query.to_string();
    }
    let cut: String = query.chars().take(QUERY_PREVIEW).collect();
    format!("{}…", cut.trim_end())
}

#[component]
pub fn ContactsPanel() -> impl IntoView {
    let page_size = expect_context::<Config>().page_size;
    let list = use_api_list(
        || (),
        |client, ()| async move { client.contacts().await.map(Paged::from) },
        "Failed to fetch contacts.",
    );
    let selected = use_selection::<ContactView>();

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
                            <th class="th">"Name"</th>
                            <th class="th">"Email"</th>
                            <th class="th">"Type"</th>
                            <th class="th">"Subject"</th>
                            <th class="th">"Query"</th>
                            <th class="th">"Received"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || page.get().rows
                            key=|c| c.id.clone()
                            children=move |contact| {
                                let row = contact.clone();
                                view! {
                                    <tr
                                        class="border-b border-gray-100 hover:bg-gray-50 cursor-pointer"
                                        on:click=move |_| selected.select(row.clone())
                                    >
                                        <td class="td font-medium">{contact.name}</td>
                                        <td class="td">{contact.email}</td>
                                        <td class="td">{contact.kind}</td>
                                        <td class="td">{contact.subject}</td>
                                        <td class="td text-gray-600">{preview(&contact.query)}</td>
                                        <td class="td whitespace-nowrap">{contact.received}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        }
    };

    let cards = move || {
        view! {
            <div class="space-y-3">
                <For
                    each=move || page.get().rows
                    key=|c| c.id.clone()
                    children=move |contact| {
                        let row = contact.clone();
                        view! {
                            <button class="card p-4 w-full text-left space-y-1" on:click=move |_| selected.select(row.clone())>
                                <h3 class="text-base font-medium text-gray-800">{contact.name}</h3>
                                <p class="text-sm text-gray-500">{contact.email}</p>
                                <p class="text-sm text-gray-600">{contact.subject}</p>
                                <p class="text-xs text-gray-400">{contact.kind} " · " {contact.received}</p>
                            </button>
                        }
                    }
                />
            </div>
        }
    };

    view! {
        <section class="card p-4 sm:p-6 space-y-4">
            <h2 class="text-xl font-medium">"Contact Requests"</h2>
            <SearchInput placeholder="Search contacts by name, email, or subject..." on_search=on_search />
            <DataView state=state table=table cards=cards on_retry=Callback::new(move |_| list.refresh()) />
            <Pagination window=Signal::derive(move || page.with(|p| p.window)) on_page=on_page />

            <BaseModal
                title=Signal::derive(move || selected.map_or(String::new(), |c| c.subject.clone()))
                is_open=Signal::derive(move || selected.is_open())
                on_close=Callback::new(move |_| selected.clear())
                max_width="max-w-lg"
            >
                {move || selected.get().map(|c| view! {
                    <div class="space-y-4">
                        <dl class="grid grid-cols-1 sm:grid-cols-2 gap-3 text-sm">
                            <Detail label="Name" value=c.name.clone() />
                            <Detail label="Email" value=c.email.clone() />
                            <Detail label="Type" value=c.kind.clone() />
                            <Detail label="Received" value=c.received.clone() />
                        </dl>
                        <p class="text-sm text-gray-700 whitespace-pre-line">{c.query.clone()}</p>
                    </div>
                })}
            </BaseModal>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_query_is_kept() {
        assert_eq!(preview("Where is my invoice?"), "Where is my invoice?");
    }

    #[test]
    fn test_long_query_is_cut() {
        let long = "word ".repeat(30);
        let cut = preview(&long);
        assert!(cut.ends_with('…'));
        assert!(cut.chars().count() <= QUERY_PREVIEW + 1);
    }
}
