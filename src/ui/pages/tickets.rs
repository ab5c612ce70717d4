//! Support tickets: server-side pages over a date range, PDF download and
//! resolution.

use chrono::{Local, NaiveDate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::api::PDF_MIME;
use crate::core::config::Config;
use crate::core::endpoints::download_error_message;
use crate::core::format::iso_date;
use crate::core::listing::PageWindow;
use crate::core::models::{TicketQuery, TicketResolution, TicketView};
use crate::core::status::Status;
use crate::ui::common::{BaseModal, DataView, ErrorMessage, Pagination, SearchInput, StatusBadge, TextAreaField};
use crate::ui::fetch::{ApiList, use_api_client, use_api_list};
use crate::ui::icon::{Icon, icons};
use crate::ui::selection::{Selection, use_selection};
use crate::ui::upload::save_bytes;

const FETCH_FAILED: &str = "Failed to fetch tickets.";
const RESOLVE_FAILED: &str = "Failed to resolve ticket.";
const RANGE_ERROR: &str = "The start date must not be after the end date.";

/// Status counts of the tickets on the current page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TicketSummary {
    open: usize,
    in_progress: usize,
    resolved: usize,
}

impl TicketSummary {
    fn of(tickets: &[TicketView]) -> Self {
        tickets.iter().fold(Self::default(), |mut acc, t| {
            match t.status {
                Status::Open => acc.open += 1,
                Status::InProgress => acc.in_progress += 1,
                s if s.is_resolved() => acc.resolved += 1,
                _ => {}
            }
            acc
        })
    }
}

/// Apply one edited date; `None` when the range would be inverted.
fn with_date(query: &TicketQuery, value: &str, is_start: bool) -> Option<TicketQuery> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let (start_date, end_date) = if is_start {
        (date, query.end_date)
    } else {
        (query.start_date, date)
    };
    (start_date <= end_date).then(|| TicketQuery {
        start_date,
        end_date,
        page: 1,
        limit: query.limit,
    })
}

#[component]
pub fn TicketsPanel() -> impl IntoView {
    let limit = expect_context::<Config>().page_size;
    let query = RwSignal::new(TicketQuery::current_month(Local::now().date_naive(), limit));
    let list = use_api_list(
        move || query.get(),
        |client, query: TicketQuery| async move { client.tickets(&query).await },
        FETCH_FAILED,
    );
    let resolving = use_selection::<TicketView>();
    let range_error = RwSignal::new(None::<String>);
    let download_error = RwSignal::new(None::<String>);

    let rows = Memo::new(move |_| list.model.with(|m| m.filtered()));
    let state = Signal::derive(move || list.model.with(|m| m.view_state(rows.with(Vec::len))));
    let summary = Memo::new(move |_| list.model.with(|m| TicketSummary::of(&m.items)));
    let window = Signal::derive(move || {
        let (page, limit) = query.with(|q| (q.page, q.limit));
        PageWindow::new(page, limit, list.model.with(|m| m.total))
    });

    let on_search = Callback::new(move |term: String| list.model.update(|m| m.set_search(term)));
    let on_page = Callback::new(move |page: usize| query.update(|q| q.page = page.max(1)));

    let on_date = move |value: String, is_start: bool| match query.with_untracked(|q| with_date(q, &value, is_start)) {
        Some(next) => {
            range_error.set(None);
            query.set(next);
        }
        None => range_error.set(Some(RANGE_ERROR.to_string())),
    };

    let client = use_api_client();
    let download = Callback::new(move |ticket: TicketView| {
        download_error.set(None);
        let client = client.clone();
        spawn_local(async move {
            let saved = match client.download_ticket(&ticket.ticket_id).await {
                Ok(bytes) => save_bytes(&bytes, &ticket.download_name(), PDF_MIME)
                    .map_err(|reason| format!("Failed to download ticket: {reason}")),
                Err(err) => Err(download_error_message(&err)),
            };
            if let Err(message) = saved {
                leptos::logging::warn!("{message}");
                download_error.try_set(Some(message));
            }
        });
    });

    let actions = move |ticket: TicketView| {
        let can_resolve = ticket.can_resolve();
        let for_download = ticket.clone();
        view! {
            <div class="flex gap-2">
                <button
                    class="btn-icon"
                    title="Download PDF"
                    aria-label="Download PDF"
                    on:click=move |_| download.run(for_download.clone())
                >
                    <Icon name=icons::DOWNLOAD class="w-5 h-5" />
                </button>
                {can_resolve.then(|| view! {
                    <button class="btn-secondary" on:click=move |_| resolving.select(ticket.clone())>
                        "Resolve"
                    </button>
                })}
            </div>
        }
    };

    let table = move || {
        view! {
            <div class="overflow-x-auto">
                <table class="min-w-full bg-white">
                    <thead class="bg-gray-100">
                        <tr>
                            <th class="th">"Complainant's Name"</th>
                            <th class="th">"Ticket ID"</th>
                            <th class="th">"Nature of Ticket"</th>
                            <th class="th">"Subject"</th>
                            <th class="th">"Created"</th>
                            <th class="th">"Status"</th>
                            <th class="th">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || rows.get()
                            key=|t| (t.ticket_id.clone(), t.status)
                            children=move |ticket| {
                                let status = ticket.status;
                                view! {
                                    <tr class="border-b border-gray-100 hover:bg-gray-50">
                                        <td class="td font-medium">{ticket.name.clone()}</td>
                                        <td class="td text-xs text-gray-500">{ticket.ticket_id.clone()}</td>
                                        <td class="td">{ticket.category.clone()}</td>
                                        <td class="td">{ticket.subject.clone()}</td>
                                        <td class="td whitespace-nowrap">{ticket.created.clone()}</td>
                                        <td class="td"><StatusBadge status=status /></td>
                                        <td class="td">{actions(ticket)}</td>
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
                    each=move || rows.get()
                    key=|t| (t.ticket_id.clone(), t.status)
                    children=move |ticket| {
                        let status = ticket.status;
                        view! {
                            <div class="card p-4 space-y-2">
                                <div class="flex items-start justify-between gap-2">
                                    <div>
                                        <h3 class="text-base font-medium text-gray-800">{ticket.name.clone()}</h3>
                                        <p class="text-xs text-gray-500">{ticket.ticket_id.clone()}</p>
                                    </div>
                                    <StatusBadge status=status />
                                </div>
                                <p class="text-sm text-gray-600">{ticket.category.clone()} " · " {ticket.subject.clone()}</p>
                                <p class="text-xs text-gray-400">{ticket.created.clone()}</p>
                                {actions(ticket)}
                            </div>
                        }
                    }
                />
            </div>
        }
    };

    view! {
        <section class="space-y-4">
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <SummaryCard label="Total" value=Signal::derive(move || list.model.with(|m| m.total)) />
                <SummaryCard label="Open" value=Signal::derive(move || summary.get().open) />
                <SummaryCard label="In Progress" value=Signal::derive(move || summary.get().in_progress) />
                <SummaryCard label="Resolved" value=Signal::derive(move || summary.get().resolved) />
            </div>

            <div class="card p-4 sm:p-6 space-y-4">
                <div class="flex flex-col lg:flex-row lg:items-end justify-between gap-3">
                    <h2 class="text-xl font-medium">"All Tickets"</h2>
                    <div class="flex flex-col sm:flex-row gap-3">
                        <label class="text-sm text-gray-600">
                            "From"
                            <input
                                type="date"
                                class="input-base"
                                prop:value=move || query.with(|q| iso_date(q.start_date))
                                on:change=move |ev| on_date(event_target_value(&ev), true)
                            />
                        </label>
                        <label class="text-sm text-gray-600">
                            "To"
                            <input
                                type="date"
                                class="input-base"
                                prop:value=move || query.with(|q| iso_date(q.end_date))
                                on:change=move |ev| on_date(event_target_value(&ev), false)
                            />
                        </label>
                    </div>
                </div>
                <SearchInput placeholder="Search tickets by name, ID, category, or status..." on_search=on_search />
                <ErrorMessage error=range_error />
                <ErrorMessage error=download_error />
                <DataView state=state table=table cards=cards on_retry=Callback::new(move |_| list.refresh()) />
                <Pagination window=window on_page=on_page />
            </div>

            <ResolveTicketDialog list=list target=resolving />
        </section>
    }
}

#[component]
fn SummaryCard(label: &'static str, #[prop(into)] value: Signal<usize>) -> impl IntoView {
    view! {
        <div class="card p-4">
            <p class="text-sm text-gray-500">{label}</p>
            <p class="text-2xl font-semibold text-gray-900">{move || value.get()}</p>
        </div>
    }
}

/// Resolution text entry; the row turns resolved once the server accepts it.
#[component]
fn ResolveTicketDialog(list: ApiList<TicketView>, target: Selection<TicketView>) -> impl IntoView {
    let client = use_api_client();
    let text = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let close = move || {
        text.set(String::new());
        error.set(None);
        target.clear();
    };

    let submit = Callback::new(move |_: ()| {
        let Some(ticket) = target.get_untracked() else {
            return;
        };
        let Some(resolution) = TicketResolution::new(&text.get_untracked()) else {
            error.set(Some("Please enter resolution details.".to_string()));
            return;
        };
        busy.set(true);
        error.set(None);
        let client = client.clone();
        spawn_local(async move {
            let result = client.resolve_ticket(&ticket.ticket_id, &resolution).await;
            busy.try_set(false);
            match result {
                Ok(()) => {
                    list.model.try_update(|m| {
                        m.update_where(|t| t.ticket_id == ticket.ticket_id, |t| t.status = Status::Resolved);
                    });
                    close();
                }
                Err(err) => {
                    error.try_set(Some(err.user_message(RESOLVE_FAILED)));
                }
            }
        });
    });

    view! {
        <BaseModal
            title="Resolve Ticket".to_string()
            subtitle="The complainant will see this resolution.".to_string()
            is_open=Signal::derive(move || target.is_open())
            on_close=Callback::new(move |_| close())
            max_width="max-w-lg"
        >
            <div class="space-y-4">
                <p class="text-sm text-gray-600">
                    {move || target.map_or(String::new(), |t| format!("{}: {}", t.name, t.subject))}
                </p>
                <TextAreaField
                    label="Resolution"
                    required=true
                    placeholder="Enter resolution details..."
                    rows=4
                    value=text
                    on_input=Callback::new(move |value| text.set(value))
                    disabled=busy
                />
                <ErrorMessage error=error />
                <div class="flex justify-end gap-2">
                    <button class="btn-secondary" disabled=move || busy.get() on:click=move |_| close()>
                        "Cancel"
                    </button>
                    <button
                        class="btn-primary"
                        disabled=move || busy.get() || text.with(|t| t.trim().is_empty())
                        on:click=move |_| submit.run(())
                    >
                        {move || if busy.get() { "Resolving..." } else { "Resolve" }}
                    </button>
                </div>
            </div>
        </BaseModal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> TicketQuery {
        TicketQuery {
            start_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
            page: 3,
            limit: 10,
        }
    }

    fn ticket(status: Status) -> TicketView {
        TicketView {
            ticket_id: "t1".into(),
            name: "Jay Student".into(),
            email: "jay@example.com".into(),
            category: "Billing".into(),
            subject: "Refund".into(),
            status,
            created: "May 12, 2025".into(),
        }
    }

    #[test]
    fn test_date_change_returns_to_first_page() {
        let next = with_date(&query(), "2025-04-15", true).unwrap();
        assert_eq!(next.start_date, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap());
        assert_eq!(next.page, 1);
        assert_eq!(next.limit, 10);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        assert!(with_date(&query(), "2025-06-01", true).is_none());
        assert!(with_date(&query(), "2025-04-01", false).is_none());
        assert!(with_date(&query(), "not a date", false).is_none());
    }

    #[test]
    fn test_summary_counts_by_status() {
        let tickets = [
            ticket(Status::Open),
            ticket(Status::Open),
            ticket(Status::InProgress),
            ticket(Status::Resolved),
            ticket(Status::Closed),
        ];
        assert_eq!(
            TicketSummary::of(&tickets),
            TicketSummary {
                open: 2,
                in_progress: 1,
                resolved: 2
            }
        );
    }
}
