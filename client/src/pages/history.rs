//! Feeding history log.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rows are written by the backend when a feeder reports a completed
//! schedule. The view polls every 5 s; deletes pause polling through the
//! history [`RefreshGate`](crate::state::refresh::RefreshGate) and resume it
//! with a refresh shortly after the backend confirms.

use leptos::prelude::*;

use crate::components::export_button::ExportButton;
use crate::components::toast_stack::notify;
use crate::net::api;
use crate::net::types::HistoryRecord;
use crate::state::history::{HistoryState, RESUME_DELAY};
use crate::state::toast::{ToastKind, ToastState};
use crate::util::clock;
use crate::util::format::{format_history_date, format_history_datetime, format_weight};
use crate::util::pdf::ReportKind;
use crate::util::poll::{HISTORY_INTERVAL, spawn_once, spawn_poll};

const COLUMNS: usize = 9;

async fn refresh(state: RwSignal<HistoryState>) {
    let Some(ticket) = state.with_untracked(|s| s.gate.begin_poll()) else {
        return;
    };
    let result = api::fetch_history().await;
    #[cfg(feature = "hydrate")]
    if let Err(e) = &result {
        log::error!("Error loading history: {e}");
    }
    state.update(|s| {
        s.apply_poll(ticket, result);
    });
}

async fn delete(state: RwSignal<HistoryState>, toasts: RwSignal<ToastState>, history_id: i64) {
    state.update(HistoryState::begin_delete);
    let result = api::delete_history(history_id).await;
    state.update(|s| s.finish_delete(history_id, &result));
    match result {
        Ok(()) => {
            notify(toasts, ToastKind::Success, "History record deleted successfully");
            #[cfg(feature = "hydrate")]
            gloo_timers::future::sleep(RESUME_DELAY).await;
            refresh(state).await;
        }
        Err(e) => notify(toasts, ToastKind::Error, format!("Error deleting history record: {e}")),
    }
}

#[component]
pub fn HistoryPage() -> impl IntoView {
    let state = expect_context::<RwSignal<HistoryState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let report_ref = NodeRef::<leptos::html::Div>::new();
    #[cfg(not(feature = "hydrate"))]
    let _ = RESUME_DELAY;

    spawn_poll(HISTORY_INTERVAL, move || refresh(state));

    let on_delete = Callback::new(move |history_id: i64| {
        if !clock::confirm("Are you sure you want to delete this history record?") {
            return;
        }
        spawn_once(delete(state, toasts, history_id));
    });

    view! {
        <section class="view view--history">
            <div class="view__header">
                <h1 class="view__title">"Feeding History"</h1>
                <ExportButton kind=ReportKind::History target=report_ref/>
            </div>
            <div node_ref=report_ref>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"History ID"</th>
                            <th>"Created At"</th>
                            <th>"Schedule ID"</th>
                            <th>"Module ID"</th>
                            <th>"Feed Date"</th>
                            <th>"Feed Time"</th>
                            <th>"Amount"</th>
                            <th>"Status"</th>
                            <th data-pdf-strip="">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let s = state.get();
                            if let Some(err) = s.error {
                                return message_row(format!("Error loading history: {err}"));
                            }
                            if !s.loaded {
                                return message_row("Loading...".to_owned());
                            }
                            if s.records.is_empty() {
                                return message_row("No history records found".to_owned());
                            }
                            let deleting = s.gate.is_mutating();
                            s.records
                                .into_iter()
                                .map(|record| history_row(record, deleting, on_delete))
                                .collect_view()
                                .into_any()
                        }}
                    </tbody>
                </table>
            </div>
        </section>
    }
}

fn message_row(text: String) -> AnyView {
    view! { <tr><td colspan=COLUMNS.to_string()>{text}</td></tr> }.into_any()
}

fn history_row(record: HistoryRecord, deleting: bool, on_delete: Callback<i64>) -> impl IntoView {
    let id = record.history_id;
    let status = record.status.map_or("N/A", |s| s.as_str());
    let status_class = format!("status-badge status-{status}");
    view! {
        <tr>
            <td>{id}</td>
            <td>{format_history_datetime(record.created_at.as_deref())}</td>
            <td>{record.schedule_id.map_or_else(|| "N/A".to_owned(), |v| v.to_string())}</td>
            <td>{record.module_id.unwrap_or_else(|| "N/A".to_owned())}</td>
            <td>{format_history_date(record.feed_date)}</td>
            <td>{record.feed_time.unwrap_or_else(|| "N/A".to_owned())}</td>
            <td>{format_weight(record.amount)}</td>
            <td><span class=status_class>{status}</span></td>
            <td data-pdf-strip="">
                <button class="btn btn--delete" disabled=deleting on:click=move |_| on_delete.run(id)>
                    "Delete"
                </button>
            </td>
        </tr>
    }
}
