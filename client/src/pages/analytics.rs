//! Analytics dashboard: daily totals, weekly feeding, module status.

use leptos::prelude::*;

use crate::components::bar_chart::BarChart;
use crate::components::export_button::ExportButton;
use crate::components::pie_chart::PieChart;
use crate::net::api;
use crate::state::analytics::{AnalyticsState, status_entries, weekly_series};
use crate::util::pdf::ReportKind;
use crate::util::poll::{ANALYTICS_INTERVAL, spawn_poll};

/// Fetch all three analytics feeds. A failed feed keeps its previous value.
async fn refresh(state: RwSignal<AnalyticsState>) {
    match api::fetch_analytics_summary().await {
        Ok(summary) => state.update(|s| s.summary = Some(summary)),
        Err(e) => log_error("summary", &e),
    }
    match api::fetch_weekly_feeding().await {
        Ok(weekly) => state.update(|s| s.weekly = weekly),
        Err(e) => log_error("weekly chart", &e),
    }
    match api::fetch_module_status().await {
        Ok(status) => state.update(|s| s.status = status),
        Err(e) => log_error("status chart", &e),
    }
}

fn log_error(what: &str, error: &str) {
    #[cfg(feature = "hydrate")]
    log::error!("Error loading {what}: {error}");
    #[cfg(not(feature = "hydrate"))]
    let _ = (what, error);
}

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let state = expect_context::<RwSignal<AnalyticsState>>();
    let report_ref = NodeRef::<leptos::html::Div>::new();

    spawn_poll(ANALYTICS_INTERVAL, move || refresh(state));

    let weekly = Signal::derive(move || state.with(|s| weekly_series(&s.weekly)));
    let status = Signal::derive(move || state.with(|s| status_entries(&s.status)));

    view! {
        <section class="view view--analytics">
            <div class="view__header">
                <h1 class="view__title">"Analytics"</h1>
                <ExportButton kind=ReportKind::Analytics target=report_ref/>
            </div>
            <div class="analytics" node_ref=report_ref>
                <div class="summary-cards">
                    <div class="summary-card">
                        <span class="summary-card__label">"Total Fed Today"</span>
                        <span class="summary-card__value">{move || state.with(AnalyticsState::total_fed_label)}</span>
                    </div>
                    <div class="summary-card">
                        <span class="summary-card__label">"Active Modules"</span>
                        <span class="summary-card__value">{move || state.with(AnalyticsState::active_modules_label)}</span>
                    </div>
                </div>
                <div class="chart-grid">
                    <div class="chart-panel">
                        <h2 class="chart-panel__title">"Weekly Feeding (grams)"</h2>
                        <BarChart points=weekly unit="g"/>
                    </div>
                    <div class="chart-panel">
                        <h2 class="chart-panel__title">"Module Status"</h2>
                        <PieChart entries=status/>
                    </div>
                </div>
            </div>
        </section>
    }
}
