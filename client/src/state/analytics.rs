//! Analytics dashboard state and chart series preparation.

#[cfg(test)]
#[path = "analytics_test.rs"]
mod analytics_test;

use crate::net::types::{AnalyticsSummary, StatusCount, WeeklyPoint};
use crate::util::format::capitalize;

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
pub const ACTIVE_COLOR: &str = "#22c55e";
pub const INACTIVE_COLOR: &str = "#ef4444";

#[derive(Clone, Debug, Default)]
pub struct AnalyticsState {
    pub summary: Option<AnalyticsSummary>,
    pub weekly: Vec<WeeklyPoint>,
    pub status: Vec<StatusCount>,
}

impl AnalyticsState {
    #[must_use]
    pub fn total_fed_label(&self) -> String {
        self.summary
            .as_ref()
            .map_or_else(|| "0g".to_owned(), |s| format!("{:.0}g", s.total_fed_today))
    }

    #[must_use]
    pub fn active_modules_label(&self) -> String {
        self.summary
            .as_ref()
            .map_or_else(|| "0/0".to_owned(), |s| format!("{}/{}", s.active_modules, s.total_modules))
    }
}

/// Seven `(day, grams)` points Sun..Sat; days missing from `points` are 0.
#[must_use]
pub fn weekly_series(points: &[WeeklyPoint]) -> Vec<(String, f64)> {
    WEEKDAYS
        .iter()
        .map(|day| {
            let amount: f64 = points.iter().filter(|p| p.day == *day).map(|p| p.amount).sum();
            ((*day).to_owned(), amount)
        })
        .collect()
}

/// Pie entries `(label, count, color)` with capitalized labels.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn status_entries(counts: &[StatusCount]) -> Vec<(String, f64, String)> {
    counts
        .iter()
        .map(|c| {
            let color = if c.status.eq_ignore_ascii_case("active") { ACTIVE_COLOR } else { INACTIVE_COLOR };
            (capitalize(&c.status), c.count as f64, color.to_owned())
        })
        .collect()
}
