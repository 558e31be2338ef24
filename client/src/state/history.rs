//! Feeding history view state.
//!
//! Rows come from the 5 s poll. Deletes run through the [`RefreshGate`] so a
//! poll that raced the delete never re-inserts the removed row.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::time::Duration;

use super::refresh::{PollTicket, RefreshGate};
use crate::net::types::HistoryRecord;

/// Pause between a confirmed delete and the follow-up refresh.
pub const RESUME_DELAY: Duration = Duration::from_millis(300);

#[derive(Clone, Debug, Default)]
pub struct HistoryState {
    pub records: Vec<HistoryRecord>,
    pub loaded: bool,
    pub error: Option<String>,
    pub gate: RefreshGate,
}

impl HistoryState {
    /// Apply a poll response. Returns `false` when the gate discarded it.
    pub fn apply_poll(&mut self, ticket: PollTicket, result: Result<Vec<HistoryRecord>, String>) -> bool {
        if !self.gate.accepts(ticket) {
            return false;
        }
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
        self.loaded = true;
        true
    }

    pub fn begin_delete(&mut self) {
        self.gate.begin_mutation();
    }

    /// Close the mutation window. A confirmed delete removes the row locally
    /// so the next render omits it even before the follow-up poll lands.
    pub fn finish_delete(&mut self, history_id: i64, result: &Result<(), String>) {
        if result.is_ok() {
            self.records.retain(|r| r.history_id != history_id);
        }
        self.gate.end_mutation();
    }
}
