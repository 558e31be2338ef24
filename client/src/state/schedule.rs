//! Schedule editor state machine.
//!
//! DESIGN
//! ======
//! The editor is either `Viewing` (periodic refresh runs) or `Editing` one
//! row (an add or edit form; refresh is suspended). Poll ticks check
//! [`ScheduleEditor::is_editing`] and skip the whole fetch cycle, and
//! [`ScheduleEditor::apply_fetch`] drops responses that land while a form is
//! open, so a refresh never clobbers user input.
//!
//! Saving is split in two: `prepare_save` validates the draft and produces a
//! request without leaving edit mode; the view calls `finish_save` only once
//! the backend accepted it. A rejected save keeps the form open.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use chrono::{Days, NaiveDate};

use crate::net::types::{Module, NewSchedule, RecurringScheduleRequest, Schedule, ScheduleStatus};

/// Number of consecutive days created by "Repeat Daily".
pub const RECURRING_DAYS: u32 = 7;
/// Schedules are shown for today through this many days ahead.
pub const WINDOW_DAYS: u64 = 30;
pub const DEFAULT_FEED_TIME: &str = "15:00";
pub const DEFAULT_AMOUNT: &str = "1000";

/// `[today, today + 30 days]`.
#[must_use]
pub fn schedule_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today, today.checked_add_days(Days::new(WINDOW_DAYS)).unwrap_or(today))
}

/// Row being edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditTarget {
    New { module_id: String },
    Existing { module_id: String, schedule_id: i64, status: ScheduleStatus },
}

impl EditTarget {
    #[must_use]
    pub fn module_id(&self) -> &str {
        match self {
            Self::New { module_id } | Self::Existing { module_id, .. } => module_id,
        }
    }
}

/// Raw form values, kept as strings the way the inputs report them.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleDraft {
    pub feed_date: String,
    pub feed_time: String,
    pub amount: String,
    pub repeat_daily: bool,
}

impl ScheduleDraft {
    #[must_use]
    pub fn for_new(today: NaiveDate) -> Self {
        Self {
            feed_date: today.format("%Y-%m-%d").to_string(),
            feed_time: DEFAULT_FEED_TIME.to_owned(),
            amount: DEFAULT_AMOUNT.to_owned(),
            repeat_daily: false,
        }
    }

    #[must_use]
    pub fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            feed_date: schedule.feed_date.format("%Y-%m-%d").to_string(),
            feed_time: schedule.feed_time.clone(),
            amount: schedule.amount.to_string(),
            repeat_daily: false,
        }
    }

    /// Check the form and parse its values.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule, in date, time, amount order.
    pub fn validate(&self) -> Result<(NaiveDate, String, f64), DraftError> {
        let date_raw = self.feed_date.trim();
        if date_raw.is_empty() {
            return Err(DraftError::MissingDate);
        }
        let feed_date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d").map_err(|_| DraftError::MissingDate)?;
        let feed_time = self.feed_time.trim();
        if feed_time.is_empty() {
            return Err(DraftError::MissingTime);
        }
        let amount = self.amount.trim().parse::<f64>().map_err(|_| DraftError::InvalidAmount)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(DraftError::InvalidAmount);
        }
        Ok((feed_date, feed_time.to_owned(), amount))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftError {
    MissingDate,
    MissingTime,
    InvalidAmount,
}

impl DraftError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingDate => "Feed date is required",
            Self::MissingTime => "Feed time is required",
            Self::InvalidAmount => "Please enter a valid amount greater than 0",
        }
    }
}

/// Backend call a validated draft turns into.
#[derive(Clone, Debug, PartialEq)]
pub enum SaveRequest {
    Create(NewSchedule),
    Recurring(RecurringScheduleRequest),
    Update { schedule_id: i64, body: NewSchedule },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing { target: EditTarget, draft: ScheduleDraft },
}

/// One active module and its schedules, in backend order.
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleBlock {
    pub module_id: String,
    pub schedules: Vec<Schedule>,
}

/// Group schedules under their owning active module. Inactive modules and
/// schedules for unknown modules are dropped.
#[must_use]
pub fn group_by_module(modules: &[Module], schedules: &[Schedule]) -> Vec<ModuleBlock> {
    modules
        .iter()
        .filter(|m| m.is_active())
        .map(|m| ModuleBlock {
            module_id: m.module_id.clone(),
            schedules: schedules.iter().filter(|s| s.module_id == m.module_id).cloned().collect(),
        })
        .collect()
}

#[derive(Clone, Debug, Default)]
pub struct ScheduleEditor {
    pub modules: Vec<Module>,
    pub schedules: Vec<Schedule>,
    pub loaded: bool,
    pub error: Option<String>,
    pub mode: EditMode,
    pub saving: bool,
}

impl ScheduleEditor {
    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Editing { .. })
    }

    /// Apply a refresh. Ignored while a form is open; returns whether it applied.
    pub fn apply_fetch(&mut self, result: Result<(Vec<Module>, Vec<Schedule>), String>) -> bool {
        if self.is_editing() {
            return false;
        }
        match result {
            Ok((modules, schedules)) => {
                self.modules = modules;
                self.schedules = schedules;
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
        self.loaded = true;
        true
    }

    #[must_use]
    pub fn blocks(&self) -> Vec<ModuleBlock> {
        group_by_module(&self.modules, &self.schedules)
    }

    pub fn begin_add(&mut self, module_id: &str, today: NaiveDate) {
        self.mode = EditMode::Editing {
            target: EditTarget::New { module_id: module_id.to_owned() },
            draft: ScheduleDraft::for_new(today),
        };
    }

    pub fn begin_edit(&mut self, schedule: &Schedule) {
        self.mode = EditMode::Editing {
            target: EditTarget::Existing {
                module_id: schedule.module_id.clone(),
                schedule_id: schedule.schedule_id,
                status: schedule.status,
            },
            draft: ScheduleDraft::from_schedule(schedule),
        };
    }

    /// Mutate the open draft; no-op while viewing.
    pub fn edit_draft(&mut self, f: impl FnOnce(&mut ScheduleDraft)) {
        if let EditMode::Editing { draft, .. } = &mut self.mode {
            f(draft);
        }
    }

    #[must_use]
    pub fn target(&self) -> Option<&EditTarget> {
        match &self.mode {
            EditMode::Editing { target, .. } => Some(target),
            EditMode::Viewing => None,
        }
    }

    #[must_use]
    pub fn draft(&self) -> Option<&ScheduleDraft> {
        match &self.mode {
            EditMode::Editing { draft, .. } => Some(draft),
            EditMode::Viewing => None,
        }
    }

    #[must_use]
    pub fn editing_schedule_id(&self) -> Option<i64> {
        match &self.mode {
            EditMode::Editing { target: EditTarget::Existing { schedule_id, .. }, .. } => Some(*schedule_id),
            _ => None,
        }
    }

    #[must_use]
    pub fn new_row_module(&self) -> Option<&str> {
        match &self.mode {
            EditMode::Editing { target: target @ EditTarget::New { .. }, .. } => Some(target.module_id()),
            _ => None,
        }
    }

    /// Validate the open draft and build the request to send. Stays in edit mode.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; `None` when nothing is being edited.
    pub fn prepare_save(&self) -> Option<Result<SaveRequest, DraftError>> {
        let EditMode::Editing { target, draft } = &self.mode else {
            return None;
        };
        Some(draft.validate().map(|(feed_date, feed_time, amount)| match target {
            EditTarget::New { module_id } if draft.repeat_daily => SaveRequest::Recurring(RecurringScheduleRequest {
                module_id: module_id.clone(),
                start_date: feed_date,
                feed_time,
                amount,
                days_ahead: RECURRING_DAYS,
            }),
            EditTarget::New { module_id } => SaveRequest::Create(NewSchedule {
                module_id: module_id.clone(),
                feed_date,
                feed_time,
                amount,
                status: ScheduleStatus::Pending,
            }),
            EditTarget::Existing { module_id, schedule_id, .. } => SaveRequest::Update {
                schedule_id: *schedule_id,
                body: NewSchedule {
                    module_id: module_id.clone(),
                    feed_date,
                    feed_time,
                    amount,
                    status: ScheduleStatus::Pending,
                },
            },
        }))
    }

    /// Leave edit mode after a successful save of `target`.
    ///
    /// A save that completes after the user cancelled and opened another
    /// form leaves that newer form alone. Returns whether the form closed.
    pub fn finish_save(&mut self, target: &EditTarget) -> bool {
        if self.target() != Some(target) {
            return false;
        }
        self.saving = false;
        self.mode = EditMode::Viewing;
        true
    }

    /// Re-enable saving after a failed save of `target`; the draft stays open.
    pub fn fail_save(&mut self, target: &EditTarget) {
        if self.target() == Some(target) {
            self.saving = false;
        }
    }

    /// Drop a schedule the backend confirmed deleted.
    pub fn remove_schedule(&mut self, schedule_id: i64) {
        self.schedules.retain(|s| s.schedule_id != schedule_id);
    }

    pub fn cancel(&mut self) {
        self.saving = false;
        self.mode = EditMode::Viewing;
    }
}
