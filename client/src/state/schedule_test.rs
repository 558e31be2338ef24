use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn module(id: &str, status: &str) -> Module {
    Module { module_id: id.to_owned(), cam_id: "C1".to_owned(), status: status.to_owned(), weight: None }
}

fn schedule(id: i64, module_id: &str) -> Schedule {
    Schedule {
        schedule_id: id,
        module_id: module_id.to_owned(),
        feed_date: date(2026, 10, 16),
        feed_time: "08:00".to_owned(),
        amount: 250.0,
        status: ScheduleStatus::Done,
    }
}

// =============================================================
// Grouping
// =============================================================

#[test]
fn module_without_schedules_gets_one_empty_block() {
    let blocks = group_by_module(&[module("M1", "active")], &[]);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].module_id, "M1");
    assert!(blocks[0].schedules.is_empty());
}

#[test]
fn grouping_skips_inactive_modules_and_orphans() {
    let blocks = group_by_module(
        &[module("M1", "active"), module("M2", "inactive"), module("M3", "ACTIVE")],
        &[schedule(1, "M1"), schedule(2, "M2"), schedule(3, "M9"), schedule(4, "M1")],
    );
    assert_eq!(blocks.iter().map(|b| b.module_id.as_str()).collect::<Vec<_>>(), vec!["M1", "M3"]);
    assert_eq!(blocks[0].schedules.iter().map(|s| s.schedule_id).collect::<Vec<_>>(), vec![1, 4]);
    assert!(blocks[1].schedules.is_empty());
}

#[test]
fn window_spans_thirty_days() {
    let (start, end) = schedule_window(date(2026, 10, 16));
    assert_eq!(start, date(2026, 10, 16));
    assert_eq!(end, date(2026, 11, 15));
}

// =============================================================
// Drafts
// =============================================================

#[test]
fn new_draft_uses_defaults() {
    let draft = ScheduleDraft::for_new(date(2026, 10, 16));
    assert_eq!(draft.feed_date, "2026-10-16");
    assert_eq!(draft.feed_time, "15:00");
    assert_eq!(draft.amount, "1000");
    assert!(!draft.repeat_daily);
}

#[test]
fn validation_reports_first_violation() {
    let mut draft = ScheduleDraft::for_new(date(2026, 10, 16));
    draft.feed_date.clear();
    draft.feed_time.clear();
    assert_eq!(draft.validate(), Err(DraftError::MissingDate));
    draft.feed_date = "2026-10-16".into();
    assert_eq!(draft.validate(), Err(DraftError::MissingTime));
    draft.feed_time = "09:00".into();
    for bad in ["", "abc", "0", "-5", "NaN"] {
        draft.amount = bad.into();
        assert_eq!(draft.validate(), Err(DraftError::InvalidAmount), "amount {bad:?}");
    }
    draft.amount = "12.5".into();
    assert_eq!(draft.validate(), Ok((date(2026, 10, 16), "09:00".to_owned(), 12.5)));
}

#[test]
fn draft_error_messages_are_user_facing() {
    assert_eq!(DraftError::MissingDate.message(), "Feed date is required");
    assert_eq!(DraftError::MissingTime.message(), "Feed time is required");
    assert_eq!(DraftError::InvalidAmount.message(), "Please enter a valid amount greater than 0");
}

// =============================================================
// Editor state machine
// =============================================================

#[test]
fn refresh_is_ignored_while_editing() {
    let mut editor = ScheduleEditor::default();
    assert!(editor.apply_fetch(Ok((vec![module("M1", "active")], vec![schedule(1, "M1")]))));
    editor.begin_edit(&schedule(1, "M1"));
    editor.edit_draft(|d| d.amount = "777".into());

    assert!(!editor.apply_fetch(Ok((vec![], vec![]))));
    assert_eq!(editor.modules.len(), 1);
    assert_eq!(editor.draft().unwrap().amount, "777");
}

#[test]
fn cancel_returns_to_viewing_and_accepts_refresh() {
    let mut editor = ScheduleEditor::default();
    editor.begin_add("M1", date(2026, 10, 16));
    assert!(editor.is_editing());
    assert_eq!(editor.new_row_module(), Some("M1"));
    editor.cancel();
    assert!(!editor.is_editing());
    assert!(editor.apply_fetch(Ok((vec![module("M1", "active")], vec![]))));
}

#[test]
fn new_schedule_save_builds_create_request() {
    let mut editor = ScheduleEditor::default();
    editor.begin_add("M1", date(2026, 10, 16));
    let request = editor.prepare_save().unwrap().unwrap();
    assert_eq!(
        request,
        SaveRequest::Create(NewSchedule {
            module_id: "M1".into(),
            feed_date: date(2026, 10, 16),
            feed_time: "15:00".into(),
            amount: 1000.0,
            status: ScheduleStatus::Pending,
        })
    );
    assert!(editor.is_editing());
    assert!(editor.finish_save(&EditTarget::New { module_id: "M1".into() }));
    assert!(!editor.is_editing());
    assert!(!editor.saving);
}

#[test]
fn late_save_leaves_newer_form_open() {
    let mut editor = ScheduleEditor::default();
    editor.begin_add("M1", date(2026, 10, 16));
    let first = editor.target().cloned().unwrap();
    assert!(editor.prepare_save().unwrap().is_ok());
    editor.saving = true;

    editor.cancel();
    editor.begin_add("M2", date(2026, 10, 16));
    editor.edit_draft(|d| d.amount = "42".into());

    assert!(!editor.finish_save(&first));
    assert_eq!(editor.new_row_module(), Some("M2"));
    assert_eq!(editor.draft().unwrap().amount, "42");
    assert!(!editor.apply_fetch(Ok((vec![module("M2", "active")], vec![]))));
}

#[test]
fn failed_save_keeps_draft_and_reenables_saving() {
    let mut editor = ScheduleEditor::default();
    editor.begin_edit(&schedule(7, "M1"));
    let target = editor.target().cloned().unwrap();
    editor.saving = true;
    editor.fail_save(&target);
    assert!(!editor.saving);
    assert!(editor.is_editing());
}

#[test]
fn repeat_daily_builds_seven_day_recurring_request() {
    let mut editor = ScheduleEditor::default();
    editor.begin_add("M2", date(2026, 10, 16));
    editor.edit_draft(|d| {
        d.feed_date = "2026-10-20".into();
        d.repeat_daily = true;
    });
    let Some(Ok(SaveRequest::Recurring(body))) = editor.prepare_save() else {
        panic!("expected recurring request");
    };
    assert_eq!(body.start_date, date(2026, 10, 20));
    assert_eq!(body.days_ahead, 7);
    assert_eq!(body.module_id, "M2");
}

#[test]
fn edit_save_resets_status_to_pending() {
    let mut editor = ScheduleEditor::default();
    editor.begin_edit(&schedule(5, "M1"));
    assert_eq!(editor.editing_schedule_id(), Some(5));
    assert_eq!(editor.target().map(EditTarget::module_id), Some("M1"));
    let Some(Ok(SaveRequest::Update { schedule_id, body })) = editor.prepare_save() else {
        panic!("expected update request");
    };
    assert_eq!(schedule_id, 5);
    assert_eq!(body.status, ScheduleStatus::Pending);
    assert_eq!(body.amount, 250.0);
}

#[test]
fn invalid_draft_keeps_editing() {
    let mut editor = ScheduleEditor::default();
    editor.begin_add("M1", date(2026, 10, 16));
    editor.edit_draft(|d| d.amount = "0".into());
    assert_eq!(editor.prepare_save(), Some(Err(DraftError::InvalidAmount)));
    assert!(editor.is_editing());
}

#[test]
fn prepare_save_is_none_while_viewing() {
    let editor = ScheduleEditor::default();
    assert_eq!(editor.prepare_save(), None);
}

// =============================================================
// Deletion
// =============================================================

#[test]
fn removed_schedule_disappears_from_blocks() {
    let mut editor = ScheduleEditor::default();
    assert!(editor.apply_fetch(Ok((
        vec![module("M1", "active")],
        vec![schedule(1, "M1"), schedule(2, "M1")],
    ))));
    editor.remove_schedule(1);
    let blocks = editor.blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].schedules.iter().map(|s| s.schedule_id).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn removing_last_schedule_keeps_module_placeholder() {
    let mut editor = ScheduleEditor::default();
    assert!(editor.apply_fetch(Ok((vec![module("M1", "active")], vec![schedule(1, "M1")]))));
    editor.remove_schedule(1);
    editor.remove_schedule(99);
    let blocks = editor.blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].module_id, "M1");
    assert!(blocks[0].schedules.is_empty());
}
