use super::*;

fn record(id: i64) -> HistoryRecord {
    HistoryRecord {
        history_id: id,
        created_at: Some("2026-10-16 08:00:00".to_owned()),
        schedule_id: Some(id * 10),
        module_id: Some("M1".to_owned()),
        feed_date: None,
        feed_time: Some("08:00".to_owned()),
        amount: Some(100.0),
        status: None,
    }
}

#[test]
fn poll_replaces_records() {
    let mut state = HistoryState::default();
    let ticket = state.gate.begin_poll().unwrap();
    assert!(state.apply_poll(ticket, Ok(vec![record(1), record(2)])));
    assert_eq!(state.records.len(), 2);
    assert!(state.loaded);
}

#[test]
fn poll_error_keeps_rows_and_sets_message() {
    let mut state = HistoryState::default();
    let t1 = state.gate.begin_poll().unwrap();
    state.apply_poll(t1, Ok(vec![record(1)]));
    let t2 = state.gate.begin_poll().unwrap();
    state.apply_poll(t2, Err("HTTP error! status: 500".into()));
    assert_eq!(state.records.len(), 1);
    assert_eq!(state.error.as_deref(), Some("HTTP error! status: 500"));
}

#[test]
fn stale_poll_cannot_resurrect_deleted_row() {
    let mut state = HistoryState::default();
    let t0 = state.gate.begin_poll().unwrap();
    state.apply_poll(t0, Ok(vec![record(1), record(2)]));

    let in_flight = state.gate.begin_poll().unwrap();
    state.begin_delete();
    state.finish_delete(1, &Ok(()));
    assert!(state.records.iter().all(|r| r.history_id != 1));

    let applied = state.apply_poll(in_flight, Ok(vec![record(1), record(2)]));
    assert!(!applied);
    assert!(state.records.iter().all(|r| r.history_id != 1));
}

#[test]
fn failed_delete_keeps_row_and_reopens_polling() {
    let mut state = HistoryState::default();
    let t0 = state.gate.begin_poll().unwrap();
    state.apply_poll(t0, Ok(vec![record(1)]));
    state.begin_delete();
    assert!(state.gate.begin_poll().is_none());
    state.finish_delete(1, &Err("Failed to delete".into()));
    assert_eq!(state.records.len(), 1);
    assert!(state.gate.begin_poll().is_some());
}
