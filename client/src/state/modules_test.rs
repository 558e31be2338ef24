use super::*;

fn module(id: &str, weight: Option<f64>) -> Module {
    Module { module_id: id.to_owned(), cam_id: format!("cam-{id}"), status: "active".to_owned(), weight }
}

#[test]
fn first_fetch_never_notifies() {
    let mut state = ModuleListState::default();
    let changes = state.apply_fetch(Ok(vec![module("M1", Some(500.0))]));
    assert!(changes.is_empty());
    assert!(state.loaded);
    assert_eq!(state.modules.len(), 1);
}

#[test]
fn changed_weight_notifies_once() {
    let mut state = ModuleListState::default();
    state.apply_fetch(Ok(vec![module("M1", Some(500.0)), module("M2", Some(10.0))]));
    let changes = state.apply_fetch(Ok(vec![module("M1", Some(480.0)), module("M2", Some(10.0))]));
    assert_eq!(changes, vec![WeightChange { module_id: "M1".into(), old: Some(500.0), new: Some(480.0) }]);
    assert_eq!(changes[0].message(), "M1: Weight updated 500g → 480g");

    let again = state.apply_fetch(Ok(vec![module("M1", Some(480.0)), module("M2", Some(10.0))]));
    assert!(again.is_empty());
}

#[test]
fn null_transitions_notify() {
    let mut state = ModuleListState::default();
    state.apply_fetch(Ok(vec![module("M1", None)]));
    let to_value = state.apply_fetch(Ok(vec![module("M1", Some(12.0))]));
    assert_eq!(to_value.len(), 1);
    assert_eq!(to_value[0].message(), "M1: Weight updated N/A → 12g");
    let to_null = state.apply_fetch(Ok(vec![module("M1", None)]));
    assert_eq!(to_null.len(), 1);
    assert_eq!(to_null[0].new, None);
}

#[test]
fn new_module_does_not_notify() {
    let mut state = ModuleListState::default();
    state.apply_fetch(Ok(vec![module("M1", Some(1.0))]));
    let changes = state.apply_fetch(Ok(vec![module("M1", Some(1.0)), module("M2", Some(99.0))]));
    assert!(changes.is_empty());
}

#[test]
fn failed_fetch_keeps_previous_snapshot() {
    let mut state = ModuleListState::default();
    state.apply_fetch(Ok(vec![module("M1", Some(100.0))]));
    let none = state.apply_fetch(Err("HTTP error! status: 500".into()));
    assert!(none.is_empty());
    assert_eq!(state.error.as_deref(), Some("HTTP error! status: 500"));
    assert_eq!(state.modules.len(), 1);

    let changes = state.apply_fetch(Ok(vec![module("M1", Some(90.0))]));
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].old, Some(100.0));
    assert_eq!(state.error, None);
}
