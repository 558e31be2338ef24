use super::*;

#[test]
fn idle_gate_accepts_its_own_poll() {
    let gate = RefreshGate::default();
    let ticket = gate.begin_poll().unwrap();
    assert!(gate.accepts(ticket));
}

#[test]
fn polls_blocked_during_mutation() {
    let mut gate = RefreshGate::default();
    gate.begin_mutation();
    assert!(gate.is_mutating());
    assert_eq!(gate.begin_poll(), None);
}

#[test]
fn poll_started_before_mutation_is_discarded() {
    let mut gate = RefreshGate::default();
    let stale = gate.begin_poll().unwrap();
    gate.begin_mutation();
    assert!(!gate.accepts(stale));
    gate.end_mutation();
    assert!(!gate.accepts(stale));
}

#[test]
fn poll_after_mutation_is_accepted() {
    let mut gate = RefreshGate::default();
    gate.begin_mutation();
    gate.end_mutation();
    let fresh = gate.begin_poll().unwrap();
    assert!(gate.accepts(fresh));
}
