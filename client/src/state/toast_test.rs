use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Info, "one");
    let b = state.push(ToastKind::Error, "two");
    assert!(b > a);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[1].message, "two");
}

#[test]
fn dismiss_removes_only_target() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Success, "saved");
    let b = state.push(ToastKind::Info, "loading");
    state.dismiss(a);
    assert_eq!(state.items.iter().map(|t| t.id).collect::<Vec<_>>(), vec![b]);
    state.dismiss(a);
    assert_eq!(state.items.len(), 1);
}

#[test]
fn kinds_map_to_css_modifiers() {
    assert_eq!(ToastKind::Error.css_class(), "toast toast--error");
}
