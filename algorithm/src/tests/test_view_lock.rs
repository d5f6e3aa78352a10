use crate::view_lock::*;

#[test]
fn starts_unlocked() {
    let view_lock = ViewLock::new();
    assert_eq!(view_lock.state(), ViewLockState::Unlocked);
    assert!(!view_lock.follows_location());
    assert!(!view_lock.is_recenter_pending());
}

#[test]
fn toggle_locks_after_recenter_finished() {
    let mut view_lock = ViewLock::new();
    assert_eq!(view_lock.toggle(), ViewLockAction::Recenter);
    assert_eq!(view_lock.state(), ViewLockState::Unlocked);
    assert!(view_lock.is_recenter_pending());

    view_lock.on_recenter_finished();
    assert_eq!(view_lock.state(), ViewLockState::Locked);
    assert!(view_lock.follows_location());
    assert!(!view_lock.is_recenter_pending());
}

#[test]
fn toggle_while_locked_unlocks_immediately() {
    let mut view_lock = ViewLock::new();
    view_lock.toggle();
    view_lock.on_recenter_finished();

    assert_eq!(view_lock.toggle(), ViewLockAction::None);
    assert_eq!(view_lock.state(), ViewLockState::Unlocked);
}

#[test]
fn gesture_unlocks() {
    let mut view_lock = ViewLock::new();
    view_lock.toggle();
    view_lock.on_recenter_finished();

    view_lock.on_gesture();
    assert_eq!(view_lock.state(), ViewLockState::Unlocked);
}

#[test]
fn gesture_cancels_pending_recenter() {
    let mut view_lock = ViewLock::new();
    view_lock.toggle();
    view_lock.on_gesture();
    view_lock.on_recenter_finished();
    assert_eq!(view_lock.state(), ViewLockState::Unlocked);
}

#[test]
fn toggle_while_recenter_pending_is_ignored() {
    let mut view_lock = ViewLock::new();
    assert_eq!(view_lock.toggle(), ViewLockAction::Recenter);
    assert_eq!(view_lock.toggle(), ViewLockAction::None);
    assert!(view_lock.is_recenter_pending());
}

#[test]
fn unrequested_recenter_finish_does_not_lock() {
    let mut view_lock = ViewLock::new();
    view_lock.on_recenter_finished();
    assert_eq!(view_lock.state(), ViewLockState::Unlocked);
}
