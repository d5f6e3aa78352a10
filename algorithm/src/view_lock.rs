// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use tracing::debug;

/// Whether the map camera follows the live location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewLockState {
    /// The user moves the map freely.
    #[default]
    Unlocked,

    /// The camera is recentred on every new fix.
    Locked,
}

/// What the owner of the map has to do after a view lock input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewLockAction {
    /// Nothing to do.
    None,

    /// Animate the camera to the current location and report back through
    /// [`ViewLock::on_recenter_finished`] once the animation is done.
    Recenter,
}

/// Small state machine deciding whether the camera is recentred
/// automatically on each fix.
///
/// Transitions:
/// - any map gesture unlocks immediately and cancels a pending recenter,
/// - toggle while unlocked requests a recenter, the lock engages once the
///   recenter animation finished,
/// - toggle while locked unlocks immediately.
///
/// The view lock never influences distance accounting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewLock {
    state: ViewLockState,
    recenter_pending: bool,
}

impl ViewLock {
    pub fn new() -> Self {
        ViewLock::default()
    }

    pub fn state(&self) -> ViewLockState {
        self.state
    }

    /// Returns `true` if a new fix shall move the camera.
    pub fn follows_location(&self) -> bool {
        self.state == ViewLockState::Locked
    }

    /// Returns `true` while a requested recenter animation is running.
    pub fn is_recenter_pending(&self) -> bool {
        self.recenter_pending
    }

    /// Handles a drag, touch or wheel gesture on the map.
    pub fn on_gesture(&mut self) {
        if self.state == ViewLockState::Locked || self.recenter_pending {
            debug!("Map gesture releases the view lock");
        }
        self.state = ViewLockState::Unlocked;
        self.recenter_pending = false;
    }

    /// Handles the "center" toggle.
    pub fn toggle(&mut self) -> ViewLockAction {
        match self.state {
            ViewLockState::Locked => {
                self.state = ViewLockState::Unlocked;
                ViewLockAction::None
            }
            ViewLockState::Unlocked if self.recenter_pending => ViewLockAction::None,
            ViewLockState::Unlocked => {
                self.recenter_pending = true;
                ViewLockAction::Recenter
            }
        }
    }

    /// Handles the end of the recenter animation.
    ///
    /// Locks the view only if the animation was requested by [`ViewLock::toggle`]
    /// and not interrupted by a gesture in the meantime.
    pub fn on_recenter_finished(&mut self) {
        if self.recenter_pending {
            self.recenter_pending = false;
            self.state = ViewLockState::Locked;
        }
    }
}
