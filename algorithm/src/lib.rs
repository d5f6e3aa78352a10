// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Algorithms of the run tracker.
//!
//! Everything in here is synchronous and free of I/O, the modules feed
//! fixes and commands in and publish the results.

pub mod distance;
pub mod recorder;
pub mod view_lock;

pub use distance::calculate_distance;
pub use recorder::RecordingSession;
pub use view_lock::{ViewLock, ViewLockAction, ViewLockState};

#[cfg(test)]
mod tests;
