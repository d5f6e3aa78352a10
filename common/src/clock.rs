// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use chrono::{DateTime, Utc};

/// A source of wall clock time for the start and stop of a recording.
///
/// Implementations of this trait decide what "now" is. Production code uses
/// [`SystemClock`]; tests inject a clock they can move forward by hand so
/// elapsed time and pace become deterministic.
pub trait Clock {
    /// Returns the current point in time in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// A [`Clock`] implementation that reads the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        SystemClock
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
