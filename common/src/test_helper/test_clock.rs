use crate::clock::Clock;
use chrono::{DateTime, Utc};
use std::sync::mpsc;

/// A test implementation of [`Clock`] that allows deterministic control
/// of the current time in unit tests.
///
/// Internally, it uses an [`mpsc::channel`] to receive externally
/// provided points in time, and a [`RefCell`](std::cell::RefCell) to hold
/// the latest received value.
pub struct TestClock {
    sender: mpsc::Sender<DateTime<Utc>>,
    receiver: mpsc::Receiver<DateTime<Utc>>,
    now: std::cell::RefCell<DateTime<Utc>>,
}

impl TestClock {
    /// Creates a clock that stands still at `start` until moved.
    pub fn new(start: DateTime<Utc>) -> Self {
        let (tx, rx) = mpsc::channel::<DateTime<Utc>>();
        Self {
            sender: tx,
            receiver: rx,
            // Not synchronized, but sufficient for test usage.
            now: std::cell::RefCell::new(start),
        }
    }

    /// Returns a clone of the internal sender used to move the clock
    /// from outside, e.g. after the clock got moved into a module.
    pub fn sender(&self) -> mpsc::Sender<DateTime<Utc>> {
        self.sender.clone()
    }

    fn receive(&self) -> DateTime<Utc> {
        while let Ok(now) = self.receiver.try_recv() {
            *self.now.borrow_mut() = now;
        }
        *self.now.borrow()
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        self.receive()
    }
}

/// Sets the time reported by a [`TestClock`] through its sender.
///
/// Panics if sending fails, for example if the clock has been dropped.
pub fn set_now(sender: &mpsc::Sender<DateTime<Utc>>, now: &DateTime<Utc>) {
    sender
        .send(*now)
        .unwrap_or_else(|_| panic!("Failed to send time to the test clock"));
}
