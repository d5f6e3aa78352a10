// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{Event, EventBus, EventKind, EventKindType};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{Instant, timeout};
use tracing::debug;

/// Sends a quit signal to a running module and waits for it to stop gracefully.
///
/// This function publishes a [`QuitEvent`](EventKind::QuitEvent) through the given [`EventBus`]
/// and waits up to 100 ms for the module's task to finish.
///
/// # Panics
/// This function panics if:
/// - The module does not stop within the timeout.
/// - The task returns an error (`Err(())`).
pub async fn stop_module(
    event_bus: &EventBus,
    handle: &mut tokio::task::JoinHandle<Result<(), ()>>,
) {
    event_bus.publish(&Event {
        kind: EventKind::QuitEvent,
    });
    let result = timeout(std::time::Duration::from_millis(100), handle)
        .await
        .expect("Module doesn't handle quit event in timeout")
        .expect("Module task panicked");
    assert!(result.is_ok(), "Module stopped with an error");
}

/// Waits for an event of the given type on `rx` within `duration`.
///
/// Events of other types received in the meantime are skipped. Only the
/// variant type is compared, payload data is ignored.
///
/// # Panics
///
/// This function panics if no matching event is received within the specified
/// `duration`.
pub async fn wait_for_event(
    rx: &mut tokio::sync::broadcast::Receiver<Event>,
    duration: std::time::Duration,
    exp_event: EventKindType,
) -> Event {
    let deadline = Instant::now() + duration;
    while let Ok(received) = tokio::time::timeout_at(deadline, rx.recv()).await {
        match received {
            Ok(event) if event.event_type() == exp_event => return event,
            Ok(event) => debug!("Skipping event {:?}", event.event_type()),
            Err(RecvError::Closed) => break,
            Err(e) => debug!("Receiver error while waiting for {:?}: {e}", exp_event),
        }
    }
    panic!("Failed to receive event of type {:?}", exp_event);
}

/// Asserts that no event of the given type arrives on `rx` within `duration`.
///
/// # Panics
///
/// This function panics as soon as a matching event is received.
pub async fn expect_no_event(
    rx: &mut tokio::sync::broadcast::Receiver<Event>,
    duration: std::time::Duration,
    unexpected: EventKindType,
) {
    let deadline = Instant::now() + duration;
    while let Ok(received) = tokio::time::timeout_at(deadline, rx.recv()).await {
        match received {
            Ok(event) if event.event_type() == unexpected => {
                panic!("Received unexpected event {:?}", event)
            }
            Err(RecvError::Closed) => break,
            _ => (),
        }
    }
}
