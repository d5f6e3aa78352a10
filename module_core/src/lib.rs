// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Event bus and module abstraction shared by every run tracker module.

use algorithm::ViewLockState;
use common::{
    error::RecorderError,
    position::{Fix, GeoPoint},
    recording::RecordingSummary,
};
use strum_macros::EnumDiscriminants;

/// Represents a high-level event in the system.
///
/// Each `Event` wraps an [`EventKind`], which defines the actual type
/// and data carried by the event.
///
/// This structure is designed to be passed through an [`EventBus`]
/// between asynchronous modules.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// The inner event type and associated data.
    pub kind: EventKind,
}

impl Event {
    /// Returns the payload free type of the event.
    pub fn event_type(&self) -> EventKindType {
        EventKindType::from(&self.kind)
    }
}

impl From<EventKind> for Event {
    fn from(kind: EventKind) -> Self {
        Event { kind }
    }
}

/// A thread-safe, reference-counted pointer to a [`Fix`].
pub type FixPtr = std::sync::Arc<Fix>;

/// A thread-safe, reference-counted pointer to a [`GeoPoint`].
pub type GeoPointPtr = std::sync::Arc<GeoPoint>;

/// A thread-safe, reference-counted pointer to a recorded path.
///
/// Renderers receive the complete path so they can redraw the overlay
/// without keeping their own copy in sync.
pub type PathPtr = std::sync::Arc<Vec<GeoPoint>>;

/// A thread-safe, reference-counted pointer to a [`RecordingSummary`].
pub type RecordingSummaryPtr = std::sync::Arc<RecordingSummary>;

/// Enumerates the different kinds of events that can be emitted
/// and transmitted via the [`EventBus`].
///
/// The payload free discriminant [`EventKindType`] is used to wait for or
/// filter events without caring about their data.
#[derive(Clone, Debug, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(EventKindType))]
#[strum_discriminants(derive(Hash))]
pub enum EventKind {
    /// Indicates that a module shall terminate.
    QuitEvent,

    /// A new position sample of the location sensor.
    FixEvent(FixPtr),

    /// The location sensor will not deliver any further fixes.
    FixStreamEndedEvent,

    /// Request to start recording a run at the current location.
    StartRecordingEvent,

    /// Request to finish the running recording.
    StopRecordingEvent,

    /// The user dragged, touched or scrolled the map.
    MapGestureEvent,

    /// The user pressed the "center" toggle.
    CenterToggleEvent,

    /// The map finished the camera animation requested by a [`EventKind::RecenterRequestEvent`].
    RecenterFinishedEvent,

    /// The live location marker moved.
    LocationUpdatedEvent(GeoPointPtr),

    /// The camera shall move to the given location.
    RecenterRequestEvent(GeoPointPtr),

    /// The view lock changed its state.
    ViewLockChangedEvent(ViewLockState),

    /// A recording started at the given location.
    RecordingStartedEvent(GeoPointPtr),

    /// The recorded path changed.
    PathUpdatedEvent(PathPtr),

    /// A recording finished with the given summary.
    RecordingFinishedEvent(RecordingSummaryPtr),

    /// A recorder operation was rejected. The recording itself is unchanged.
    RecordingFailedEvent(RecorderError),
}

/// A simple asynchronous event bus for publishing and subscribing to [`Event`]s.
///
/// The event bus uses a [`tokio::sync::broadcast::channel`] under the hood,
/// allowing multiple receivers to listen for the same stream of events.
///
/// Each published event is cloned and distributed to all active subscribers.
/// If no subscribers exist at the time of publication, the event is discarded silently.
pub struct EventBus {
    /// The broadcast sender used internally to distribute events.
    sender: tokio::sync::broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new [`EventBus`] with a fixed buffer capacity of 100 messages.
    ///
    /// When the buffer is full, the oldest messages are dropped automatically
    /// as new ones are published.
    pub fn new() -> Self {
        let (sender, _) = tokio::sync::broadcast::channel(100);
        EventBus { sender }
    }

    /// Subscribes to the event bus and returns a [`tokio::sync::broadcast::Receiver`].
    ///
    /// The returned receiver will receive all future events published after the
    /// subscription is created.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Publishes an [`Event`] to all active subscribers.
    ///
    /// If no subscribers exist, the event is discarded silently.
    pub fn publish(&self, event: &Event) {
        let _ = self.sender.send(event.clone());
    }

    /// Returns a sender that can publish from outside of the async runtime,
    /// e.g. from a signal handler.
    pub fn sender(&self) -> tokio::sync::broadcast::Sender<Event> {
        self.sender.clone()
    }

    /// Creates a [`ModuleCtx`] bound to this [`EventBus`].
    pub fn context(&self) -> ModuleCtx {
        ModuleCtx::new(self)
    }
}

/// Provides a default instance of [`EventBus`].
impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Defines the common interface for an asynchronous module
/// that can be executed and communicate via the [`EventBus`].
#[async_trait::async_trait]
pub trait Module {
    /// Runs the module asynchronously until completion.
    ///
    /// This function typically contains the module's main event loop,
    /// reacting to messages received through the [`ModuleCtx`].
    async fn run(&mut self) -> Result<(), ()>;
}

/// Provides a module-scoped context for interacting with the [`EventBus`].
///
/// Each `ModuleCtx` owns both a sender and a receiver, allowing the module
/// to both publish and listen for events concurrently.
pub struct ModuleCtx {
    /// The broadcast sender used to publish events.
    pub sender: tokio::sync::broadcast::Sender<Event>,

    /// The broadcast receiver used to listen for events.
    pub receiver: tokio::sync::broadcast::Receiver<Event>,
}

impl ModuleCtx {
    /// Constructs a new [`ModuleCtx`] from the given [`EventBus`].
    ///
    /// Clones the internal broadcast sender and creates a new receiver.
    pub fn new(event_bus: &EventBus) -> Self {
        ModuleCtx {
            sender: event_bus.sender.clone(),
            receiver: event_bus.subscribe(),
        }
    }

    /// Publishes an event of the given kind.
    ///
    /// Returns the number of subscribers that received the event.
    pub fn publish_event(
        &self,
        kind: EventKind,
    ) -> Result<usize, tokio::sync::broadcast::error::SendError<Event>> {
        self.sender.send(Event { kind })
    }
}

/// Borrows the payload of an event if it is of the given variant.
///
/// ```rust
/// use module_core::{EventKind, payload_ref};
///
/// let kind = EventKind::StartRecordingEvent;
/// assert!(payload_ref!(kind, EventKind::PathUpdatedEvent).is_none());
/// ```
#[macro_export]
macro_rules! payload_ref {
    ($kind:expr, $variant:path) => {
        match &$kind {
            $variant(payload) => Some(payload),
            _ => None,
        }
    };
}

pub mod test_helper;
