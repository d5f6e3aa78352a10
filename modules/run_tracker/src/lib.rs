// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Run tracker module
//!
//! Owns the recording of a run. It follows the live location, records the
//! path while a recording is running and decides whether the map camera
//! follows the location.

use algorithm::{RecordingSession, ViewLock, ViewLockAction, ViewLockState};
use async_trait::async_trait;
use common::{
    clock::{Clock, SystemClock},
    error::RecorderError,
    position::GeoPoint,
    recording::RecordingState,
};
use module_core::{EventKind, FixPtr, Module, ModuleCtx};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct RunTracker<C: Clock = SystemClock> {
    ctx: ModuleCtx,
    clock: C,
    session: Option<RecordingSession>,
    view_lock: ViewLock,
    last_location: Option<GeoPoint>,
    start_pending: bool,
}

impl RunTracker<SystemClock> {
    /// Creates a new run tracker using the system time.
    pub fn new(ctx: ModuleCtx) -> Self {
        RunTracker::new_with_clock(SystemClock, ctx)
    }
}

impl<C: Clock> RunTracker<C> {
    /// Creates a new run tracker with a custom clock.
    pub fn new_with_clock(clock: C, ctx: ModuleCtx) -> Self {
        RunTracker {
            ctx,
            clock,
            session: None,
            view_lock: ViewLock::new(),
            last_location: None,
            start_pending: false,
        }
    }

    /// State of the current recording, `Idle` if nothing was recorded yet.
    pub fn state(&self) -> RecordingState {
        self.session
            .as_ref()
            .map_or(RecordingState::Idle, RecordingSession::state)
    }

    /// The current or last finished recording.
    pub fn session(&self) -> Option<&RecordingSession> {
        self.session.as_ref()
    }

    pub fn view_lock_state(&self) -> ViewLockState {
        self.view_lock.state()
    }

    /// Handles a new fix of the location sensor.
    ///
    /// The live location is updated for every valid fix. A pending start
    /// request begins the recording at this fix. While recording, the fix is
    /// appended to the path, and while the view is locked the camera is asked
    /// to follow.
    fn on_fix(&mut self, fix: FixPtr) {
        if !fix.point.is_finite() {
            warn!("Dropping fix with invalid coordinate {:?}", fix.point);
            self.publish_failure(RecorderError::InvalidCoordinate(fix.point));
            return;
        }
        let point = fix.point;
        self.last_location = Some(point);
        self.publish(EventKind::LocationUpdatedEvent(Arc::new(point)));

        if self.start_pending {
            self.start_pending = false;
            self.start_session_at(point);
        } else if let Some(session) = self
            .session
            .as_mut()
            .filter(|session| session.state() == RecordingState::Recording)
        {
            match session.add_fix(point) {
                Ok(()) => {
                    let path = Arc::new(session.path().to_vec());
                    self.publish(EventKind::PathUpdatedEvent(path));
                }
                Err(e) => {
                    warn!("Fix rejected by the recorder. Error: {e}");
                    self.publish_failure(e);
                }
            }
        }

        if self.view_lock.follows_location() {
            self.publish(EventKind::RecenterRequestEvent(Arc::new(point)));
        }
    }

    /// Starts a new recording at the last known location.
    ///
    /// A finished recording is replaced. The request is ignored while a
    /// recording is running. As long as no location is known, the request
    /// is kept and the recording starts with the first fix.
    fn on_start_recording(&mut self) {
        if self.state() == RecordingState::Recording {
            warn!("Recording already running, start request ignored");
            return;
        }
        match self.last_location {
            Some(location) => self.start_session_at(location),
            None => {
                info!("No location known yet, recording starts with the first fix");
                self.start_pending = true;
            }
        }
    }

    fn start_session_at(&mut self, location: GeoPoint) {
        match RecordingSession::start(location, self.clock.now()) {
            Ok(session) => {
                let path = Arc::new(session.path().to_vec());
                self.session = Some(session);
                self.publish(EventKind::RecordingStartedEvent(Arc::new(location)));
                self.publish(EventKind::PathUpdatedEvent(path));
            }
            Err(e) => {
                error!("Failed to start the recording. Error: {e}");
                self.publish_failure(e);
            }
        }
    }

    fn on_stop_recording(&mut self) {
        let now = self.clock.now();
        let result = match self.session.as_mut() {
            Some(session) => session.stop(now),
            None => {
                self.start_pending = false;
                Err(RecorderError::InvalidState {
                    operation: "stop",
                    state: RecordingState::Idle,
                })
            }
        };
        match result {
            Ok(summary) => {
                info!("Run finished: {}", summary);
                self.publish(EventKind::RecordingFinishedEvent(Arc::new(summary)));
            }
            Err(e) => {
                warn!("Failed to stop the recording. Error: {e}");
                self.publish_failure(e);
            }
        }
    }

    fn on_map_gesture(&mut self) {
        let previous = self.view_lock.state();
        self.view_lock.on_gesture();
        self.publish_view_lock_change(previous);
    }

    fn on_center_toggle(&mut self) {
        let previous = self.view_lock.state();
        if previous == ViewLockState::Unlocked && self.last_location.is_none() {
            warn!("No location known yet, can't center the map");
            return;
        }
        if let (ViewLockAction::Recenter, Some(location)) =
            (self.view_lock.toggle(), self.last_location)
        {
            debug!("Requesting recenter before locking the view");
            self.publish(EventKind::RecenterRequestEvent(Arc::new(location)));
        }
        self.publish_view_lock_change(previous);
    }

    fn on_recenter_finished(&mut self) {
        let previous = self.view_lock.state();
        self.view_lock.on_recenter_finished();
        self.publish_view_lock_change(previous);
    }

    fn publish_view_lock_change(&self, previous: ViewLockState) {
        let current = self.view_lock.state();
        if current != previous {
            info!("View lock changed from {:?} to {:?}", previous, current);
            self.publish(EventKind::ViewLockChangedEvent(current));
        }
    }

    fn publish_failure(&self, error: RecorderError) {
        self.publish(EventKind::RecordingFailedEvent(error));
    }

    fn publish(&self, kind: EventKind) {
        let _ = self.ctx.publish_event(kind);
    }
}

#[async_trait]
impl<C: Clock + Send> Module for RunTracker<C> {
    async fn run(&mut self) -> std::result::Result<(), ()> {
        let mut run = true;
        while run {
            tokio::select! {
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => {
                            match event.kind {
                                EventKind::QuitEvent => run = false,
                                EventKind::FixEvent(fix) => self.on_fix(fix),
                                EventKind::FixStreamEndedEvent => {
                                    info!("Location stream ended");
                                }
                                EventKind::StartRecordingEvent => {
                                    debug!("Start Recording Event received in RunTracker module");
                                    self.on_start_recording();
                                }
                                EventKind::StopRecordingEvent => {
                                    debug!("Stop Recording Event received in RunTracker module");
                                    self.on_stop_recording();
                                }
                                EventKind::MapGestureEvent => self.on_map_gesture(),
                                EventKind::CenterToggleEvent => self.on_center_toggle(),
                                EventKind::RecenterFinishedEvent => self.on_recenter_finished(),
                                _ => (),
                            }
                        }
                        Err(e) => {
                            error!("Failed to receive event in module RunTracker. Error:{e}");
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
