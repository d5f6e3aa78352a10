// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use chrono::Utc;
use common::position::{Fix, GeoPoint};
use module_core::{Event, EventKind, Module, ModuleCtx};
use std::{
    io::{Error, ErrorKind},
    sync::Arc,
};
use tracing::{debug, error, info};

/// A location source that replays a fixed list of positions.
///
/// Each position is published as [`EventKind::FixEvent`] stamped with the
/// current time, one per interval. Once the list is exhausted a single
/// [`EventKind::FixStreamEndedEvent`] is published and the source stays
/// silent. The stream can't be restarted.
pub struct ReplayGnssModule {
    ctx: ModuleCtx,
    config: Arc<ReplayGnssModuleConfig>,
}

struct ReplayGnssModuleConfig {
    positions: Vec<GeoPoint>,
    interval: std::time::Duration,
}

impl ReplayGnssModule {
    /// Creates a new replay source.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The context used to publish the fixes.
    /// * `positions` - The positions in the order they are reported.
    /// * `interval` - Time between two fixes, the first fix is sent right away.
    ///
    /// # Returns
    ///
    /// * `Ok(ReplayGnssModule)` - The new created module.
    /// * `Err(io::Error)` - If `positions` is empty or `interval` is zero.
    pub fn new(
        ctx: ModuleCtx,
        positions: &[GeoPoint],
        interval: std::time::Duration,
    ) -> Result<Self, Error> {
        if positions.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidData,
                "positions parameter is empty",
            ));
        }
        if interval.is_zero() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "interval parameter must not be zero",
            ));
        }
        Ok(ReplayGnssModule {
            ctx,
            config: Arc::new(ReplayGnssModuleConfig {
                positions: positions.to_vec(),
                interval,
            }),
        })
    }
}

#[async_trait::async_trait]
impl Module for ReplayGnssModule {
    async fn run(&mut self) -> Result<(), ()> {
        info!(
            "Replaying {} positions every {:?}",
            self.config.positions.len(),
            self.config.interval
        );
        let config = self.config.clone();
        let sender = self.ctx.sender.clone();
        let replay_task_handle = tokio::spawn(async move {
            replay_task(sender, config).await;
        });
        let mut run = true;
        while run {
            tokio::select! {
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => {
                            if let EventKind::QuitEvent = event.kind {
                                replay_task_handle.abort();
                                run = false;
                            }
                        }
                        Err(e) => error!("Failed to receive event in module ReplayGnss. Error: {e}"),
                    }
                }
            }
        }
        Ok(())
    }
}

async fn replay_task(
    sender: tokio::sync::broadcast::Sender<Event>,
    config: Arc<ReplayGnssModuleConfig>,
) {
    let mut timer = tokio::time::interval(config.interval);
    for point in config.positions.iter() {
        timer.tick().await;
        let fix = Arc::new(Fix::new(*point, Utc::now()));
        debug!(
            "Publishing fix lon: {}, lat: {}",
            point.longitude, point.latitude
        );
        let _ = sender.send(Event {
            kind: EventKind::FixEvent(fix),
        });
    }
    info!("Replay finished, no further fixes");
    let _ = sender.send(Event {
        kind: EventKind::FixStreamEndedEvent,
    });
}
