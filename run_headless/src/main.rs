// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use clap::Parser;
use common::{
    geojson::{Feature, FeatureCollection},
    position::GeoPoint,
    recording::RecordingSummary,
};
use gnss::replay_source::ReplayGnssModule;
use module_core::{Event, EventBus, EventKind, Module, ModuleCtx};
use run_tracker::RunTracker;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Records a run over positions replayed from a CSV file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file with a `longitude,latitude` header and one position per row.
    #[arg(short = 'f', long)]
    fix_file: PathBuf,
    /// Time between two replayed fixes in milliseconds.
    #[arg(short, long, default_value_t = 1000)]
    interval_ms: u64,
    /// Write the recorded path and last location as GeoJSON to this file.
    #[arg(short, long)]
    geojson_out: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct PositionRecord {
    longitude: f64,
    latitude: f64,
}

fn read_positions_from_file(file_path: &Path) -> Result<Vec<GeoPoint>, csv::Error> {
    let mut rdr = csv::Reader::from_path(file_path)?;
    let mut positions = Vec::new();
    for result in rdr.deserialize() {
        let record: PositionRecord = result?;
        positions.push(GeoPoint::new(record.longitude, record.latitude));
    }
    debug!("length of positions: {}", positions.len());
    Ok(positions)
}

fn write_geojson(file_path: &Path, path: &[GeoPoint], summary: &RecordingSummary) -> Result<(), ()> {
    let mut features = vec![Feature::line_string(path).with_properties(
        serde_json::to_value(summary).map_err(|e| error!("Failed to serialize summary. Error: {e}"))?,
    )];
    if let Some(last) = path.last() {
        features.push(Feature::point(last));
    }
    let json = FeatureCollection::to_json(&FeatureCollection::new(features))
        .map_err(|e| error!("Failed to serialize the path. Error: {e}"))?;
    std::fs::write(file_path, json)
        .map_err(|e| error!("Failed to write {}. Error: {e}", file_path.display()))?;
    info!("Path written to {}", file_path.display());
    Ok(())
}

/// Drives a single recording: requests it before the first fix and stops it
/// once the location stream ended or the user pressed Ctrl-C.
///
/// The start request is published before the returned future is polled, so
/// the run tracker sees it ahead of any fix and records from the first one.
/// The future resolves to the summary and the recorded path. It publishes a
/// quit event for all modules before resolving.
fn record_run(
    ctx: ModuleCtx,
) -> impl Future<Output = Result<(RecordingSummary, Vec<GeoPoint>), ()>> {
    let _ = ctx.publish_event(EventKind::StartRecordingEvent);
    follow_recording(ctx)
}

async fn follow_recording(mut ctx: ModuleCtx) -> Result<(RecordingSummary, Vec<GeoPoint>), ()> {
    let mut started = false;
    let mut stop_requested = false;
    let mut path = Vec::new();
    let result = loop {
        let event = match ctx.receiver.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                warn!("Controller lagged behind, {skipped} events skipped");
                continue;
            }
            Err(RecvError::Closed) => {
                error!("Event bus closed while recording");
                break Err(());
            }
        };
        match event.kind {
            EventKind::RecordingStartedEvent(_) => started = true,
            EventKind::PathUpdatedEvent(updated) => path = (*updated).clone(),
            EventKind::FixStreamEndedEvent if !stop_requested => {
                stop_requested = true;
                if !started {
                    error!("Location stream ended before a recording could start");
                    break Err(());
                }
                let _ = ctx.publish_event(EventKind::StopRecordingEvent);
            }
            EventKind::StopRecordingEvent if !stop_requested => {
                stop_requested = true;
                if !started {
                    error!("Stopped before a recording could start");
                    break Err(());
                }
            }
            EventKind::RecordingFinishedEvent(summary) => {
                break Ok((*summary, std::mem::take(&mut path)));
            }
            EventKind::RecordingFailedEvent(e) if stop_requested => {
                error!("Failed to finish the run. Error: {e}");
                break Err(());
            }
            EventKind::RecordingFailedEvent(e) => warn!("Recorder rejected an operation: {e}"),
            _ => (),
        }
    };
    let _ = ctx.publish_event(EventKind::QuitEvent);
    result
}

#[tokio::main]
async fn main() -> Result<(), ()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let positions = read_positions_from_file(&cli.fix_file).map_err(|e| {
        error!(
            "Failed to read positions from {}. Error: {e}",
            cli.fix_file.display()
        )
    })?;

    let eb = EventBus::default();
    let mut replay = ReplayGnssModule::new(
        eb.context(),
        &positions,
        Duration::from_millis(cli.interval_ms),
    )
    .map_err(|e| error!("Failed to create ReplayGnssModule. Error: {e}"))?;
    let mut tracker = RunTracker::new(eb.context());
    // the tracker has to be subscribed before the start request goes out
    let controller = record_run(eb.context());

    let stop_sender = eb.sender();
    ctrlc::set_handler(move || {
        let _ = stop_sender.send(Event {
            kind: EventKind::StopRecordingEvent,
        });
    })
    .map_err(|e| error!("Failed to install the Ctrl-C handler. Error: {e}"))?;

    info!("Starting modules...");
    let (replay_result, tracker_result, run) =
        tokio::join!(replay.run(), tracker.run(), controller);
    replay_result?;
    tracker_result?;
    let (summary, path) = run?;

    println!("{summary}");
    if let Some(geojson_out) = &cli.geojson_out {
        write_geojson(geojson_out, &path, &summary)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
