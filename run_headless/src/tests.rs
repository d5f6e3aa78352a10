use crate::{read_positions_from_file, record_run, write_geojson};
use common::{
    geojson::{FeatureCollection, Geometry},
    position::GeoPoint,
    recording::RecordingSummary,
    test_helper::route::{get_route, get_route_as_csv},
};
use gnss::replay_source::ReplayGnssModule;
use module_core::{EventBus, Module};
use run_tracker::RunTracker;
use std::path::PathBuf;
use std::time::Duration;

fn setup_test_folder(name: &str) -> PathBuf {
    let folder = std::env::temp_dir().join("run_headless_tests").join(name);
    let _ = std::fs::remove_dir_all(&folder);
    std::fs::create_dir_all(&folder)
        .unwrap_or_else(|err| panic!("Failed to create {}. Reason: {err}", folder.display()));
    folder
}

#[test]
fn read_positions_from_csv() {
    let file = setup_test_folder("read_positions").join("positions.csv");
    std::fs::write(&file, get_route_as_csv()).unwrap();
    let positions = read_positions_from_file(&file)
        .unwrap_or_else(|e| panic!("Failed to read positions. Reason: {e}"));
    assert_eq!(positions, get_route());
}

#[test]
fn read_positions_with_malformed_row_fails() {
    let file = setup_test_folder("read_malformed").join("positions.csv");
    std::fs::write(&file, "longitude,latitude\n80.2093,north\n").unwrap();
    assert!(read_positions_from_file(&file).is_err());
}

#[test]
fn read_positions_from_missing_file_fails() {
    let file = setup_test_folder("read_missing").join("does_not_exist.csv");
    assert!(read_positions_from_file(&file).is_err());
}

#[test]
fn write_path_as_feature_collection() {
    let file = setup_test_folder("write_geojson").join("run.geojson");
    let summary = RecordingSummary {
        distance: 0.19,
        elapsed: chrono::Duration::seconds(30),
        pace: 2.6,
    };
    write_geojson(&file, &get_route(), &summary).unwrap();

    let raw = std::fs::read_to_string(&file).unwrap();
    let collection = FeatureCollection::from_json(&raw)
        .unwrap_or_else(|e| panic!("Failed to deserialize the written file. Reason: {e}"));
    assert_eq!(collection.features.len(), 2);
    assert_eq!(
        collection.features[0].geometry,
        Geometry::LineString {
            coordinates: get_route().iter().map(|p| p.coordinates()).collect()
        }
    );
    let properties = collection.features[0].properties.clone().unwrap();
    assert_eq!(properties["elapsed"], "00:00:30.000");
    assert_eq!(
        collection.features[1].geometry,
        Geometry::Point {
            coordinates: get_route()[2].coordinates()
        }
    );
}

async fn replay_and_record(
    interval: Duration,
) -> (Result<(), ()>, Result<(), ()>, Result<(RecordingSummary, Vec<GeoPoint>), ()>) {
    let eb = EventBus::default();
    let mut tracker = RunTracker::new(eb.context());
    let mut replay = ReplayGnssModule::new(eb.context(), &get_route(), interval).unwrap();
    let controller = record_run(eb.context());

    tokio::time::timeout(Duration::from_secs(2), async {
        tokio::join!(replay.run(), tracker.run(), controller)
    })
    .await
    .expect("Recording didn't finish in time")
}

#[tokio::test]
#[test_log::test]
async fn record_whole_replay() {
    let (replay_result, tracker_result, run) = replay_and_record(Duration::from_millis(20)).await;

    assert!(replay_result.is_ok());
    assert!(tracker_result.is_ok());
    let (summary, path) = run.expect("Recording failed");
    assert_eq!(path, get_route());
    assert!(summary.distance > 0.0);
    assert!(summary.pace.is_finite() && summary.pace >= 0.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[test_log::test]
async fn fast_replay_records_from_first_fix() {
    for attempt in 0..30 {
        let (_, _, run) = replay_and_record(Duration::from_millis(1)).await;
        let (_, path) = run.unwrap_or_else(|_| panic!("Recording {attempt} failed"));
        assert_eq!(path, get_route(), "Recording {attempt} lost fixes");
    }
}
