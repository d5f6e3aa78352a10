use crate::serde::duration;
use chrono::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Elapsed {
    #[serde(with = "duration")]
    value: Duration,
}

#[test]
fn serialize_duration_with_milliseconds() {
    let elapsed = Elapsed {
        value: Duration::minutes(31) + Duration::milliseconds(250),
    };
    let json = serde_json::to_string(&elapsed).unwrap();
    assert_eq!(json, r#"{"value":"00:31:00.250"}"#);
}

#[test]
fn serialize_duration_longer_than_a_day() {
    let elapsed = Elapsed {
        value: Duration::hours(25) + Duration::seconds(3),
    };
    let json = serde_json::to_string(&elapsed).unwrap();
    assert_eq!(json, r#"{"value":"25:00:03.000"}"#);
}

#[test]
fn serialize_negative_duration_fails() {
    let elapsed = Elapsed {
        value: Duration::seconds(-1),
    };
    assert!(serde_json::to_string(&elapsed).is_err());
}

#[test]
fn deserialize_duration_with_and_without_milliseconds() {
    let elapsed: Elapsed = serde_json::from_str(r#"{"value":"01:02:03.004"}"#).unwrap();
    assert_eq!(
        elapsed.value,
        Duration::hours(1) + Duration::minutes(2) + Duration::seconds(3) + Duration::milliseconds(4)
    );
    let elapsed: Elapsed = serde_json::from_str(r#"{"value":"00:00:10"}"#).unwrap();
    assert_eq!(elapsed.value, Duration::seconds(10));
}

#[test]
fn deserialize_malformed_duration_fails() {
    for raw in ["", "10", "00:61:00.000", "00:00:10.5", "aa:00:00.000"] {
        let json = format!(r#"{{"value":"{raw}"}}"#);
        assert!(
            serde_json::from_str::<Elapsed>(&json).is_err(),
            "'{raw}' should be rejected"
        );
    }
}
