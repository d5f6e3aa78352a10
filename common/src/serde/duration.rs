use chrono::Duration;
use serde::{self, Deserialize, Deserializer, Serializer};

/// Formats a duration as `HH:MM:SS.mmm`.
///
/// Hours are not wrapped at 24, a run of 25 hours is written as `25:00:00.000`.
/// Negative durations are rejected.
pub fn duration_to_string<S: Serializer>(duration: &Duration) -> Result<String, S::Error> {
    let total_millis = duration.num_milliseconds();
    if total_millis < 0 {
        return Err(serde::ser::Error::custom("Negative duration can't be serialized"));
    }
    let millis = total_millis % 1000;
    let total_seconds = total_millis / 1000;
    Ok(format!(
        "{:02}:{:02}:{:02}.{:03}",
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60,
        millis
    ))
}

pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let s = duration_to_string::<S>(duration)?;
    serializer.serialize_str(&s)
}

/// Deserialize a time string like "00:31:00.250" into a `chrono::Duration`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).ok_or_else(|| {
        serde::de::Error::custom(format!("Invalid duration '{s}', expected HH:MM:SS.mmm"))
    })
}

fn parse_duration(s: &str) -> Option<Duration> {
    let mut parts = s.splitn(3, ':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let rest = parts.next()?;
    let (seconds, millis) = match rest.split_once('.') {
        Some((seconds, millis)) if millis.len() == 3 => (seconds, millis.parse::<i64>().ok()?),
        Some(_) => return None,
        None => (rest, 0),
    };
    let seconds: i64 = seconds.parse().ok()?;
    if hours < 0 || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) || millis < 0 {
        return None;
    }
    Some(
        Duration::hours(hours)
            + Duration::minutes(minutes)
            + Duration::seconds(seconds)
            + Duration::milliseconds(millis),
    )
}
