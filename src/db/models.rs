use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// The singleton settings record as persisted.
///
/// `light_off_time` is always `light_on_time + duration` as of the last
/// write; the duration itself is never stored.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Settings {
    pub id: Uuid,
    /// Degrees Celsius. `None` means the fan never switches on.
    pub desired_temperature: Option<f64>,
    pub light_on_time: NaiveTime,
    pub light_off_time: NaiveTime,
}

/// Resolved field values for a settings write. The store decides whether
/// they replace the existing record or become the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsDraft {
    pub desired_temperature: Option<f64>,
    pub light_on_time: NaiveTime,
    pub light_off_time: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsWrite {
    pub settings: Settings,
    pub outcome: WriteOutcome,
}

// ---------------------------------------------------------------------------
// Sensor readings
// ---------------------------------------------------------------------------

/// One immutable entry of the append-only sensor log.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: Uuid,
    /// Degrees Celsius
    pub temperature: Option<f64>,
    /// Whether anyone is detected in range.
    pub presence: Option<bool>,
    /// Server wall-clock time of day at insert, whole seconds.
    pub recorded_at: NaiveTime,
}

/// A reading stamped by the server, not yet assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSensorReading {
    pub temperature: Option<f64>,
    pub presence: Option<bool>,
    pub recorded_at: NaiveTime,
}

/// Drop sub-second precision so stored times render as `HH:MM:SS`.
pub fn truncate_to_seconds(t: NaiveTime) -> NaiveTime {
    t.with_nanosecond(0).unwrap_or(t)
}

/// chrono encodes a leap second (`:60`) as a nanosecond count past one
/// second. Such times are not valid `HH:MM:SS` values for the hub.
pub fn is_leap_second(t: NaiveTime) -> bool {
    t.nanosecond() >= 1_000_000_000
}
