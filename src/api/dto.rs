use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    db::models::{SensorReading, Settings},
    sensors::SensorInput,
    settings::SettingsInput,
};

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Request body for `PUT /settings`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SettingsRequest {
    /// Degrees Celsius. The fan never runs while this is unset.
    #[serde(default, alias = "user_temp")]
    pub desired_temperature: Option<f64>,
    /// `"sunset"` or a time of day as `HH:MM:SS`.
    #[schema(example = "sunset")]
    pub user_light: Option<String>,
    /// How long the light stays on, e.g. `"2h"` or `"1h30m"`.
    #[schema(example = "1h30m")]
    pub light_duration: Option<String>,
}

impl From<SettingsRequest> for SettingsInput {
    fn from(r: SettingsRequest) -> Self {
        Self {
            desired_temperature: r.desired_temperature,
            user_light: r.user_light,
            light_duration: r.light_duration,
        }
    }
}

/// The persisted settings record. The light duration is not stored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SettingsDto {
    pub id: Uuid,
    pub desired_temperature: Option<f64>,
    /// Resolved light-on time.
    #[schema(value_type = String, example = "17:00:00")]
    pub user_light: NaiveTime,
    #[schema(value_type = String, example = "19:00:00")]
    pub light_off_time: NaiveTime,
}

impl From<Settings> for SettingsDto {
    fn from(s: Settings) -> Self {
        Self {
            id: s.id,
            desired_temperature: s.desired_temperature,
            user_light: s.light_on_time,
            light_off_time: s.light_off_time,
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor data
// ---------------------------------------------------------------------------

/// Request body for `POST /sensorData`. Client timestamps are ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SensorDataRequest {
    /// Degrees Celsius
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub presence: Option<bool>,
}

impl From<SensorDataRequest> for SensorInput {
    fn from(r: SensorDataRequest) -> Self {
        Self {
            temperature: r.temperature,
            presence: r.presence,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SensorReadingDto {
    pub id: Uuid,
    /// Degrees Celsius
    pub temperature: Option<f64>,
    pub presence: Option<bool>,
    /// Server time of day when the reading was recorded.
    #[schema(value_type = String, example = "19:00:00")]
    pub recorded_at: NaiveTime,
}

impl From<SensorReading> for SensorReadingDto {
    fn from(r: SensorReading) -> Self {
        Self {
            id: r.id,
            temperature: r.temperature,
            presence: r.presence,
            recorded_at: r.recorded_at,
        }
    }
}

/// Query parameters for `GET /graph`.
#[derive(Debug, Deserialize)]
pub struct GraphParams {
    /// Maximum number of (most recent) readings to return.
    pub size: Option<u32>,
}

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FanState {
    pub fan: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LightState {
    pub light: bool,
}
