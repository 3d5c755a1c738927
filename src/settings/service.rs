use chrono::{NaiveTime, TimeDelta};
use tracing::info;

use crate::{
    db::models::{is_leap_second, truncate_to_seconds, SettingsDraft, SettingsWrite},
    error::{HubError, HubResult},
    store::SettingsRepository,
    sunset::SunsetResolver,
    timespec,
};

/// Token in `user_light` that asks for today's sunset instead of a clock time.
/// Matched exactly: no surrounding whitespace, lower case only.
pub const SUNSET_TOKEN: &str = "sunset";

/// Raw user input for a settings write, before any resolution.
#[derive(Debug, Clone, Default)]
pub struct SettingsInput {
    pub desired_temperature: Option<f64>,
    /// `"sunset"` or `HH:MM:SS`.
    pub user_light: Option<String>,
    /// e.g. `"2h"` or `"1h30m"`. Consumed, never stored.
    pub light_duration: Option<String>,
}

pub struct SettingsService<S, R> {
    store: S,
    sunset: R,
}

impl<S, R> SettingsService<S, R>
where
    S: SettingsRepository + Sync,
    R: SunsetResolver + Sync,
{
    pub fn new(store: S, sunset: R) -> Self {
        Self { store, sunset }
    }

    /// Resolve the light window from `input` and create or replace the
    /// singleton settings record.
    ///
    /// Input is fully validated before the sunset lookup, and the lookup
    /// happens before anything is written.
    pub async fn write_settings(&self, input: SettingsInput) -> HubResult<SettingsWrite> {
        let user_light = input
            .user_light
            .as_deref()
            .ok_or_else(|| HubError::Validation("user_light is required".into()))?;
        let duration = parse_light_duration(input.light_duration.as_deref())?;

        if let Some(t) = input.desired_temperature {
            if !t.is_finite() {
                return Err(HubError::Validation(
                    "desired_temperature must be a finite number".into(),
                ));
            }
        }

        let light_on_time = if user_light == SUNSET_TOKEN {
            truncate_to_seconds(self.sunset.sunset().await?)
        } else {
            parse_clock_time(user_light)?
        };
        let light_off_time = light_off_time(light_on_time, duration);

        let write = self
            .store
            .upsert(SettingsDraft {
                desired_temperature: input.desired_temperature,
                light_on_time,
                light_off_time,
            })
            .await?;

        info!(
            id = %write.settings.id,
            outcome = ?write.outcome,
            light_on = %light_on_time,
            light_off = %light_off_time,
            "Settings written"
        );
        Ok(write)
    }
}

/// Parse a strict `HH:MM:SS` time of day. Second 60 is not accepted.
pub fn parse_clock_time(raw: &str) -> HubResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .ok()
        .filter(|t| !is_leap_second(*t))
        .ok_or_else(|| {
            HubError::Validation(format!(
                "invalid user_light {raw:?}: expected \"{SUNSET_TOKEN}\" or HH:MM:SS"
            ))
        })
}

/// Parse the light duration, which must be present and shorter than a day.
fn parse_light_duration(raw: Option<&str>) -> HubResult<TimeDelta> {
    let raw = raw.ok_or_else(|| HubError::Validation("light_duration is required".into()))?;
    let duration = timespec::parse(raw)?;
    if duration >= TimeDelta::days(1) {
        return Err(HubError::Validation(format!(
            "light_duration {raw:?} must be shorter than 24h"
        )));
    }
    Ok(duration)
}

/// `on + duration` on the 24-hour clock. A window that crosses midnight
/// wraps, e.g. `23:00:00 + 2h30m = 01:30:00`.
pub fn light_off_time(on: NaiveTime, duration: TimeDelta) -> NaiveTime {
    on.overflowing_add_signed(duration).0
}
