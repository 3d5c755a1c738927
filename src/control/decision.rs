//! Pure fan/light rules over the latest reading and the current settings.

use chrono::NaiveTime;

use crate::db::models::{SensorReading, Settings};

/// The fan runs when someone is present and the room is at or above the
/// desired temperature. A missing temperature on either side keeps it off.
pub fn fan_state(reading: &SensorReading, settings: &Settings) -> bool {
    if reading.presence != Some(true) {
        return false;
    }
    match (reading.temperature, settings.desired_temperature) {
        (Some(temp), Some(desired)) => temp >= desired,
        _ => false,
    }
}

/// The light is on when someone is present and the reading was taken
/// strictly inside the settings' on/off window.
pub fn light_state(reading: &SensorReading, settings: &Settings) -> bool {
    reading.presence == Some(true)
        && in_window(settings.light_on_time, settings.light_off_time, reading.recorded_at)
}

/// Whether `at` lies strictly between `on` and `off` on the 24-hour clock.
///
/// When `off` is earlier than `on` the window crosses midnight. Equal
/// endpoints describe an empty window.
pub fn in_window(on: NaiveTime, off: NaiveTime, at: NaiveTime) -> bool {
    if on <= off {
        on < at && at < off
    } else {
        at > on || at < off
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn reading(temperature: Option<f64>, presence: Option<bool>, at: NaiveTime) -> SensorReading {
        SensorReading {
            id: Uuid::new_v4(),
            temperature,
            presence,
            recorded_at: at,
        }
    }

    fn settings(desired: Option<f64>, on: NaiveTime, off: NaiveTime) -> Settings {
        Settings {
            id: Uuid::new_v4(),
            desired_temperature: desired,
            light_on_time: on,
            light_off_time: off,
        }
    }

    fn evening() -> Settings {
        settings(Some(24.0), hms(18, 0, 0), hms(20, 0, 0))
    }

    // -----------------------------------------------------------------------
    // fan
    // -----------------------------------------------------------------------

    #[test]
    fn fan_on_when_present_and_warm() {
        let r = reading(Some(25.0), Some(true), hms(12, 0, 0));
        assert!(fan_state(&r, &evening()));
    }

    #[test]
    fn fan_on_at_exact_threshold() {
        let r = reading(Some(24.0), Some(true), hms(12, 0, 0));
        assert!(fan_state(&r, &evening()));
    }

    #[test]
    fn fan_off_when_nobody_present() {
        let r = reading(Some(30.0), Some(false), hms(12, 0, 0));
        assert!(!fan_state(&r, &evening()));

        let unknown = reading(Some(30.0), None, hms(12, 0, 0));
        assert!(!fan_state(&unknown, &evening()));
    }

    #[test]
    fn fan_off_when_cooler_than_desired() {
        let r = reading(Some(23.9), Some(true), hms(12, 0, 0));
        assert!(!fan_state(&r, &evening()));
    }

    #[test]
    fn fan_off_without_temperatures() {
        let no_reading_temp = reading(None, Some(true), hms(12, 0, 0));
        assert!(!fan_state(&no_reading_temp, &evening()));

        let r = reading(Some(40.0), Some(true), hms(12, 0, 0));
        let no_threshold = settings(None, hms(18, 0, 0), hms(20, 0, 0));
        assert!(!fan_state(&r, &no_threshold));
    }

    // -----------------------------------------------------------------------
    // light
    // -----------------------------------------------------------------------

    #[test]
    fn light_on_inside_window() {
        let r = reading(None, Some(true), hms(19, 0, 0));
        assert!(light_state(&r, &evening()));
    }

    #[test]
    fn light_off_on_window_boundaries() {
        assert!(!light_state(&reading(None, Some(true), hms(18, 0, 0)), &evening()));
        assert!(!light_state(&reading(None, Some(true), hms(20, 0, 0)), &evening()));
    }

    #[test]
    fn light_off_outside_window() {
        assert!(!light_state(&reading(None, Some(true), hms(17, 59, 59)), &evening()));
        assert!(!light_state(&reading(None, Some(true), hms(20, 0, 1)), &evening()));
    }

    #[test]
    fn light_off_when_nobody_present() {
        assert!(!light_state(&reading(None, Some(false), hms(19, 0, 0)), &evening()));
        assert!(!light_state(&reading(None, None, hms(19, 0, 0)), &evening()));
    }

    #[test]
    fn window_across_midnight() {
        let on = hms(23, 0, 0);
        let off = hms(1, 30, 0);
        assert!(in_window(on, off, hms(23, 30, 0)));
        assert!(in_window(on, off, hms(0, 30, 0)));
        assert!(!in_window(on, off, hms(23, 0, 0)));
        assert!(!in_window(on, off, hms(1, 30, 0)));
        assert!(!in_window(on, off, hms(12, 0, 0)));
    }

    #[test]
    fn empty_window_never_lights() {
        let t = hms(18, 0, 0);
        assert!(!in_window(t, t, t));
        assert!(!in_window(t, t, hms(6, 0, 0)));
        assert!(!in_window(t, t, hms(19, 0, 0)));
    }
}
