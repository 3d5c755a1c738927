//! Wall clock in the hub's configured timezone.
//!
//! Readings are stamped and "today" is computed in the same zone the sunset
//! lookup is asked about, so the light window and the readings agree.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::db::models::truncate_to_seconds;

#[derive(Debug, Clone, Copy)]
pub struct HubClock {
    tz: Tz,
    frozen: Option<DateTime<Utc>>,
}

impl HubClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz, frozen: None }
    }

    /// A clock that always reports `at`, seen from `tz`.
    #[cfg(test)]
    pub(crate) fn frozen_at(tz: Tz, at: DateTime<Utc>) -> Self {
        Self {
            tz,
            frozen: Some(at),
        }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn now(&self) -> DateTime<Tz> {
        self.frozen.unwrap_or_else(Utc::now).with_timezone(&self.tz)
    }

    /// Current time of day, whole seconds.
    pub fn time_of_day(&self) -> NaiveTime {
        truncate_to_seconds(self.now().time())
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn time_and_date_follow_the_configured_zone() {
        // Jamaica is UTC-5 all year.
        let clock = HubClock::frozen_at(chrono_tz::America::Jamaica, utc(2024, 6, 1, 2, 30, 0));
        assert_eq!(clock.time_of_day(), NaiveTime::from_hms_opt(21, 30, 0).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
    }

    #[test]
    fn utc_clock_matches_utc() {
        let clock = HubClock::frozen_at(Tz::UTC, utc(2024, 6, 1, 2, 30, 0));
        assert_eq!(clock.time_of_day(), NaiveTime::from_hms_opt(2, 30, 0).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn time_of_day_drops_sub_seconds() {
        let at = utc(2024, 6, 1, 12, 0, 5) + chrono::TimeDelta::milliseconds(750);
        let clock = HubClock::frozen_at(Tz::UTC, at);
        assert_eq!(clock.time_of_day(), NaiveTime::from_hms_opt(12, 0, 5).unwrap());
    }
}
