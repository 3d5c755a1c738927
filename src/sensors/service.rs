use tracing::info;

use crate::{
    clock::HubClock,
    db::models::{NewSensorReading, SensorReading},
    error::{HubError, HubResult},
    store::SensorRepository,
};

/// A reading as submitted by a sensor node. The server stamps the time.
#[derive(Debug, Clone, Default)]
pub struct SensorInput {
    pub temperature: Option<f64>,
    pub presence: Option<bool>,
}

pub struct SensorService<S> {
    store: S,
    clock: HubClock,
}

impl<S> SensorService<S>
where
    S: SensorRepository + Sync,
{
    /// Readings are stamped with `clock`'s time of day.
    pub fn new(store: S, clock: HubClock) -> Self {
        Self { store, clock }
    }

    /// Stamp `input` with the hub's time of day and append it to the log.
    pub async fn record_sensor(&self, input: SensorInput) -> HubResult<SensorReading> {
        if let Some(t) = input.temperature {
            if !t.is_finite() {
                return Err(HubError::Validation("temperature must be a finite number".into()));
            }
        }

        let reading = self
            .store
            .append(NewSensorReading {
                temperature: input.temperature,
                presence: input.presence,
                recorded_at: self.clock.time_of_day(),
            })
            .await?;

        info!(
            id = %reading.id,
            temperature = ?reading.temperature,
            presence = ?reading.presence,
            recorded_at = %reading.recorded_at,
            "Sensor reading recorded"
        );
        Ok(reading)
    }

    /// The most recent `size` readings (all when `None`), oldest first.
    pub async fn history(&self, size: Option<u32>) -> HubResult<Vec<SensorReading>> {
        Ok(self.store.recent(size).await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveTime, TimeDelta, TimeZone, Utc};
    use chrono_tz::Tz;

    use super::*;
    use crate::store::MemoryStore;

    fn service() -> SensorService<MemoryStore> {
        let noon = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap() + TimeDelta::milliseconds(999);
        SensorService::new(MemoryStore::new(), HubClock::frozen_at(Tz::UTC, noon))
    }

    #[tokio::test]
    async fn record_stamps_server_time_to_the_second() {
        let svc = service();
        let reading = svc
            .record_sensor(SensorInput {
                temperature: Some(26.0),
                presence: Some(true),
            })
            .await
            .unwrap();

        assert_eq!(reading.recorded_at, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(reading.temperature, Some(26.0));
        assert_eq!(reading.presence, Some(true));
    }

    #[tokio::test]
    async fn readings_are_stamped_in_the_hub_timezone() {
        // 02:30 UTC is 21:30 the previous evening in Jamaica (UTC-5).
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 2, 30, 0).unwrap();
        let svc = SensorService::new(
            MemoryStore::new(),
            HubClock::frozen_at(chrono_tz::America::Jamaica, at),
        );
        let reading = svc.record_sensor(SensorInput::default()).await.unwrap();
        assert_eq!(reading.recorded_at, NaiveTime::from_hms_opt(21, 30, 0).unwrap());
    }

    #[tokio::test]
    async fn missing_fields_are_carried_as_absent() {
        let svc = service();
        let reading = svc.record_sensor(SensorInput::default()).await.unwrap();
        assert_eq!(reading.temperature, None);
        assert_eq!(reading.presence, None);
    }

    #[tokio::test]
    async fn non_finite_temperature_is_rejected() {
        let svc = service();
        let err = svc
            .record_sensor(SensorInput {
                temperature: Some(f64::NAN),
                presence: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::Validation(_)));
        assert!(svc.history(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn history_is_limited_to_most_recent() {
        let svc = service();
        for t in [20.0, 21.0, 22.0] {
            svc.record_sensor(SensorInput {
                temperature: Some(t),
                presence: Some(false),
            })
            .await
            .unwrap();
        }

        let last_two = svc.history(Some(2)).await.unwrap();
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[1].temperature, Some(22.0));
        assert_eq!(svc.history(None).await.unwrap().len(), 3);
    }
}
