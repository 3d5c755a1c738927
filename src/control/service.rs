use tracing::debug;

use super::decision;
use crate::{
    db::models::{SensorReading, Settings},
    error::{HubError, HubResult},
    store::{SensorRepository, SettingsRepository},
};

/// Derives actuator states from the latest reading and the current settings.
///
/// Nothing is cached: every call reads both stores afresh.
pub struct ControlService<S> {
    store: S,
}

impl<S> ControlService<S>
where
    S: SettingsRepository + SensorRepository + Sync,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn inputs(&self) -> HubResult<(SensorReading, Settings)> {
        let reading = self
            .store
            .latest()
            .await?
            .ok_or(HubError::NotReady("no sensor readings recorded yet"))?;
        let settings = self
            .store
            .current()
            .await?
            .ok_or(HubError::NotReady("settings have not been configured"))?;
        Ok((reading, settings))
    }

    pub async fn evaluate_fan(&self) -> HubResult<bool> {
        let (reading, settings) = self.inputs().await?;
        let fan = decision::fan_state(&reading, &settings);
        debug!(
            fan,
            presence = ?reading.presence,
            temperature = ?reading.temperature,
            desired = ?settings.desired_temperature,
            "Evaluated fan"
        );
        Ok(fan)
    }

    pub async fn evaluate_light(&self) -> HubResult<bool> {
        let (reading, settings) = self.inputs().await?;
        let light = decision::light_state(&reading, &settings);
        debug!(
            light,
            presence = ?reading.presence,
            recorded_at = %reading.recorded_at,
            on = %settings.light_on_time,
            off = %settings.light_off_time,
            "Evaluated light"
        );
        Ok(light)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::{
        db::models::{NewSensorReading, SettingsDraft},
        store::MemoryStore,
    };

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    async fn seed_settings(store: &MemoryStore) {
        store
            .upsert(SettingsDraft {
                desired_temperature: Some(24.0),
                light_on_time: hms(18, 0, 0),
                light_off_time: hms(20, 0, 0),
            })
            .await
            .unwrap();
    }

    async fn seed_reading(store: &MemoryStore, temp: f64, presence: bool, at: NaiveTime) {
        store
            .append(NewSensorReading {
                temperature: Some(temp),
                presence: Some(presence),
                recorded_at: at,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_stores_are_not_ready() {
        let store = MemoryStore::new();
        let svc = ControlService::new(store.clone());

        assert!(matches!(svc.evaluate_fan().await, Err(HubError::NotReady(_))));

        seed_reading(&store, 26.0, true, hms(19, 0, 0)).await;
        assert!(matches!(svc.evaluate_light().await, Err(HubError::NotReady(_))));
    }

    #[tokio::test]
    async fn missing_readings_are_not_ready_even_with_settings() {
        let store = MemoryStore::new();
        seed_settings(&store).await;
        let svc = ControlService::new(store);
        assert!(matches!(svc.evaluate_fan().await, Err(HubError::NotReady(_))));
    }

    #[tokio::test]
    async fn uses_the_last_inserted_reading() {
        let store = MemoryStore::new();
        seed_settings(&store).await;
        seed_reading(&store, 30.0, true, hms(19, 0, 0)).await;
        seed_reading(&store, 20.0, true, hms(21, 0, 0)).await;

        let svc = ControlService::new(store.clone());
        assert!(!svc.evaluate_fan().await.unwrap());
        assert!(!svc.evaluate_light().await.unwrap());

        seed_reading(&store, 26.0, true, hms(19, 30, 0)).await;
        assert!(svc.evaluate_fan().await.unwrap());
        assert!(svc.evaluate_light().await.unwrap());
    }
}
