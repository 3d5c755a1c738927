use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{SensorRepository, SettingsRepository, StoreError};
use crate::db::models::{
    NewSensorReading, SensorReading, Settings, SettingsDraft, SettingsWrite, WriteOutcome,
};

/// Process-local store used when no database is configured, and in tests.
///
/// Wrapped in `Arc` so it can be cheaply cloned and shared across handlers.
/// The settings upsert runs entirely under the write lock, so concurrent
/// writers can never both observe "no record" and insert twice.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    settings: Option<Settings>,
    readings: Vec<SensorReading>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsRepository for MemoryStore {
    async fn upsert(&self, draft: SettingsDraft) -> Result<SettingsWrite, StoreError> {
        let mut inner = self.inner.write().await;

        let (id, outcome) = match &inner.settings {
            Some(existing) => (existing.id, WriteOutcome::Updated),
            None => (Uuid::new_v4(), WriteOutcome::Created),
        };

        let settings = Settings {
            id,
            desired_temperature: draft.desired_temperature,
            light_on_time: draft.light_on_time,
            light_off_time: draft.light_off_time,
        };
        inner.settings = Some(settings.clone());

        Ok(SettingsWrite { settings, outcome })
    }

    async fn current(&self) -> Result<Option<Settings>, StoreError> {
        Ok(self.inner.read().await.settings.clone())
    }
}

impl SensorRepository for MemoryStore {
    async fn append(&self, reading: NewSensorReading) -> Result<SensorReading, StoreError> {
        let reading = SensorReading {
            id: Uuid::new_v4(),
            temperature: reading.temperature,
            presence: reading.presence,
            recorded_at: reading.recorded_at,
        };
        self.inner.write().await.readings.push(reading.clone());
        Ok(reading)
    }

    async fn latest(&self) -> Result<Option<SensorReading>, StoreError> {
        Ok(self.inner.read().await.readings.last().cloned())
    }

    async fn recent(&self, limit: Option<u32>) -> Result<Vec<SensorReading>, StoreError> {
        let inner = self.inner.read().await;
        let skip = match limit {
            Some(n) => inner.readings.len().saturating_sub(n as usize),
            None => 0,
        };
        Ok(inner.readings[skip..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn draft(temp: Option<f64>) -> SettingsDraft {
        SettingsDraft {
            desired_temperature: temp,
            light_on_time: hms(18, 0, 0),
            light_off_time: hms(20, 0, 0),
        }
    }

    fn reading(temp: f64, at: NaiveTime) -> NewSensorReading {
        NewSensorReading {
            temperature: Some(temp),
            presence: Some(true),
            recorded_at: at,
        }
    }

    #[tokio::test]
    async fn empty_store_has_nothing() {
        let store = MemoryStore::new();
        assert!(store.current().await.unwrap().is_none());
        assert!(store.latest().await.unwrap().is_none());
        assert!(store.recent(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_upsert_creates_and_second_updates_in_place() {
        let store = MemoryStore::new();

        let created = store.upsert(draft(Some(24.0))).await.unwrap();
        assert_eq!(created.outcome, WriteOutcome::Created);

        let updated = store.upsert(draft(None)).await.unwrap();
        assert_eq!(updated.outcome, WriteOutcome::Updated);
        assert_eq!(updated.settings.id, created.settings.id);
        assert_eq!(updated.settings.desired_temperature, None);

        assert_eq!(store.current().await.unwrap(), Some(updated.settings));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_upserts_leave_one_record() {
        let store = MemoryStore::new();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.upsert(draft(Some(f64::from(i)))).await })
            })
            .collect();

        let mut created = 0;
        let mut ids = Vec::new();
        for handle in handles {
            let write = handle.await.unwrap().unwrap();
            if write.outcome == WriteOutcome::Created {
                created += 1;
            }
            ids.push(write.settings.id);
        }

        assert_eq!(created, 1);
        ids.dedup();
        assert_eq!(ids.len(), 1);
    }

    #[tokio::test]
    async fn latest_is_last_inserted_not_latest_timestamp() {
        let store = MemoryStore::new();
        store.append(reading(20.0, hms(23, 0, 0))).await.unwrap();
        store.append(reading(21.0, hms(1, 0, 0))).await.unwrap();

        let latest = store.latest().await.unwrap().unwrap();
        assert_eq!(latest.temperature, Some(21.0));
    }

    #[tokio::test]
    async fn recent_returns_tail_oldest_first() {
        let store = MemoryStore::new();
        for (i, t) in [20.0, 21.0, 22.0].into_iter().enumerate() {
            store.append(reading(t, hms(12, i as u32, 0))).await.unwrap();
        }

        let temps = |rs: Vec<SensorReading>| rs.into_iter().map(|r| r.temperature).collect::<Vec<_>>();

        assert_eq!(temps(store.recent(Some(2)).await.unwrap()), vec![Some(21.0), Some(22.0)]);
        assert_eq!(store.recent(Some(10)).await.unwrap().len(), 3);
        assert!(store.recent(Some(0)).await.unwrap().is_empty());
        assert_eq!(store.recent(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let store = MemoryStore::new();
        let clone = store.clone();

        store.append(reading(25.0, hms(9, 0, 0))).await.unwrap();

        assert!(clone.latest().await.unwrap().is_some());
    }
}
