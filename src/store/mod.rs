//! Persistence ports and their adapters.
//!
//! Services are generic over [`SettingsRepository`] / [`SensorRepository`];
//! the running server uses [`Store`], which dispatches to Postgres or to the
//! in-memory adapter depending on configuration.

pub mod memory;
pub mod postgres;

use std::future::Future;

use crate::db::models::{NewSensorReading, SensorReading, Settings, SettingsDraft, SettingsWrite};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Owner of the single settings record.
pub trait SettingsRepository {
    /// Atomically replace the existing record's fields, or insert the first
    /// record if none exists. The record id is kept across updates.
    fn upsert(
        &self,
        draft: SettingsDraft,
    ) -> impl Future<Output = Result<SettingsWrite, StoreError>> + Send;

    fn current(&self) -> impl Future<Output = Result<Option<Settings>, StoreError>> + Send;
}

/// Owner of the append-only sensor log.
pub trait SensorRepository {
    fn append(
        &self,
        reading: NewSensorReading,
    ) -> impl Future<Output = Result<SensorReading, StoreError>> + Send;

    /// Last reading in insertion order.
    fn latest(&self) -> impl Future<Output = Result<Option<SensorReading>, StoreError>> + Send;

    /// The most recent `limit` readings (all when `None`), oldest first.
    fn recent(
        &self,
        limit: Option<u32>,
    ) -> impl Future<Output = Result<Vec<SensorReading>, StoreError>> + Send;
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Store {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl Store {
    pub fn backend(&self) -> &'static str {
        match self {
            Store::Postgres(_) => "postgres",
            Store::Memory(_) => "memory",
        }
    }
}

impl SettingsRepository for Store {
    async fn upsert(&self, draft: SettingsDraft) -> Result<SettingsWrite, StoreError> {
        match self {
            Store::Postgres(s) => s.upsert(draft).await,
            Store::Memory(s) => s.upsert(draft).await,
        }
    }

    async fn current(&self) -> Result<Option<Settings>, StoreError> {
        match self {
            Store::Postgres(s) => s.current().await,
            Store::Memory(s) => s.current().await,
        }
    }
}

impl SensorRepository for Store {
    async fn append(&self, reading: NewSensorReading) -> Result<SensorReading, StoreError> {
        match self {
            Store::Postgres(s) => s.append(reading).await,
            Store::Memory(s) => s.append(reading).await,
        }
    }

    async fn latest(&self) -> Result<Option<SensorReading>, StoreError> {
        match self {
            Store::Postgres(s) => s.latest().await,
            Store::Memory(s) => s.latest().await,
        }
    }

    async fn recent(&self, limit: Option<u32>) -> Result<Vec<SensorReading>, StoreError> {
        match self {
            Store::Postgres(s) => s.recent(limit).await,
            Store::Memory(s) => s.recent(limit).await,
        }
    }
}
