use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{SensorRepository, SettingsRepository, StoreError};
use crate::db::models::{
    NewSensorReading, SensorReading, Settings, SettingsDraft, SettingsWrite, WriteOutcome,
};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UpsertRow {
    #[sqlx(flatten)]
    settings: Settings,
    created: bool,
}

impl SettingsRepository for PgStore {
    async fn upsert(&self, draft: SettingsDraft) -> Result<SettingsWrite, StoreError> {
        // `xmax = 0` only holds for a freshly inserted tuple.
        let row = sqlx::query_as::<_, UpsertRow>(
            r#"
            INSERT INTO settings
                (singleton, id, desired_temperature, light_on_time, light_off_time)
            VALUES (TRUE, $1, $2, $3, $4)
            ON CONFLICT (singleton) DO UPDATE
            SET desired_temperature = EXCLUDED.desired_temperature,
                light_on_time       = EXCLUDED.light_on_time,
                light_off_time      = EXCLUDED.light_off_time,
                updated_at          = now()
            RETURNING id, desired_temperature, light_on_time, light_off_time,
                      (xmax = 0) AS created
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(draft.desired_temperature)
        .bind(draft.light_on_time)
        .bind(draft.light_off_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(SettingsWrite {
            settings: row.settings,
            outcome: if row.created {
                WriteOutcome::Created
            } else {
                WriteOutcome::Updated
            },
        })
    }

    async fn current(&self) -> Result<Option<Settings>, StoreError> {
        let row = sqlx::query_as::<_, Settings>(
            r#"
            SELECT id, desired_temperature, light_on_time, light_off_time
            FROM settings
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

impl SensorRepository for PgStore {
    async fn append(&self, reading: NewSensorReading) -> Result<SensorReading, StoreError> {
        let row = sqlx::query_as::<_, SensorReading>(
            r#"
            INSERT INTO sensor_readings (id, temperature, presence, recorded_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, temperature, presence, recorded_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reading.temperature)
        .bind(reading.presence)
        .bind(reading.recorded_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn latest(&self) -> Result<Option<SensorReading>, StoreError> {
        let row = sqlx::query_as::<_, SensorReading>(
            r#"
            SELECT id, temperature, presence, recorded_at
            FROM sensor_readings
            ORDER BY seq DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn recent(&self, limit: Option<u32>) -> Result<Vec<SensorReading>, StoreError> {
        // LIMIT NULL means no limit.
        let rows = sqlx::query_as::<_, SensorReading>(
            r#"
            SELECT id, temperature, presence, recorded_at
            FROM (
                SELECT seq, id, temperature, presence, recorded_at
                FROM sensor_readings
                ORDER BY seq DESC
                LIMIT $1
            ) latest
            ORDER BY seq ASC
            "#,
        )
        .bind(limit.map(i64::from))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// ---------------------------------------------------------------------------
// Tests (need a Postgres DATABASE_URL; run with `--ignored`)
// ---------------------------------------------------------------------------
