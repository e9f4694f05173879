// ABOUTME: SQLite implementation of the HealthStore trait using sqlx
// ABOUTME: Creates its schema on startup and stores samples as tagged JSON payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use boris_core::errors::{AppError, AppResult};
use boris_core::models::{EngagementState, SampleKind, SamplePayload, SampleRecord};

use super::HealthStore;

/// Date format of `last_log_date`
const DATE_FORMAT: &str = "%Y-%m-%d";

/// `SQLite` backed store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `database_url` and run migrations
    ///
    /// In-memory databases use a single pooled connection that is never
    /// recycled, so every caller sees the same data.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a malformed URL, a storage error if
    /// the database cannot be opened, or a database error if migration fails.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        if !database_url.starts_with("sqlite:") {
            return Err(AppError::config(format!(
                "DATABASE_URL must be a sqlite: URL, got '{database_url}'"
            )));
        }

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid DATABASE_URL '{database_url}': {e}")))?
            .create_if_missing(true);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::storage_unavailable(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            AppError::storage_unavailable(format!("Failed to open database: {e}")).with_source(e)
        })?;

        let store = Self { pool };
        store.migrate().await?;
        info!(in_memory, "SQLite store ready");
        Ok(store)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns a database error if a statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS engagement_states (
                user_id TEXT PRIMARY KEY,
                current_streak_days INTEGER NOT NULL DEFAULT 0,
                longest_streak_days INTEGER NOT NULL DEFAULT 0,
                total_logged_days INTEGER NOT NULL DEFAULT 0,
                last_log_date TEXT,
                xp_total INTEGER NOT NULL DEFAULT 0,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS health_samples (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('weight', 'activity', 'meal')),
                payload TEXT NOT NULL,
                recorded_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_health_samples_user_kind ON health_samples(user_id, kind, recorded_at)",
        )
        .execute(&self.pool)
        .await?;

        debug!("SQLite migrations applied");
        Ok(())
    }

    /// Convert a database row to an engagement state
    fn row_to_engagement(row: &SqliteRow) -> AppResult<EngagementState> {
        let last_log_date = row
            .try_get::<Option<String>, _>("last_log_date")?
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| {
                    AppError::database(format!("Corrupt last_log_date '{raw}': {e}"))
                })
            })
            .transpose()?;

        Ok(EngagementState::from_stored(
            to_u32(row.try_get("current_streak_days")?, "current_streak_days")?,
            to_u32(row.try_get("longest_streak_days")?, "longest_streak_days")?,
            to_u32(row.try_get("total_logged_days")?, "total_logged_days")?,
            last_log_date,
            u64::try_from(row.try_get::<i64, _>("xp_total")?)
                .map_err(|_| AppError::database("Corrupt xp_total: negative value"))?,
        ))
    }

    /// Convert a database row to a sample record
    fn row_to_sample(row: &SqliteRow) -> AppResult<SampleRecord> {
        let id: String = row.try_get("id")?;
        let payload: String = row.try_get("payload")?;
        let recorded_at: String = row.try_get("recorded_at")?;

        Ok(SampleRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| AppError::database(format!("Corrupt sample id '{id}': {e}")))?,
            user_id: row.try_get("user_id")?,
            recorded_at: DateTime::parse_from_rfc3339(&recorded_at)
                .map_err(|e| AppError::database(format!("Corrupt recorded_at: {e}")))?
                .with_timezone(&Utc),
            payload: serde_json::from_str(&payload)?,
        })
    }
}

fn to_u32(value: i64, column: &str) -> AppResult<u32> {
    u32::try_from(value).map_err(|_| AppError::database(format!("Corrupt {column}: {value}")))
}

/// Fixed-width timestamp so text ordering matches time ordering
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[async_trait]
impl HealthStore for SqliteStore {
    async fn get_engagement(&self, user_id: &str) -> AppResult<Option<EngagementState>> {
        let row = sqlx::query(
            r"
            SELECT current_streak_days, longest_streak_days, total_logged_days,
                   last_log_date, xp_total
            FROM engagement_states
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_engagement).transpose()
    }

    async fn put_engagement(&self, user_id: &str, state: &EngagementState) -> AppResult<()> {
        let xp_total = i64::try_from(state.xp_total)
            .map_err(|_| AppError::database("xp_total exceeds storable range"))?;

        sqlx::query(
            r"
            INSERT INTO engagement_states (
                user_id, current_streak_days, longest_streak_days, total_logged_days,
                last_log_date, xp_total, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT(user_id) DO UPDATE SET
                current_streak_days = excluded.current_streak_days,
                longest_streak_days = excluded.longest_streak_days,
                total_logged_days = excluded.total_logged_days,
                last_log_date = excluded.last_log_date,
                xp_total = excluded.xp_total,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id)
        .bind(i64::from(state.current_streak_days))
        .bind(i64::from(state.longest_streak_days))
        .bind(i64::from(state.total_logged_days))
        .bind(state.last_log_date.map(|d| d.format(DATE_FORMAT).to_string()))
        .bind(xp_total)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn append_sample(
        &self,
        user_id: &str,
        payload: &SamplePayload,
    ) -> AppResult<SampleRecord> {
        let record = SampleRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_owned(),
            recorded_at: Utc::now(),
            payload: payload.clone(),
        };

        sqlx::query(
            r"
            INSERT INTO health_samples (id, user_id, kind, payload, recorded_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(record.id.to_string())
        .bind(user_id)
        .bind(payload.kind().as_str())
        .bind(serde_json::to_string(payload)?)
        .bind(format_timestamp(record.recorded_at))
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_samples(
        &self,
        user_id: &str,
        kind: SampleKind,
        limit: u32,
    ) -> AppResult<Vec<SampleRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, payload, recorded_at
            FROM health_samples
            WHERE user_id = $1 AND kind = $2
            ORDER BY recorded_at DESC, rowid DESC
            LIMIT $3
            ",
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_sample).collect()
    }

    async fn delete_sample(&self, user_id: &str, kind: SampleKind, id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM health_samples WHERE id = $1 AND user_id = $2 AND kind = $3")
                .bind(id.to_string())
                .bind(user_id)
                .bind(kind.as_str())
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| {
                AppError::storage_unavailable(format!("Database health check failed: {e}"))
                    .with_source(e)
            })
    }
}
