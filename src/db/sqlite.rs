// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite activity store.
//!
//! Activities are keyed by the SHA-256 of their raw GPX. Adding a recording
//! whose digest is already stored replaces the old row inside the same
//! transaction, so a resubmission never leaves a duplicate behind.

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::db::codec::{decode_splits, encode_splits};
use crate::db::{content_digest, tables};
use crate::error::AppError;
use crate::models::{Activity, NewActivity};
use crate::services::splits::calculate_splits;
use crate::time_utils::{format_completion_date, parse_completion_date};

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
/// Format of SQLite's `CURRENT_TIMESTAMP`.
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column list for activity reads.
const ACTIVITY_COLUMNS: &str = "id, name, date, distance, duration, elevation_gain, \
    elevation_loss, average_pace, splits, elevation, gpx, gpx_hash, created_at";

/// Activity store backed by a SQLite pool.
#[derive(Clone)]
pub struct ActivityStore {
    pool: SqlitePool,
}

impl ActivityStore {
    /// Open (creating if missing) the database at `database_url` and
    /// bootstrap the schema.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open {}: {}", database_url, e)))?;

        let store = Self { pool };
        store.init_schema().await?;

        tracing::info!(database = database_url, "Connected to SQLite");
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    ///
    /// Each SQLite connection to `:memory:` is its own database, so the pool
    /// is pinned to a single connection that never expires.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create the `activities` table if it does not exist.
    pub async fn init_schema(&self) -> Result<(), AppError> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                date TEXT,
                distance REAL,
                duration REAL,
                elevation_gain REAL,
                elevation_loss REAL NOT NULL DEFAULT 0,
                average_pace REAL,
                elevation REAL,
                gpx BLOB,
                gpx_hash TEXT UNIQUE,
                splits BLOB,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            tables::ACTIVITIES
        );
        sqlx::query(&ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to create schema: {}", e)))?;
        Ok(())
    }

    /// Underlying pool, for maintenance queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Ingest an activity, replacing any prior row with the same GPX digest.
    ///
    /// Lookup, delete, split derivation and insert run in one transaction.
    /// Dropping the future before it resolves rolls the transaction back.
    /// Returns the digest of the stored recording.
    pub async fn add(&self, activity: &NewActivity) -> Result<String, AppError> {
        if activity.gpx.is_empty() {
            return Err(AppError::InvalidRecording("GPX is empty".to_string()));
        }

        let digest = content_digest(&activity.gpx);
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE gpx_hash = ?",
            tables::ACTIVITIES
        ))
        .bind(&digest)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Failed to look up {}: {}", digest, e)))?;

        if existing > 0 {
            sqlx::query(&format!(
                "DELETE FROM {} WHERE gpx_hash = ?",
                tables::ACTIVITIES
            ))
            .bind(&digest)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete {}: {}", digest, e)))?;

            tracing::info!(digest = %digest, existing, "Deleted existing activity");
        }

        let splits = calculate_splits(&activity.recording.tracks)?;
        let splits_blob = encode_splits(&splits)?;

        let result = sqlx::query(&format!(
            "INSERT INTO {}
                (name, date, distance, duration, elevation_gain, elevation_loss,
                 average_pace, splits, elevation, gpx, gpx_hash)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            tables::ACTIVITIES
        ))
        .bind(&activity.name)
        .bind(activity.completed_date.map(format_completion_date))
        .bind(activity.distance)
        .bind(activity.duration)
        .bind(activity.uphill)
        .bind(activity.downhill)
        .bind(activity.average_pace)
        .bind(&splits_blob)
        .bind(activity.elevation)
        .bind(&activity.gpx)
        .bind(&digest)
        .execute(&mut *tx)
        .await
        .map_err(|e| insert_error(e, &digest))?;

        let affected = result.rows_affected();
        if affected != 1 {
            return Err(AppError::RowCount { digest, affected });
        }

        tx.commit().await?;

        tracing::info!(
            digest = %digest,
            splits = splits.len(),
            replaced = existing > 0,
            "Activity stored"
        );
        Ok(digest)
    }

    /// All activities in insertion order.
    ///
    /// One `SELECT`, so the rows come from a single read snapshot. Any row
    /// that fails to decode aborts the whole call.
    pub async fn get(&self) -> Result<Vec<Activity>, AppError> {
        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM {} ORDER BY id ASC",
            tables::ACTIVITIES
        );
        let rows = sqlx::query_as::<_, ActivityRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to read activities: {}", e)))?;

        rows.into_iter().map(ActivityRow::into_activity).collect()
    }

    /// Number of stored rows with the given digest.
    pub async fn count_by_digest(&self, digest: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE gpx_hash = ?",
            tables::ACTIVITIES
        ))
        .bind(digest)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

fn insert_error(err: sqlx::Error, digest: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict {
            digest: digest.to_string(),
        },
        _ => AppError::Database(format!("Failed to insert {}: {}", digest, err)),
    }
}

/// Raw `activities` row.
#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: i64,
    name: Option<String>,
    date: Option<String>,
    distance: f64,
    duration: f64,
    elevation_gain: f64,
    elevation_loss: f64,
    average_pace: f64,
    splits: Vec<u8>,
    elevation: f64,
    gpx: Vec<u8>,
    gpx_hash: String,
    created_at: String,
}

impl ActivityRow {
    fn into_activity(self) -> Result<Activity, AppError> {
        let id = self.id;

        let completed_date = self
            .date
            .as_deref()
            .map(|raw| {
                parse_completion_date(raw).map_err(|e| {
                    AppError::Decode(format!("Invalid date {:?} on activity {}: {}", raw, id, e))
                })
            })
            .transpose()?;

        let created = parse_created_at(&self.created_at).map_err(|e| {
            AppError::Decode(format!(
                "Invalid created_at {:?} on activity {}: {}",
                self.created_at, id, e
            ))
        })?;

        let splits = decode_splits(&self.splits)
            .map_err(|e| AppError::Decode(format!("Activity {}: {}", id, e)))?;

        Ok(Activity {
            id,
            name: self.name.unwrap_or_default(),
            created,
            distance: self.distance,
            duration: self.duration,
            completed_date,
            elevation: self.elevation,
            uphill: self.elevation_gain,
            downhill: self.elevation_loss,
            average_pace: self.average_pace,
            splits,
            gpx: self.gpx,
            gpx_hash: self.gpx_hash,
        })
    }
}

fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, CREATED_AT_FORMAT).map(|naive| naive.and_utc())
}
