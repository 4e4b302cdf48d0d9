//! Database operations for `import_runs`.
//!
//! Every catalog import is tracked as a run row moving through
//! `queued` -> `running` -> `succeeded` | `failed`. Transitions are guarded
//! so a run cannot be completed twice or started after finishing.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `import_runs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ImportRunRow {
    pub id: i64,
    pub public_id: Uuid,
    pub trigger_source: String,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub products_created: i32,
    pub products_skipped: i32,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Creates a new import run in `queued` status.
///
/// Generates a UUID in Rust and binds it to `public_id`. Returns the full
/// newly-created row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_import_run(
    pool: &PgPool,
    trigger_source: &str,
) -> Result<ImportRunRow, DbError> {
    let public_id = Uuid::new_v4();

    let row = sqlx::query_as::<_, ImportRunRow>(
        "INSERT INTO import_runs (public_id, trigger_source, status) \
         VALUES ($1, $2, 'queued') \
         RETURNING id, public_id, trigger_source, status, started_at, completed_at, \
                   products_created, products_skipped, error_message, created_at",
    )
    .bind(public_id)
    .bind(trigger_source)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Marks a run as `running` and sets `started_at = NOW()`.
///
/// # Errors
///
/// Returns [`DbError::InvalidImportRunTransition`] if the run is not
/// `queued`, or [`DbError::Sqlx`] if the update fails.
pub async fn start_import_run(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE import_runs \
         SET status = 'running', started_at = NOW() \
         WHERE id = $1 AND status = 'queued'",
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidImportRunTransition {
            id,
            expected_status: "queued",
        });
    }

    Ok(())
}

/// Marks a run as `succeeded` with its created/skipped counts and
/// `completed_at = NOW()`.
///
/// # Errors
///
/// Returns [`DbError::InvalidImportRunTransition`] if the run is not
/// `running`, or [`DbError::Sqlx`] if the update fails.
pub async fn complete_import_run(
    pool: &PgPool,
    id: i64,
    products_created: i32,
    products_skipped: i32,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE import_runs \
         SET status = 'succeeded', completed_at = NOW(), \
             products_created = $1, products_skipped = $2 \
         WHERE id = $3 AND status = 'running'",
    )
    .bind(products_created)
    .bind(products_skipped)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidImportRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Marks a run as `failed`, sets `completed_at = NOW()` and `error_message`.
///
/// # Errors
///
/// Returns [`DbError::InvalidImportRunTransition`] if the run is not
/// `running`, or [`DbError::Sqlx`] if the update fails.
pub async fn fail_import_run(pool: &PgPool, id: i64, error_message: &str) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE import_runs \
         SET status = 'failed', completed_at = NOW(), error_message = $1 \
         WHERE id = $2 AND status = 'running'",
    )
    .bind(error_message)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidImportRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Returns a single run by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the run does not exist, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_import_run(pool: &PgPool, id: i64) -> Result<ImportRunRow, DbError> {
    let row = sqlx::query_as::<_, ImportRunRow>(
        "SELECT id, public_id, trigger_source, status, started_at, completed_at, \
                products_created, products_skipped, error_message, created_at \
         FROM import_runs \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.ok_or(DbError::NotFound)
}

/// Returns the most recent runs, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_import_runs(pool: &PgPool, limit: i64) -> Result<Vec<ImportRunRow>, DbError> {
    let rows = sqlx::query_as::<_, ImportRunRow>(
        "SELECT id, public_id, trigger_source, status, started_at, completed_at, \
                products_created, products_skipped, error_message, created_at \
         FROM import_runs \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
