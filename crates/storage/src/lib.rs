use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use thiserror::Error;
use tracing::{debug, warn};

use editor_core::RecordGateway;
use shared::domain::{CatchRecord, RecordId};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot update a record that was never persisted")]
    MissingRecordId,
}

/// SQLite-backed record store behind the editor's gateway seam.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        let storage = Self { pool };
        storage.ensure_records_table().await?;
        Ok(storage)
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn ensure_records_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                name    TEXT NOT NULL,
                kind    TEXT NOT NULL,
                sprite  TEXT NOT NULL,
                date    TEXT NOT NULL,
                place   TEXT NOT NULL,
                game    TEXT NOT NULL,
                notes   TEXT NOT NULL,
                caught  INTEGER NOT NULL DEFAULT 0,
                dex_no  TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure records table exists")?;
        Ok(())
    }

    pub async fn insert_record(&self, record: &CatchRecord) -> Result<RecordId> {
        let rec = sqlx::query(
            "INSERT INTO records (name, kind, sprite, date, place, game, notes, caught, dex_no)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&record.name)
        .bind(&record.kind)
        .bind(&record.sprite)
        .bind(&record.date)
        .bind(&record.place)
        .bind(&record.game)
        .bind(&record.notes)
        .bind(record.caught)
        .bind(&record.dex_no)
        .fetch_one(&self.pool)
        .await?;
        Ok(RecordId(rec.get::<i64, _>(0)))
    }

    pub async fn load_record(&self, id: RecordId) -> Result<Option<CatchRecord>> {
        let row = sqlx::query(
            "SELECT id, name, kind, sprite, date, place, game, notes, caught, dex_no
             FROM records
             WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| record_from_row(&r)))
    }

    pub async fn update_record(&self, id: RecordId, record: &CatchRecord) -> Result<bool> {
        let updated = sqlx::query(
            "UPDATE records
             SET name = ?, kind = ?, sprite = ?, date = ?, place = ?, game = ?,
                 notes = ?, caught = ?, dex_no = ?
             WHERE id = ?",
        )
        .bind(&record.name)
        .bind(&record.kind)
        .bind(&record.sprite)
        .bind(&record.date)
        .bind(&record.place)
        .bind(&record.game)
        .bind(&record.notes)
        .bind(record.caught)
        .bind(&record.dex_no)
        .bind(id.0)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(updated > 0)
    }

    pub async fn delete_record(&self, id: RecordId) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM records WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }

    pub async fn list_records(&self) -> Result<Vec<CatchRecord>> {
        let rows = sqlx::query(
            "SELECT id, name, kind, sprite, date, place, game, notes, caught, dex_no
             FROM records
             ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(record_from_row).collect())
    }
}

fn record_from_row(row: &SqliteRow) -> CatchRecord {
    CatchRecord {
        id: Some(RecordId(row.get::<i64, _>(0))),
        name: row.get::<String, _>(1),
        kind: row.get::<String, _>(2),
        sprite: row.get::<String, _>(3),
        date: row.get::<String, _>(4),
        place: row.get::<String, _>(5),
        game: row.get::<String, _>(6),
        notes: row.get::<String, _>(7),
        caught: row.get::<bool, _>(8),
        dex_no: row.get::<String, _>(9),
    }
}

#[async_trait]
impl RecordGateway for Storage {
    async fn lookup(&self, id: RecordId) -> Result<Option<CatchRecord>> {
        self.load_record(id).await
    }

    async fn create(&self, record: CatchRecord) -> Result<()> {
        let id = self.insert_record(&record).await?;
        debug!(id = id.0, "record created");
        Ok(())
    }

    async fn update(&self, record: CatchRecord) -> Result<()> {
        let id = record.id.ok_or(StorageError::MissingRecordId)?;
        if !self.update_record(id, &record).await? {
            warn!(id = id.0, "update touched no rows");
        }
        Ok(())
    }

    async fn delete(&self, id: Option<RecordId>) -> Result<()> {
        // An absent id means the record was never persisted; there is
        // nothing to remove, so the store is left untouched.
        let Some(id) = id else {
            debug!("delete requested for an unpersisted record");
            return Ok(());
        };
        self.delete_record(id).await?;
        Ok(())
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
