//! Trip Repository
//!
//! SQLite-backed implementation. One row per trip, scoped to an owner; the
//! day/item structure is stored as a single JSON document column.

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Row};

use crate::domain::{Day, DomainError, DomainResult, Entity, Trip};
use super::db::{connection, SharedConnection};
use super::traits::Repository;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_TRIP: &str =
    "SELECT id, title, start_date, end_date, image_url, days, created_at, updated_at FROM trips";

/// SQLite implementation of the Trip repository
pub struct SqliteTripRepository {
    conn: SharedConnection,
    owner_id: String,
}

impl SqliteTripRepository {
    pub fn new(conn: SharedConnection, owner_id: impl Into<String>) -> Self {
        Self {
            conn,
            owner_id: owner_id.into(),
        }
    }
}

#[async_trait]
impl Repository<Trip> for SqliteTripRepository {
    async fn create(&self, entity: &Trip) -> DomainResult<Trip> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let days = serde_json::to_string(&entity.days)?;
        conn.execute(
            "INSERT INTO trips (id, owner_id, title, start_date, end_date, image_url, days, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.id,
                self.owner_id,
                entity.title,
                entity.start_date.format(DATE_FORMAT).to_string(),
                entity.end_date.format(DATE_FORMAT).to_string(),
                entity.image_url,
                days,
                entity.created_at,
                entity.updated_at,
            ],
        )?;

        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: String) -> DomainResult<Option<Trip>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!("{} WHERE id = ? AND owner_id = ?", SELECT_TRIP))?;
        let mut rows = stmt.query(params![id, self.owner_id])?;

        match rows.next()? {
            Some(row) => Ok(Some(row_to_trip(row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Trip>> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let mut stmt = conn.prepare(&format!(
            "{} WHERE owner_id = ? ORDER BY start_date ASC, title ASC",
            SELECT_TRIP
        ))?;
        let mut rows = stmt.query(params![self.owner_id])?;

        let mut trips = Vec::new();
        while let Some(row) = rows.next()? {
            trips.push(row_to_trip(row)?);
        }
        Ok(trips)
    }

    async fn update(&self, entity: &Trip) -> DomainResult<Trip> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let days = serde_json::to_string(&entity.days)?;
        let changed = conn.execute(
            "UPDATE trips SET title = ?, start_date = ?, end_date = ?, image_url = ?, days = ?, updated_at = ?
             WHERE id = ? AND owner_id = ?",
            params![
                entity.title,
                entity.start_date.format(DATE_FORMAT).to_string(),
                entity.end_date.format(DATE_FORMAT).to_string(),
                entity.image_url,
                days,
                entity.updated_at,
                entity.id,
                self.owner_id,
            ],
        )?;

        if changed == 0 {
            return Err(DomainError::not_found(Trip::KIND, entity.id.clone()));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: String) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = connection(&guard)?;

        let changed = conn.execute(
            "DELETE FROM trips WHERE id = ? AND owner_id = ?",
            params![id, self.owner_id],
        )?;
        if changed == 0 {
            tracing::debug!(trip_id = %id, "delete of missing trip row ignored");
        }
        Ok(())
    }
}

fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| DomainError::Storage(format!("Bad date '{}': {}", raw, e)))
}

/// Convert a database row to Trip
fn row_to_trip(row: &Row) -> DomainResult<Trip> {
    let start: String = row.get(2)?;
    let end: String = row.get(3)?;
    let days_json: String = row.get(5)?;
    let days: Vec<Day> = serde_json::from_str(&days_json)?;

    Ok(Trip {
        id: row.get(0)?,
        title: row.get(1)?,
        start_date: parse_date(&start)?,
        end_date: parse_date(&end)?,
        image_url: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        days,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
