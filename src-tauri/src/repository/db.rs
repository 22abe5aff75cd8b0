//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations. The connection slot starts
//! empty so the app can show its window while the database opens.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Shared, lazily filled connection slot
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
    pub path: PathBuf,
}

impl DbState {
    pub fn new(path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
            path,
        }
    }

    /// Open the database file and run migrations, filling the slot
    pub async fn initialize(&self) -> DomainResult<()> {
        let conn = open_db(&self.path)?;
        *self.conn.lock().await = Some(conn);
        Ok(())
    }
}

/// Initialize database with path (`:memory:` for an in-memory database)
#[cfg(test)]
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let state = DbState::new(db_path.to_path_buf());
    state.initialize().await?;
    Ok(state)
}

fn open_db(db_path: &Path) -> DomainResult<Connection> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory()?
    } else {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DomainError::Storage(format!("Failed to create data dir: {}", e)))?;
        }
        Connection::open(db_path)?
    };
    run_migrations(&conn)?;
    Ok(conn)
}

/// Borrow the connection out of a locked slot
pub(crate) fn connection(slot: &Option<Connection>) -> DomainResult<&Connection> {
    slot.as_ref()
        .ok_or(DomainError::Internal("Database not initialized".to_string()))
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS trips (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            title TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            days TEXT NOT NULL DEFAULT '[]',
            created_at INTEGER,
            updated_at INTEGER
        )",
        (),
    )?;

    // Cover images arrived after the first schema
    if !column_exists(conn, "trips", "image_url")? {
        conn.execute("ALTER TABLE trips ADD COLUMN image_url TEXT NOT NULL DEFAULT ''", ())?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_trips_owner ON trips(owner_id, start_date)",
        (),
    )?;

    Ok(())
}
