//! SQLite database setup and connection management for githistory
//! Handles database initialization, schema creation, and connection management.

use super::repository::{DbConn, SessionRepository};
use crate::infra::app_config::app_data_dir;
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;

/// Database wrapper that manages SQLite connections
pub struct Database {
    conn: DbConn,
}

impl Database {
    /// Create or open the database at the default location
    pub fn open() -> Result<Self> {
        let path = Self::default_path();
        Self::open_at(path)
    }

    /// Create an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init()?;
        Ok(db)
    }

    /// Create or open the database at a specific path
    pub fn open_at(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init()?;
        log::debug!("Session database at {}", path.display());
        Ok(db)
    }

    fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("GITHISTORY_DB_PATH") {
            return PathBuf::from(path);
        }
        app_data_dir().join("sessions.sqlite")
    }

    fn init(&self) -> Result<()> {
        let conn = self.conn.lock();
        const SCHEMA_VERSION: i32 = 1;

        let existing_version: i32 =
            conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        if existing_version < SCHEMA_VERSION {
            Self::create_schema(&conn)?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }

        Ok(())
    }

    pub fn connection(&self) -> DbConn {
        self.conn.clone()
    }

    pub fn session_repo(&self) -> SessionRepository {
        SessionRepository::new(self.connection())
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                workspace_folder TEXT NOT NULL,
                repository_root TEXT NOT NULL,
                branch_name TEXT NOT NULL,
                selection TEXT NOT NULL,
                search_text TEXT NOT NULL DEFAULT '',
                file_path TEXT,
                line_number INTEGER,
                updated_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}
