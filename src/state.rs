use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::config::EngineConfig;
use crate::data::migrations;
use crate::error::AppError;

/// Shared database handle. Every engine call holds the guard for its whole
/// load/store cycle; the engine itself adds no locking.
pub struct AppState {
    pub db: Mutex<Connection>,
    pub db_path: PathBuf,
}

impl AppState {
    pub fn open(config: &EngineConfig) -> Result<Self, AppError> {
        if let Some(parent) = config.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&config.db_path)?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            db: Mutex::new(conn),
            db_path: config.db_path.clone(),
        })
    }

    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.db
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
