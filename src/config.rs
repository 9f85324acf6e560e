use std::path::PathBuf;

use crate::error::AppError;

pub const DB_PATH_ENV: &str = "CODESYNC_DB_PATH";
const DB_FILE_NAME: &str = "codesync.db";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub db_path: PathBuf,
}

impl EngineConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// `CODESYNC_DB_PATH` when set, otherwise `codesync.db` in the platform
    /// data directory.
    pub fn from_env() -> Result<Self, AppError> {
        if let Some(path) = std::env::var(DB_PATH_ENV)
            .ok()
            .filter(|path| !path.trim().is_empty())
        {
            return Ok(Self::new(path));
        }

        let dirs = directories::ProjectDirs::from("com", "codesync", "codesync").ok_or_else(|| {
            AppError::General("could not resolve application data directory".to_string())
        })?;
        Ok(Self::new(dirs.data_dir().join(DB_FILE_NAME)))
    }
}
