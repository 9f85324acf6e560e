pub mod migrations;
pub mod repository;

use rusqlite::Connection;

use crate::error::AppError;
use crate::models::session::CodingSession;

/// Load and save of whole session records. The tree engine reads and writes
/// nothing else, so any isolation around a load/save pair is the store's.
pub trait SessionStore {
    fn load_by_public_id(&self, public_id: &str) -> Result<CodingSession, AppError>;
    fn save(&self, session: &CodingSession) -> Result<(), AppError>;
}

impl SessionStore for Connection {
    fn load_by_public_id(&self, public_id: &str) -> Result<CodingSession, AppError> {
        repository::find_by_public_id(self, public_id)?
            .ok_or_else(|| AppError::not_found(format!("session not found: {public_id}")))
    }

    fn save(&self, session: &CodingSession) -> Result<(), AppError> {
        let updated = repository::update_files_json(
            self,
            &session.public_id,
            session.files_json.as_deref(),
        )?;
        if updated == 0 {
            return Err(AppError::not_found(format!(
                "session not found: {}",
                session.public_id
            )));
        }
        Ok(())
    }
}
