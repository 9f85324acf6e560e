use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::AppError;
use crate::models::session::CodingSession;

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<CodingSession> {
    Ok(CodingSession {
        id: row.get(0)?,
        public_id: row.get(1)?,
        session_name: row.get(2)?,
        files_json: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

pub fn insert_session(
    conn: &Connection,
    public_id: &str,
    session_name: Option<&str>,
    files_json: &str,
) -> Result<i64, AppError> {
    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO coding_session (public_id, session_name, files_json, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![public_id, session_name, files_json, now],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_by_public_id(
    conn: &Connection,
    public_id: &str,
) -> Result<Option<CodingSession>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, public_id, session_name, files_json, created_at, updated_at
         FROM coding_session WHERE public_id = ?1",
    )?;

    let session = stmt
        .query_row(params![public_id], session_from_row)
        .optional()?;

    Ok(session)
}

pub fn update_files_json(
    conn: &Connection,
    public_id: &str,
    files_json: Option<&str>,
) -> Result<usize, AppError> {
    let count = conn.execute(
        "UPDATE coding_session SET files_json = ?1, updated_at = ?2 WHERE public_id = ?3",
        params![files_json, chrono::Utc::now().to_rfc3339(), public_id],
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::migrations::run_migrations;
    use crate::data::SessionStore;

    fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_session_crud() {
        let conn = setup_db();

        let id = insert_session(&conn, "abc", Some("demo"), "{}").unwrap();
        assert!(id > 0);

        let fetched = find_by_public_id(&conn, "abc").unwrap().unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.session_name.as_deref(), Some("demo"));
        assert_eq!(fetched.files_json.as_deref(), Some("{}"));

        let count = update_files_json(&conn, "abc", Some("[]")).unwrap();
        assert_eq!(count, 1);
        let fetched = find_by_public_id(&conn, "abc").unwrap().unwrap();
        assert_eq!(fetched.files_json.as_deref(), Some("[]"));

        assert!(find_by_public_id(&conn, "missing").unwrap().is_none());
    }

    #[test]
    fn test_public_id_is_unique() {
        let conn = setup_db();
        insert_session(&conn, "abc", None, "{}").unwrap();
        assert!(insert_session(&conn, "abc", None, "{}").is_err());
    }

    #[test]
    fn test_store_reports_missing_session() {
        let conn = setup_db();
        let err = conn.load_by_public_id("nope").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let mut session = {
            insert_session(&conn, "abc", None, "{}").unwrap();
            conn.load_by_public_id("abc").unwrap()
        };
        session.public_id = "gone".to_string();
        assert!(matches!(conn.save(&session), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_store_save_writes_blob() {
        let conn = setup_db();
        insert_session(&conn, "abc", None, "{}").unwrap();

        let mut session = conn.load_by_public_id("abc").unwrap();
        session.files_json = Some(r#"{"name":"","type":"folder"}"#.to_string());
        conn.save(&session).unwrap();

        let reloaded = conn.load_by_public_id("abc").unwrap();
        assert_eq!(reloaded.files_json, session.files_json);
    }
}
