use serde::{Deserialize, Serialize};

/// A coding session row. `files_json` is the whole tree blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodingSession {
    pub id: i64,
    pub public_id: String,
    pub session_name: Option<String>,
    pub files_json: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
