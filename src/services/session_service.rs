use rusqlite::Connection;

use crate::data::{repository, SessionStore};
use crate::error::AppError;
use crate::models::file_data::FileData;
use crate::models::session::CodingSession;
use crate::models::tree_node::TreeNode;
use crate::services::{tree_converter, tree_store};

pub const STARTER_FILE_NAME: &str = "main.js";
pub const STARTER_FILE_CONTENT: &str = "// Welcome to CodeSync!";

fn starter_tree() -> TreeNode {
    let mut root = TreeNode::root();
    root.children_mut().push(TreeNode::file(STARTER_FILE_NAME, STARTER_FILE_CONTENT));
    root
}

/// Creates a session with a fresh public id and the starter tree.
pub fn create_session(
    conn: &Connection,
    session_name: Option<&str>,
) -> Result<CodingSession, AppError> {
    let public_id = uuid::Uuid::new_v4().to_string();
    let files_json = serde_json::to_string(&starter_tree())?;
    repository::insert_session(conn, &public_id, session_name, &files_json)?;
    log::info!("created session {public_id}");
    conn.load_by_public_id(&public_id)
}

/// The session's files in the legacy flat-list shape.
pub fn list_files<S: SessionStore + ?Sized>(
    store: &S,
    public_id: &str,
) -> Result<Vec<FileData>, AppError> {
    tree_store::read(store, public_id, |root| {
        Ok(tree_converter::tree_to_flat_list(root))
    })
}
