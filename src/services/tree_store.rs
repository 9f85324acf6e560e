use crate::data::SessionStore;
use crate::error::AppError;
use crate::models::file_data::FileData;
use crate::models::session::CodingSession;
use crate::models::tree_node::TreeNode;
use crate::services::tree_converter;

/// Rebuilds the session's tree from its blob.
///
/// A blank blob yields an empty root. A blob in the legacy flat-list form
/// (leading `[`) is converted and written back in tree form before returning,
/// so later loads never see the legacy form again. A stored root that is not
/// an unnamed folder is rejected.
pub fn load_root<S: SessionStore + ?Sized>(
    store: &S,
    session: &mut CodingSession,
) -> Result<TreeNode, AppError> {
    let blob = session.files_json.as_deref().map(str::trim).unwrap_or("");
    if blob.is_empty() {
        return Ok(TreeNode::root());
    }

    if blob.starts_with('[') {
        let flat: Vec<Option<FileData>> = serde_json::from_str(blob)?;
        let root = tree_converter::flat_list_to_tree(&flat);
        persist(store, session, &root)?;
        log::info!(
            "migrated legacy file list of session {} ({} entries)",
            session.public_id,
            flat.len()
        );
        return Ok(root);
    }

    let root: TreeNode = serde_json::from_str(blob)?;
    if !root.is_folder() || !root.name.is_empty() {
        return Err(AppError::InvalidTree(format!(
            "root of session {} must be an unnamed folder, found {} {:?}",
            session.public_id, root.kind, root.name
        )));
    }
    Ok(root)
}

pub fn persist<S: SessionStore + ?Sized>(
    store: &S,
    session: &mut CodingSession,
    root: &TreeNode,
) -> Result<(), AppError> {
    session.files_json = Some(serde_json::to_string(root)?);
    store.save(session)
}

/// Load, hand the tree to `op`, persist once if `op` succeeds.
pub fn mutate<S, T, F>(store: &S, public_id: &str, op: F) -> Result<T, AppError>
where
    S: SessionStore + ?Sized,
    F: FnOnce(&mut TreeNode) -> Result<T, AppError>,
{
    let mut session = store.load_by_public_id(public_id)?;
    let mut root = load_root(store, &mut session)?;
    let value = op(&mut root)?;
    persist(store, &mut session, &root)?;
    Ok(value)
}

/// Load and hand the tree to `op` without writing back (beyond migration).
pub fn read<S, T, F>(store: &S, public_id: &str, op: F) -> Result<T, AppError>
where
    S: SessionStore + ?Sized,
    F: FnOnce(&TreeNode) -> Result<T, AppError>,
{
    let mut session = store.load_by_public_id(public_id)?;
    let root = load_root(store, &mut session)?;
    op(&root)
}
