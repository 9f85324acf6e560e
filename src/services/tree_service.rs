use crate::data::SessionStore;
use crate::error::AppError;
use crate::models::tree_node::{NodeKind, TreeNode};
use crate::services::tree_store;
use crate::tree_path::{
    copy_name, ensure_folder, find_child, find_parent_mut, is_ancestor_path, join_path,
    node_segments, split_path, validate_name,
};

pub fn get_tree<S: SessionStore + ?Sized>(store: &S, public_id: &str) -> Result<TreeNode, AppError> {
    tree_store::read(store, public_id, |root| Ok(root.clone()))
}

pub fn create_node<S: SessionStore + ?Sized>(
    store: &S,
    public_id: &str,
    path: &str,
    kind: NodeKind,
    content: Option<&str>,
) -> Result<(), AppError> {
    let segments = node_segments(path)?;
    tree_store::mutate(store, public_id, |root| {
        let parent = find_parent_mut(root, &segments)?;
        let name = last_segment(&segments);
        if parent.has_child(name) {
            return Err(AppError::conflict(format!("a node named {name} already exists")));
        }
        let node = match kind {
            NodeKind::Folder => TreeNode::folder(name),
            NodeKind::File => TreeNode::file(name, content.unwrap_or_default()),
        };
        parent.children_mut().push(node);
        log::debug!("created {kind} {} in session {public_id}", join_path(&segments));
        Ok(())
    })
}

pub fn update_file_content<S: SessionStore + ?Sized>(
    store: &S,
    public_id: &str,
    path: &str,
    content: &str,
) -> Result<(), AppError> {
    let segments = node_segments(path)?;
    tree_store::mutate(store, public_id, |root| {
        let parent = find_parent_mut(root, &segments)?;
        let name = last_segment(&segments);
        let index = parent
            .child_position(name)
            .ok_or_else(|| AppError::not_found(format!("file not found: {name}")))?;
        let node = &mut parent.children_mut()[index];
        if !node.is_file() {
            return Err(AppError::invalid(format!("not a file: {name}")));
        }
        node.content = Some(content.to_string());
        Ok(())
    })
}

pub fn delete_node<S: SessionStore + ?Sized>(
    store: &S,
    public_id: &str,
    path: &str,
) -> Result<(), AppError> {
    let segments = node_segments(path)?;
    tree_store::mutate(store, public_id, |root| {
        let parent = find_parent_mut(root, &segments)?;
        let name = last_segment(&segments);
        let index = parent
            .child_position(name)
            .ok_or_else(|| AppError::not_found(format!("node not found: {name}")))?;
        parent.children_mut().remove(index);
        log::debug!("deleted {} in session {public_id}", join_path(&segments));
        Ok(())
    })
}

pub fn rename_node<S: SessionStore + ?Sized>(
    store: &S,
    public_id: &str,
    path: &str,
    new_name: &str,
) -> Result<(), AppError> {
    validate_name(new_name)?;
    let segments = node_segments(path)?;
    tree_store::mutate(store, public_id, |root| {
        let parent = find_parent_mut(root, &segments)?;
        let name = last_segment(&segments);
        let index = parent
            .child_position(name)
            .ok_or_else(|| AppError::not_found(format!("node not found: {name}")))?;
        if parent.has_child(new_name) {
            return Err(AppError::conflict(format!(
                "a node named {new_name} already exists"
            )));
        }
        parent.children_mut()[index].name = new_name.to_string();
        Ok(())
    })
}

/// Moves the node at `from` into the folder `to_folder`, creating that folder
/// path if needed. The node keeps its name and subtree.
pub fn move_node<S: SessionStore + ?Sized>(
    store: &S,
    public_id: &str,
    from: &str,
    to_folder: &str,
) -> Result<(), AppError> {
    let from_segments = node_segments(from)?;
    let dest_segments = split_path(to_folder);
    if dest_segments == from_segments || is_ancestor_path(&from_segments, &dest_segments) {
        return Err(AppError::invalid(format!(
            "cannot move {} into itself",
            join_path(&from_segments)
        )));
    }

    tree_store::mutate(store, public_id, |root| {
        let name = last_segment(&from_segments);
        if !find_parent_mut(root, &from_segments)?.has_child(name) {
            return Err(AppError::not_found(format!("node not found: {name}")));
        }
        if ensure_folder(root, &dest_segments)?.has_child(name) {
            return Err(AppError::conflict(format!(
                "destination already contains {name}"
            )));
        }

        let source = find_parent_mut(root, &from_segments)?;
        let index = source
            .child_position(name)
            .ok_or_else(|| AppError::not_found(format!("node not found: {name}")))?;
        let node = source.children_mut().remove(index);
        ensure_folder(root, &dest_segments)?.children_mut().push(node);
        log::debug!(
            "moved {} to /{} in session {public_id}",
            join_path(&from_segments),
            join_path(&dest_segments)
        );
        Ok(())
    })
}

/// Deep-copies the node at `path` next to itself and returns the copy's path.
/// Without `target_name` the copy is named `<stem>-copy<ext>`, then
/// `<stem>-copy 2<ext>` and so on until the name is free.
pub fn duplicate_node<S: SessionStore + ?Sized>(
    store: &S,
    public_id: &str,
    path: &str,
    target_name: Option<&str>,
) -> Result<String, AppError> {
    let segments = node_segments(path)?;
    let target_name = target_name.filter(|name| !name.trim().is_empty());
    if let Some(name) = target_name {
        validate_name(name)?;
    }

    tree_store::mutate(store, public_id, |root| {
        let parent = find_parent_mut(root, &segments)?;
        let name = last_segment(&segments);
        let original = find_child(parent, name)
            .ok_or_else(|| AppError::not_found(format!("node not found: {name}")))?;

        let new_name = match target_name {
            Some(name) => name.to_string(),
            None => unique_copy_name(parent, original),
        };
        if parent.has_child(&new_name) {
            return Err(AppError::conflict(format!(
                "a node named {new_name} already exists"
            )));
        }

        let mut copy = original.clone();
        copy.name = new_name.clone();
        parent.children_mut().push(copy);

        let mut new_segments = segments[..segments.len() - 1].to_vec();
        new_segments.push(new_name);
        Ok(join_path(&new_segments))
    })
}

fn last_segment(segments: &[String]) -> &str {
    segments.last().map(String::as_str).unwrap_or_default()
}

fn unique_copy_name(parent: &TreeNode, node: &TreeNode) -> String {
    (1..)
        .map(|attempt| copy_name(&node.name, node.kind, attempt))
        .find(|candidate| !parent.has_child(candidate))
        .unwrap_or_default()
}
