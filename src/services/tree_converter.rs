use crate::models::file_data::FileData;
use crate::models::tree_node::{NodeKind, TreeNode};
use crate::tree_path::{copy_name, find_child, split_path};

/// Builds a tree from the legacy flat list. Best effort: `null` entries and
/// entries without a name are skipped, duplicate folders collapse and a
/// repeated file keeps the last content. When a file and a folder claim the
/// same name, the later entry is kept under a `-copy` name.
pub fn flat_list_to_tree(entries: &[Option<FileData>]) -> TreeNode {
    let mut root = TreeNode::root();
    for entry in entries {
        let Some((entry, path)) = entry
            .as_ref()
            .and_then(|entry| entry.name.as_deref().map(|path| (entry, path)))
        else {
            log::warn!("skipping legacy entry without a name");
            continue;
        };

        let is_folder = entry.is_folder || path.ends_with('/');
        let segments = split_path(path);
        let Some((name, parents)) = segments.split_last() else {
            continue;
        };

        let mut parent = &mut root;
        for segment in parents {
            parent = folder_slot(parent, segment);
        }

        if is_folder {
            folder_slot(parent, name);
            continue;
        }

        let content = entry.content.clone().unwrap_or_default();
        let slot = free_slot(parent, name, NodeKind::File);
        match parent.child_position(&slot) {
            Some(i) => parent.children_mut()[i].content = Some(content),
            None => parent.children_mut().push(TreeNode::file(slot, content)),
        }
    }
    root
}

/// First of `name`, `name`'s copy names that is free or already a node of
/// `kind` in `parent`.
fn free_slot(parent: &TreeNode, name: &str, kind: NodeKind) -> String {
    let slot = (0..)
        .map(|attempt| match attempt {
            0 => name.to_string(),
            n => copy_name(name, kind, n),
        })
        .find(|candidate| find_child(parent, candidate).map_or(true, |c| c.kind == kind))
        .unwrap_or_default();
    if slot != name {
        log::warn!("legacy {kind} {name} collides with a node of another type, kept as {slot}");
    }
    slot
}

fn folder_slot<'a>(parent: &'a mut TreeNode, name: &str) -> &'a mut TreeNode {
    let slot = free_slot(parent, name, NodeKind::Folder);
    let index = match parent.child_position(&slot) {
        Some(i) => i,
        None => {
            let children = parent.children_mut();
            children.push(TreeNode::folder(slot));
            children.len() - 1
        }
    };
    &mut parent.children_mut()[index]
}

/// Flattens the tree in pre-order; folders are emitted as `path/`.
pub fn tree_to_flat_list(root: &TreeNode) -> Vec<FileData> {
    let mut out = Vec::new();
    walk(root, "", &mut out);
    out
}

fn walk(node: &TreeNode, prefix: &str, out: &mut Vec<FileData>) {
    for child in node.children() {
        let path = if prefix.is_empty() {
            child.name.clone()
        } else {
            format!("{prefix}/{}", child.name)
        };
        if child.is_folder() {
            out.push(FileData::folder(path.as_str()));
            walk(child, &path, out);
        } else {
            out.push(FileData::file(path, child.content()));
        }
    }
}
