use crate::error::AppError;
use crate::models::tree_node::{NodeKind, TreeNode};

/// Splits a slash path into segments, ignoring repeated, leading and trailing
/// slashes. An empty result addresses the root.
pub fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_path(segments: &[String]) -> String {
    segments.join("/")
}

/// Like [`split_path`], but rejects paths that address the root.
pub fn node_segments(path: &str) -> Result<Vec<String>, AppError> {
    if path.trim().is_empty() {
        return Err(AppError::invalid("path is empty"));
    }
    let segments = split_path(path);
    if segments.is_empty() {
        return Err(AppError::invalid("path addresses the root"));
    }
    Ok(segments)
}

pub fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::invalid("name is empty"));
    }
    if name.contains('/') {
        return Err(AppError::invalid(format!("name must not contain '/': {name}")));
    }
    Ok(())
}

pub fn find_child<'a>(parent: &'a TreeNode, name: &str) -> Option<&'a TreeNode> {
    parent.children().iter().find(|c| c.name == name)
}

/// Walks every segment but the last, each of which must be an existing folder.
pub fn find_parent_mut<'a>(
    root: &'a mut TreeNode,
    segments: &[String],
) -> Result<&'a mut TreeNode, AppError> {
    let mut current = root;
    let depth = segments.len().saturating_sub(1);
    for segment in &segments[..depth] {
        let index = current
            .child_position(segment)
            .filter(|&i| current.children()[i].is_folder())
            .ok_or_else(|| AppError::not_found(format!("folder not found: {segment}")))?;
        current = &mut current.children_mut()[index];
    }
    Ok(current)
}

/// Resolves a full segment path to a node, if present.
pub fn find_node<'a>(root: &'a TreeNode, segments: &[String]) -> Option<&'a TreeNode> {
    let mut current = root;
    for segment in segments {
        current = find_child(current, segment)?;
    }
    Some(current)
}

/// Walks the path from the root, creating any missing folder on the way.
pub fn ensure_folder<'a>(
    root: &'a mut TreeNode,
    segments: &[String],
) -> Result<&'a mut TreeNode, AppError> {
    let mut current = root;
    for segment in segments {
        let index = match current.child_position(segment) {
            Some(i) if current.children()[i].is_folder() => i,
            Some(_) => {
                return Err(AppError::conflict(format!(
                    "a file already occupies folder path segment: {segment}"
                )))
            }
            None => {
                let children = current.children_mut();
                children.push(TreeNode::folder(segment.as_str()));
                children.len() - 1
            }
        };
        current = &mut current.children_mut()[index];
    }
    Ok(current)
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 => name.split_at(i),
        _ => (name, ""),
    }
}

/// The `attempt`-th copy name for `name`: `<stem>-copy<ext>`, then
/// `<stem>-copy 2<ext>` and so on. Only files keep their extension.
pub fn copy_name(name: &str, kind: NodeKind, attempt: usize) -> String {
    let (stem, ext) = match kind {
        NodeKind::File => split_extension(name),
        NodeKind::Folder => (name, ""),
    };
    if attempt <= 1 {
        format!("{stem}-copy{ext}")
    } else {
        format!("{stem}-copy {attempt}{ext}")
    }
}

/// True when `ancestor` is a strict prefix of `candidate`.
pub fn is_ancestor_path(ancestor: &[String], candidate: &[String]) -> bool {
    ancestor.len() < candidate.len() && candidate.starts_with(ancestor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(path: &str) -> Vec<String> {
        split_path(path)
    }

    fn sample_tree() -> TreeNode {
        let mut src = TreeNode::folder("src");
        src.children_mut().push(TreeNode::file("main.rs", "fn main() {}"));
        let mut root = TreeNode::root();
        root.children_mut().push(src);
        root.children_mut().push(TreeNode::file("README.md", "# hi"));
        root
    }

    #[test]
    fn split_collapses_and_strips_slashes() {
        assert_eq!(segs("//src///lib//mod.rs/"), vec!["src", "lib", "mod.rs"]);
        assert_eq!(segs("a"), vec!["a"]);
        assert!(segs("").is_empty());
        assert!(segs("///").is_empty());
    }

    #[test]
    fn node_segments_rejects_root() {
        assert!(matches!(node_segments(""), Err(AppError::InvalidArgument(_))));
        assert!(matches!(node_segments("  "), Err(AppError::InvalidArgument(_))));
        assert!(matches!(node_segments("//"), Err(AppError::InvalidArgument(_))));
        assert_eq!(node_segments("/a/b").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn validate_name_rejects_slash_and_blank() {
        assert!(validate_name("ok.txt").is_ok());
        assert!(validate_name(" ").is_err());
        assert!(validate_name("a/b").is_err());
    }

    #[test]
    fn find_parent_returns_root_for_single_segment() {
        let mut root = sample_tree();
        let parent = find_parent_mut(&mut root, &segs("README.md")).unwrap();
        assert_eq!(parent.name, "");
    }

    #[test]
    fn find_parent_walks_folders() {
        let mut root = sample_tree();
        let parent = find_parent_mut(&mut root, &segs("src/main.rs")).unwrap();
        assert_eq!(parent.name, "src");
    }

    #[test]
    fn find_parent_fails_through_file_or_missing_folder() {
        let mut root = sample_tree();
        let err = find_parent_mut(&mut root, &segs("README.md/x")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = find_parent_mut(&mut root, &segs("missing/x")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn ensure_folder_creates_missing_segments() {
        let mut root = sample_tree();
        let folder = ensure_folder(&mut root, &segs("src/a/b")).unwrap();
        assert_eq!(folder.name, "b");
        assert!(find_node(&root, &segs("src/a/b")).unwrap().is_folder());
        assert_eq!(find_node(&root, &segs("src")).unwrap().children().len(), 2);
    }

    #[test]
    fn ensure_folder_refuses_to_shadow_a_file() {
        let mut root = sample_tree();
        let err = ensure_folder(&mut root, &segs("README.md/docs")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn copy_name_keeps_file_extension_only() {
        assert_eq!(copy_name("notes.txt", NodeKind::File, 1), "notes-copy.txt");
        assert_eq!(copy_name("notes.txt", NodeKind::File, 3), "notes-copy 3.txt");
        assert_eq!(copy_name(".env", NodeKind::File, 1), ".env-copy");
        assert_eq!(copy_name("v1.0", NodeKind::Folder, 2), "v1.0-copy 2");
    }

    #[test]
    fn ancestor_path_is_strict_prefix() {
        assert!(is_ancestor_path(&segs("a"), &segs("a/b")));
        assert!(is_ancestor_path(&segs("a/b"), &segs("a/b/c/d")));
        assert!(!is_ancestor_path(&segs("a/b"), &segs("a/b")));
        assert!(!is_ancestor_path(&segs("a/b"), &segs("a/bc")));
        assert!(!is_ancestor_path(&segs("a/b"), &segs("a")));
    }
}
