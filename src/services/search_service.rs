use crate::data::SessionStore;
use crate::error::AppError;
use crate::models::search::SearchMatch;
use crate::models::tree_node::TreeNode;
use crate::services::tree_store;

pub const MIN_QUERY_CHARS: usize = 3;
pub const MAX_SEARCH_MATCHES: usize = 100;

/// Case-insensitive line search over every file of the session, in tree order.
/// Surrounding whitespace only counts against the length check; matching uses
/// the query as given. Stops quietly after [`MAX_SEARCH_MATCHES`] hits.
pub fn search_project<S: SessionStore + ?Sized>(
    store: &S,
    public_id: &str,
    query: &str,
) -> Result<Vec<SearchMatch>, AppError> {
    if query.trim().chars().count() < MIN_QUERY_CHARS {
        return Err(AppError::invalid(format!(
            "search query must have at least {MIN_QUERY_CHARS} characters"
        )));
    }

    let needle = query.to_lowercase();
    tree_store::read(store, public_id, |root| {
        let mut matches = Vec::new();
        collect_matches(root, "", &needle, &mut matches);
        Ok(matches)
    })
}

fn collect_matches(node: &TreeNode, prefix: &str, needle: &str, out: &mut Vec<SearchMatch>) {
    for child in node.children() {
        if out.len() >= MAX_SEARCH_MATCHES {
            return;
        }
        let path = if prefix.is_empty() {
            child.name.clone()
        } else {
            format!("{prefix}/{}", child.name)
        };

        if child.is_folder() {
            collect_matches(child, &path, needle, out);
            continue;
        }

        for (index, line) in child.content().lines().enumerate() {
            if out.len() >= MAX_SEARCH_MATCHES {
                return;
            }
            if line.to_lowercase().contains(needle) {
                out.push(SearchMatch {
                    path: path.clone(),
                    line: index + 1,
                    content: line.trim().to_string(),
                });
            }
        }
    }
}
