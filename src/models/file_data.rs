use serde::{Deserialize, Serialize};

/// Entry of the legacy flat file list. `name` carries the full slash path;
/// folders end with `/` or set `is_folder`. Old blobs may hold a `null` name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_folder: bool,
}

impl FileData {
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Some(path.into()),
            content: Some(content.into()),
            is_folder: false,
        }
    }

    pub fn folder(path: impl Into<String>) -> Self {
        let mut name = path.into();
        if !name.ends_with('/') {
            name.push('/');
        }
        Self {
            name: Some(name),
            content: None,
            is_folder: true,
        }
    }
}
