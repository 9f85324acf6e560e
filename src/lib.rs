//! Virtual file-tree engine for collaborative coding sessions.
//!
//! Each session owns one JSON blob holding a tree of folders and files. Every
//! operation loads that blob, migrates it if it is still in the legacy flat-list
//! form, applies one path-addressed change or read, and writes the whole tree
//! back.

pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod tree_path;

pub use config::EngineConfig;
pub use data::SessionStore;
pub use error::{AppError, ErrorKind};
pub use models::file_data::FileData;
pub use models::search::SearchMatch;
pub use models::session::CodingSession;
pub use models::tree_node::{NodeKind, TreeNode};
pub use models::upload::UploadedFile;
pub use services::export_service::{download_archive, upload_file, upload_files};
pub use services::search_service::search_project;
pub use services::session_service::{create_session, list_files};
pub use services::tree_service::{
    create_node, delete_node, duplicate_node, get_tree, move_node, rename_node,
    update_file_content,
};
pub use state::AppState;

/// Installs `env_logger`, honouring `RUST_LOG` and defaulting to `info`.
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
