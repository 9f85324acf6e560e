use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::data::SessionStore;
use crate::error::AppError;
use crate::models::tree_node::{NodeKind, TreeNode};
use crate::models::upload::UploadedFile;
use crate::services::{tree_service, tree_store};
use crate::tree_path::{join_path, split_path};

type ArchiveWriter = ZipWriter<Cursor<Vec<u8>>>;

/// Zips the whole session tree: one `dir/` entry per folder and one entry per
/// file, in pre-order.
pub fn download_archive<S: SessionStore + ?Sized>(
    store: &S,
    public_id: &str,
) -> Result<Vec<u8>, AppError> {
    tree_store::read(store, public_id, |root| {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        add_entries(&mut zip, root, "", options)?;
        Ok(zip.finish()?.into_inner())
    })
}

fn add_entries(
    zip: &mut ArchiveWriter,
    node: &TreeNode,
    prefix: &str,
    options: SimpleFileOptions,
) -> Result<(), AppError> {
    for child in node.children() {
        let path = format!("{prefix}{}", child.name);
        if child.is_folder() {
            let dir = format!("{path}/");
            zip.add_directory(dir.as_str(), options)?;
            add_entries(zip, child, &dir, options)?;
        } else {
            zip.start_file(path.as_str(), options)?;
            zip.write_all(child.content().as_bytes())?;
        }
    }
    Ok(())
}

/// Stores uploaded bytes as a text file under `parent_path`, replacing the
/// content of an existing file with the same name. Returns the file's path.
pub fn upload_file<S: SessionStore + ?Sized>(
    store: &S,
    public_id: &str,
    parent_path: &str,
    filename: &str,
    bytes: &[u8],
) -> Result<String, AppError> {
    if filename.trim().is_empty() {
        return Err(AppError::invalid("upload has no filename"));
    }
    let mut segments = split_path(parent_path);
    segments.extend(split_path(filename));
    let path = join_path(&segments);
    let content = String::from_utf8_lossy(bytes);

    match tree_service::create_node(store, public_id, &path, NodeKind::File, Some(&*content)) {
        Err(err) if err.is_conflict() => {
            tree_service::update_file_content(store, public_id, &path, &*content)?;
            log::debug!("upload replaced {path} in session {public_id}");
        }
        result => result?,
    }
    Ok(path)
}

/// Uploads each file in order, stopping at the first failure.
pub fn upload_files<S: SessionStore + ?Sized>(
    store: &S,
    public_id: &str,
    parent_path: &str,
    files: &[UploadedFile],
) -> Result<Vec<String>, AppError> {
    files
        .iter()
        .map(|file| upload_file(store, public_id, parent_path, &file.filename, &file.bytes))
        .collect()
}
