//! Owner-scoped path layout: `<root>/<owner_id>/<file_name>`.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::{sanitize_filename, sanitize_owner_id};
use crate::media::DownloadTarget;

/// Directory holding one owner's files.
pub fn owner_dir(root: &Path, owner_id: &str) -> Result<PathBuf> {
    Ok(root.join(sanitize_owner_id(owner_id)?))
}

/// Full destination of a target under `root`.
pub fn target_path(root: &Path, target: &DownloadTarget) -> Result<PathBuf> {
    let dir = owner_dir(root, &target.owner_id)?;
    Ok(dir.join(sanitize_filename(&target.file_name)?))
}
