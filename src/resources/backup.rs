//! Rename-to-`.bkp` backups taken before a destructive overwrite.
//!
//! A path `P` is backed up by renaming it to `P.bkp`; an older `P.bkp`,
//! file or directory, is removed first so exactly one backup generation is
//! kept.
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ResourceError;

use super::helpers::fs::ensure_parent_dir;

/// Suffix appended to backed-up paths.
pub const BACKUP_SUFFIX: &str = ".bkp";

/// `path` with [`BACKUP_SUFFIX`] appended (a trailing `/` is ignored).
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.components().collect::<PathBuf>().into_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

fn io_error(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> ResourceError {
    let path = path.to_path_buf();
    move |source| ResourceError::Io {
        action,
        path,
        source,
    }
}

fn remove_previous(bkp: &Path) -> Result<(), ResourceError> {
    match fs::symlink_metadata(bkp) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(bkp).map_err(io_error("removing old backup", bkp))
        }
        Ok(_) => fs::remove_file(bkp).map_err(io_error("removing old backup", bkp)),
        Err(_) => Ok(()),
    }
}

fn rename_to_backup(path: &Path) -> Result<PathBuf, ResourceError> {
    let bkp = backup_path(path);
    remove_previous(&bkp)?;
    fs::rename(path, &bkp).map_err(io_error("backing up", path))?;
    Ok(bkp)
}

/// Back up `path` if anything exists there.
///
/// Returns the backup location when a backup was taken.
///
/// # Errors
///
/// Returns [`ResourceError::Io`] if the old backup cannot be removed or the
/// rename fails.
pub fn backup_file(path: &Path) -> Result<Option<PathBuf>, ResourceError> {
    if fs::symlink_metadata(path).is_err() {
        return Ok(None);
    }
    rename_to_backup(path).map(Some)
}

/// Back up `path` only if it is a directory.
///
/// # Errors
///
/// Returns [`ResourceError::Io`] if the old backup cannot be removed or the
/// rename fails.
pub fn backup_dir(path: &Path) -> Result<Option<PathBuf>, ResourceError> {
    if !path.is_dir() {
        return Ok(None);
    }
    rename_to_backup(path).map(Some)
}

/// Back up `path`, then write `contents` to it, creating parent directories.
///
/// # Errors
///
/// Returns [`ResourceError::Io`] if the backup, the parent directory or the
/// write fails.
pub fn write_with_backup(path: &Path, contents: &[u8]) -> Result<Option<PathBuf>, ResourceError> {
    let backup = backup_file(path)?;
    ensure_parent_dir(path).map_err(|e| ResourceError::Io {
        action: "creating parent of",
        path: path.to_path_buf(),
        source: std::io::Error::other(format!("{e:#}")),
    })?;
    fs::write(path, contents).map_err(io_error("writing", path))?;
    Ok(backup)
}
