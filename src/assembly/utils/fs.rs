//! File system utilities for archive production.
//!
//! Idempotent directory handling plus file placement that survives the
//! temporary directory living on a different filesystem than the output.

use std::{
    fs,
    io::{self},
    path::Path,
};
use walkdir::WalkDir;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub fn create_dir_all(path: &Path, erase: bool) -> io::Result<()> {
    if erase {
        remove_dir_all(path)?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
}

/// Removes the directory and its contents if it exists.
pub fn remove_dir_all(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e),
    }
}

/// Removes a file if it exists.
pub fn remove_file(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub fn copy_file(from: &Path, to: &Path) -> io::Result<()> {
    if !from.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{from:?} is not a file"),
        ));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)?;
    }
    fs::copy(from, to)?;
    Ok(())
}

/// Recursively copies a directory of regular files from one path to another.
fn copy_dir(from: &Path, to: &Path) -> io::Result<()> {
    for entry in WalkDir::new(from) {
        let entry = entry?;
        let rel_path = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir_all(dest_path)?;
        } else {
            fs::copy(entry.path(), dest_path)?;
        }
    }
    Ok(())
}

/// Moves a file or directory into place, replacing whatever is there.
///
/// Falls back to copy-and-delete when a rename is impossible.
pub fn move_into_place(from: &Path, to: &Path) -> io::Result<()> {
    if to.is_dir() {
        remove_dir_all(to)?;
    } else {
        remove_file(to)?;
    }

    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    if from.is_dir() {
        copy_dir(from, to)?;
        remove_dir_all(from)
    } else {
        copy_file(from, to)?;
        remove_file(from)
    }
}
