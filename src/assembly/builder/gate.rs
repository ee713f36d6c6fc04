//! Execution root detection.

/// Returns true if the current build unit is the execution root.
///
/// Plain case-insensitive string comparison; paths are not canonicalized.
pub fn is_execution_root(current_dir: &str, root_dir: &str) -> bool {
    log::debug!("Root Folder: {}", root_dir);
    log::debug!("Current Folder: {}", current_dir);

    let result = current_dir.to_lowercase() == root_dir.to_lowercase();

    if result {
        log::debug!("This is the execution root.");
    } else {
        log::debug!("This is NOT the execution root.");
    }

    result
}
