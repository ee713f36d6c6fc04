//! Artifact checksum calculation.
//!
//! SHA256 checksums for attached artifacts, supporting both single files
//! and directory trees (`dir` format outputs).

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Calculates SHA256 checksum of a file or directory.
///
/// For files: Reads in 8KB chunks and computes the SHA-256 hash.
/// For directories: Recursively hashes all files in deterministic order.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If path cannot be read or is neither file nor directory
pub fn calculate_sha256(path: &Path) -> io::Result<String> {
    let metadata = std::fs::metadata(path)?;

    if metadata.is_file() {
        let mut hasher = Sha256::new();
        hash_file(path, &mut hasher)?;
        Ok(format!("{:x}", hasher.finalize()))
    } else if metadata.is_dir() {
        calculate_directory_sha256(path)
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Path is neither file nor directory: {}", path.display()),
        ))
    }
}

fn hash_file(file_path: &Path, hasher: &mut Sha256) -> io::Result<()> {
    let mut file = File::open(file_path)?;
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(())
}

/// Calculates SHA256 checksum of a directory tree.
///
/// Each file contributes its relative path followed by its content, in
/// lexicographic path order.
fn calculate_directory_sha256(dir_path: &Path) -> io::Result<String> {
    let mut entries: Vec<_> = walkdir::WalkDir::new(dir_path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .collect();

    // Sort by path for deterministic ordering
    entries.sort_by_key(|e| e.path().to_path_buf());

    let mut hasher = Sha256::new();

    for entry in entries {
        if let Ok(rel_path) = entry.path().strip_prefix(dir_path) {
            hasher.update(rel_path.to_string_lossy().as_bytes());
        }
        hash_file(entry.path(), &mut hasher)?;
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn hashes_file_content() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("hello.txt");
        std::fs::write(&file, "hello").unwrap();

        assert_eq!(
            calculate_sha256(&file).unwrap(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn directory_hash_depends_on_names_and_content() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        for dir in [&a, &b] {
            std::fs::create_dir_all(dir.join("src")).unwrap();
            std::fs::write(dir.join("src/lib.rs"), "pub fn f() {}").unwrap();
        }
        assert_eq!(calculate_sha256(&a).unwrap(), calculate_sha256(&b).unwrap());

        std::fs::rename(b.join("src/lib.rs"), b.join("src/main.rs")).unwrap();
        assert_ne!(calculate_sha256(&a).unwrap(), calculate_sha256(&b).unwrap());
    }

    #[test]
    fn missing_path_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(calculate_sha256(&tmp.path().join("nope")).is_err());
    }
}
