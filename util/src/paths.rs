use crate::config;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Global storage root (absolute), from `config::storage_root()`.
/// If relative in env, resolve against current_dir().
pub fn storage_root() -> PathBuf {
    let p = PathBuf::from(config::storage_root());
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// A student's upload folder: {STORAGE_ROOT}/submissions/student_{student_id}
pub fn student_submission_dir(student_id: i64) -> PathBuf {
    storage_root()
        .join("submissions")
        .join(format!("student_{student_id}"))
}

/// Keep only characters that are safe in a single path segment.
pub fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Writes an uploaded file under the student's folder and returns the path
/// relative to the storage root, which is what gets persisted.
pub fn store_submission_file(
    student_id: i64,
    original_name: &str,
    bytes: &[u8],
) -> io::Result<String> {
    let dir = ensure_dir(student_submission_dir(student_id))?;
    let stored_name = format!("{}_{}", uuid::Uuid::new_v4(), sanitize_filename(original_name));
    fs::write(dir.join(&stored_name), bytes)?;
    Ok(format!("submissions/student_{student_id}/{stored_name}"))
}
