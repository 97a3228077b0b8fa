//! Filesystem pre-flight checks
//!
//! The destination path given to `get` usually does not exist yet, so the
//! writability check walks up the ancestor chain to the first component that
//! does exist and checks that one. The walk is iterative and bounded by the
//! path depth; relative paths bottom out at `.` instead of looping forever.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Walk up from `path` to the first component that exists on disk.
///
/// Terminates at `/`, `.` or `..` even when nothing on the path exists.
pub fn nearest_existing_ancestor(path: &Path) -> PathBuf {
    let mut current = path.to_path_buf();
    loop {
        if is_walk_root(&current) || current.exists() {
            return current;
        }
        current = parent_of(&current);
    }
}

/// Check whether `path`, or the first existing ancestor of it, is writable.
pub fn is_writable_recursive(path: &Path) -> bool {
    is_writable(&nearest_existing_ancestor(path))
}

fn is_walk_root(path: &Path) -> bool {
    matches!(path.to_str(), Some("/" | "." | ".."))
}

/// `Path::parent` yields an empty path for single-segment relative paths;
/// map that (and the absolute root) to `.` so the walk stays bounded.
fn parent_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Effective-access check. The readonly mode bit rules out the obvious
/// cases; a directory that passes it is additionally tested with a
/// short-lived file creation, since mode bits alone miss ownership and
/// ACLs (a root-owned `0o755` directory is not writable for other users).
/// This is a pre-flight validation aid, not a guarantee: the actual write
/// can still fail and does so fatally.
fn is_writable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if metadata.permissions().readonly() {
        return false;
    }
    if metadata.is_dir() {
        can_create_in(path)
    } else {
        std::fs::OpenOptions::new().write(true).open(path).is_ok()
    }
}

/// Try to create (and immediately remove) a uniquely named marker file.
fn can_create_in(dir: &Path) -> bool {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let marker = dir.join(format!(
        ".bu-writecheck-{}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&marker)
    {
        Ok(file) => {
            drop(file);
            let _ = std::fs::remove_file(&marker);
            true
        }
        Err(_) => false,
    }
}
