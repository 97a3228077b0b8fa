//! Delimited file export with the overwrite guard
//!
//! Renders the result set as delimiter-separated text and writes it to disk.
//! The destination may name a file or a directory; a directory (or anything
//! that does not look like a filename) gets the default filename appended.
//! An existing file is never silently overwritten: the caller has to retry
//! with `force_override` after confirming with the user.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::record::{COLUMN_HEADERS, UserRecord};

/// Fallback output filename when the destination names a directory and the
/// caller did not supply one.
pub const DEFAULT_OUTPUT_FILE: &str = "no-name.txt";

/// Resolve the destination into the final file path.
///
/// An existing file is used as-is and an existing directory gets the default
/// filename appended. A non-existent path counts as a file when its last
/// segment has a dot-extension with a non-empty stem (so `out/report.csv` is
/// a file but `out` and `.hidden` are directories). The dot heuristic can
/// misclassify directories with dots in their names; kept as-is for
/// compatibility with the existing behavior.
pub fn final_filepath(path: &Path, default_filename: &str) -> PathBuf {
    let mut is_file = path.is_file();

    if !path.exists() {
        is_file = looks_like_filename(path);
    }

    if is_file {
        return path.to_path_buf();
    }

    path.join(default_filename)
}

fn looks_like_filename(path: &Path) -> bool {
    let Some(basename) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    let mut parts = basename.split('.');
    let stem = parts.next().unwrap_or_default();
    parts.next().is_some() && !stem.is_empty()
}

/// Encode the records as delimited text: optional header line, one record
/// per line, fields joined by `separator` in the fixed column order.
pub fn render_delimited(records: &[UserRecord], with_headers: bool, separator: &str) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);

    if with_headers {
        lines.push(COLUMN_HEADERS.join(separator));
    }
    for record in records {
        lines.push(record.row().join(separator));
    }

    if lines.is_empty() {
        return String::new();
    }
    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Write the records to `path`, creating missing parent directories.
///
/// Fails with [`Error::OverwriteConflict`] when the resolved file already
/// exists and `force_override` is false; nothing is written in that case.
/// Returns the final resolved path on success.
pub fn write_file(
    path: &Path,
    records: &[UserRecord],
    with_headers: bool,
    separator: &str,
    default_filename: &str,
    force_override: bool,
) -> Result<PathBuf> {
    let filepath = final_filepath(path, default_filename);

    if filepath.exists() && !force_override {
        return Err(Error::OverwriteConflict(filepath));
    }

    if let Some(parent) = filepath.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&filepath, render_delimited(records, with_headers, separator))?;
    debug!(path = %filepath.display(), records = records.len(), "content written");

    Ok(filepath)
}
