//! Input validation for the `get` command
//!
//! Runs before option resolution so the user gets every violation in one
//! pass: exclusive flag pairs, the sort-field whitelist, and writability of
//! the destination path. The resolver re-checks the exclusive pairs as the
//! authoritative guard; this layer exists for early, aggregated feedback.

use crate::error::{Error, Result};
use crate::fsutil;
use crate::options::RawOptions;
use crate::record::COLUMN_HEADERS;

/// Validate the raw command input, collecting every violation.
pub fn validate(input: &RawOptions) -> Result<()> {
    let mut violations = Vec::new();

    if input.no_admin && input.admin_only {
        violations.push(exclusive_pair_message("no-admin", "admin-only"));
    }
    if input.with_trashed && input.trashed_only {
        violations.push(exclusive_pair_message("with-trashed", "trashed-only"));
    }

    if input.sort_by.is_empty() || !COLUMN_HEADERS.contains(&input.sort_by.as_str()) {
        violations.push(format!(
            "The sort-by field must be one of: {}.",
            COLUMN_HEADERS.join(", ")
        ));
    }

    if let Some(path) = &input.save_to {
        if !fsutil::is_writable_recursive(path) {
            violations.push(format!(
                "No write permission on `{}` nor on its first existing parent directory `{}`.",
                path.display(),
                fsutil::nearest_existing_ancestor(path).display()
            ));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(violations))
    }
}

fn exclusive_pair_message(option: &str, without: &str) -> String {
    format!("The option `--{option}` is only allowed without the `--{without}` option.")
}
