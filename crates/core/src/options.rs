//! Option resolution
//!
//! Maps the raw boolean flags of the `get` command onto three-valued query
//! filters. Each axis (trashed, admin, active) resolves independently; the
//! two exclusive flag pairs are rejected before any resolution happens.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Three-valued query filter, applied independently per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Omit matching records
    Exclude,
    /// Return matching records alongside the rest
    Include,
    /// Restrict the result to matching records
    Only,
}

/// Raw command input, one field per flag or argument.
///
/// Built once from the parsed CLI arguments, consumed by `validate` and
/// `resolve`, and discarded afterwards.
#[derive(Debug, Clone)]
pub struct RawOptions {
    pub active_users_only: bool,
    pub with_trashed: bool,
    pub trashed_only: bool,
    pub no_admin: bool,
    pub admin_only: bool,
    pub with_headers: bool,
    pub sort_by: String,
    pub save_to: Option<PathBuf>,
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            active_users_only: false,
            with_trashed: false,
            trashed_only: false,
            no_admin: false,
            admin_only: false,
            with_headers: false,
            sort_by: "email".to_string(),
            save_to: None,
        }
    }
}

/// Filter settings after resolution. Built once per invocation, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub trashed: FilterMode,
    pub admin: FilterMode,
    pub active: FilterMode,
    pub sort_by: String,
}

impl RawOptions {
    /// Resolve the raw flags into per-axis filter settings.
    ///
    /// Pure function of the input: no side effects, identical input always
    /// yields identical output. Fails when both members of an exclusive pair
    /// are set.
    pub fn resolve(&self) -> Result<ResolvedOptions> {
        if self.with_trashed && self.trashed_only {
            return Err(Error::IncompatibleOptions {
                first: "with-trashed",
                second: "trashed-only",
            });
        }
        if self.no_admin && self.admin_only {
            return Err(Error::IncompatibleOptions {
                first: "no-admin",
                second: "admin-only",
            });
        }

        // Trashed axis: excluded by default
        let mut trashed = FilterMode::Exclude;
        if self.with_trashed {
            trashed = FilterMode::Include;
        }
        if self.trashed_only {
            trashed = FilterMode::Only;
        }

        // Admin axis: included by default
        let mut admin = FilterMode::Include;
        if self.no_admin {
            admin = FilterMode::Exclude;
        }
        if self.admin_only {
            admin = FilterMode::Only;
        }

        // Active axis: included by default
        let active = if self.active_users_only {
            FilterMode::Only
        } else {
            FilterMode::Include
        };

        Ok(ResolvedOptions {
            trashed,
            admin,
            active,
            sort_by: self.sort_by.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let resolved = RawOptions::default().resolve().unwrap();
        assert_eq!(resolved.trashed, FilterMode::Exclude);
        assert_eq!(resolved.admin, FilterMode::Include);
        assert_eq!(resolved.active, FilterMode::Include);
        assert_eq!(resolved.sort_by, "email");
    }

    #[test]
    fn test_resolve_is_pure() {
        let input = RawOptions {
            with_trashed: true,
            no_admin: true,
            sort_by: "id".into(),
            ..Default::default()
        };
        assert_eq!(input.resolve().unwrap(), input.resolve().unwrap());
    }

    #[test]
    fn test_with_trashed_includes_trashed_axis_only() {
        let resolved = RawOptions {
            with_trashed: true,
            ..Default::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(resolved.trashed, FilterMode::Include);
        assert_eq!(resolved.admin, FilterMode::Include);
        assert_eq!(resolved.active, FilterMode::Include);
    }

    #[test]
    fn test_trashed_only_restricts_trashed_axis() {
        let resolved = RawOptions {
            trashed_only: true,
            ..Default::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(resolved.trashed, FilterMode::Only);
        assert_eq!(resolved.admin, FilterMode::Include);
    }

    #[test]
    fn test_no_admin_excludes_admin_axis_only() {
        let resolved = RawOptions {
            no_admin: true,
            ..Default::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(resolved.admin, FilterMode::Exclude);
        assert_eq!(resolved.trashed, FilterMode::Exclude);
        assert_eq!(resolved.active, FilterMode::Include);
    }

    #[test]
    fn test_admin_only_restricts_admin_axis() {
        let resolved = RawOptions {
            admin_only: true,
            ..Default::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(resolved.admin, FilterMode::Only);
    }

    #[test]
    fn test_active_users_only_restricts_active_axis() {
        let resolved = RawOptions {
            active_users_only: true,
            ..Default::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(resolved.active, FilterMode::Only);
        assert_eq!(resolved.trashed, FilterMode::Exclude);
        assert_eq!(resolved.admin, FilterMode::Include);
    }

    #[test]
    fn test_resolve_rejects_trashed_pair() {
        let err = RawOptions {
            with_trashed: true,
            trashed_only: true,
            ..Default::default()
        }
        .resolve()
        .unwrap_err();
        match err {
            Error::IncompatibleOptions { first, second } => {
                assert_eq!(first, "with-trashed");
                assert_eq!(second, "trashed-only");
            }
            other => panic!("expected IncompatibleOptions, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_rejects_admin_pair() {
        let err = RawOptions {
            no_admin: true,
            admin_only: true,
            ..Default::default()
        }
        .resolve()
        .unwrap_err();
        match err {
            Error::IncompatibleOptions { first, second } => {
                assert_eq!(first, "no-admin");
                assert_eq!(second, "admin-only");
            }
            other => panic!("expected IncompatibleOptions, got {other:?}"),
        }
    }

    #[test]
    fn test_sort_by_passes_through() {
        let resolved = RawOptions {
            sort_by: "banned_at".into(),
            ..Default::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(resolved.sort_by, "banned_at");
    }
}
