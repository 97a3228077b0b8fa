//! UserStore trait definition
//!
//! This trait defines the interface for querying banned users from the
//! underlying user store. It allows the CLI to be decoupled from the specific
//! database driver implementation.

use async_trait::async_trait;

use crate::error::Result;
use crate::options::{FilterMode, ResolvedOptions};
use crate::record::UserRecord;

/// Parameters of a banned-users query.
///
/// Filters are AND-composed on top of the base predicate (a non-null ban
/// timestamp). Contradictory filter states are prevented upstream by the
/// option resolver; this layer does not re-validate combinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannedUsersQuery {
    /// Soft-deleted records: excluded by default
    pub trashed: FilterMode,
    /// Admin-role membership: included by default
    pub admin: FilterMode,
    /// Activation status: Only requires a non-null activation timestamp
    pub active: FilterMode,
    /// Column for ascending sort; must be in the column whitelist
    pub sort_by: String,
}

impl From<&ResolvedOptions> for BannedUsersQuery {
    fn from(options: &ResolvedOptions) -> Self {
        Self {
            trashed: options.trashed,
            admin: options.admin,
            active: options.active,
            sort_by: options.sort_by.clone(),
        }
    }
}

/// Trait for the user store backing the banned-users query.
///
/// This trait is implemented by the SQLite adapter and can be mocked for
/// testing the command orchestration.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch banned users matching the query, ordered ascending by the
    /// query's sort column. `banned_at` is always populated in the result.
    async fn banned_users(&self, query: &BannedUsersQuery) -> Result<Vec<UserRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RawOptions;

    #[test]
    fn test_query_from_resolved_options() {
        let resolved = RawOptions {
            trashed_only: true,
            no_admin: true,
            sort_by: "id".into(),
            ..Default::default()
        }
        .resolve()
        .unwrap();

        let query = BannedUsersQuery::from(&resolved);
        assert_eq!(query.trashed, FilterMode::Only);
        assert_eq!(query.admin, FilterMode::Exclude);
        assert_eq!(query.active, FilterMode::Include);
        assert_eq!(query.sort_by, "id");
    }
}
