//! User record projection
//!
//! A read-only view of a user row as returned by the store. The tool never
//! mutates user data; it only filters, sorts and renders it.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// The fixed column set: headers, rendered column order and the sort-field
/// whitelist all derive from this list.
pub const COLUMN_HEADERS: [&str; 3] = ["id", "email", "banned_at"];

/// A banned user as projected from the store.
///
/// `banned_at` is always populated in query results (the base predicate is
/// a non-null ban timestamp); the other timestamps depend on the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banned_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

impl UserRecord {
    /// Render the record as output cells, in `COLUMN_HEADERS` order.
    /// Null timestamps become empty cells.
    pub fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.email.clone(),
            self.banned_at.map(|t| t.to_string()).unwrap_or_default(),
        ]
    }
}
