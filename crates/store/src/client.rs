//! SQLite user store
//!
//! Wraps an sqlx connection pool and implements the UserStore trait from
//! bu-core. Filters are composed with a QueryBuilder on top of the base
//! predicate (non-null `banned_at`); the sort column is resolved against the
//! column whitelist before it is interpolated into the ORDER BY clause.

use std::path::Path;

use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::debug;

use bu_core::{
    BannedUsersQuery, COLUMN_HEADERS, Error, FilterMode, Result, UserRecord, UserStore,
};

use crate::schema::ADMIN_ROLE;
use crate::store_err;

/// SQLite-backed user store
#[derive(Debug)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Open an existing database file.
    pub async fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Store(format!(
                "database file `{}` does not exist",
                path.display()
            )));
        }

        let pool = SqlitePool::connect(&format!("sqlite:{}", path.display()))
            .await
            .map_err(store_err)?;

        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&pool)
            .await
            .map_err(store_err)?;

        Ok(Self { pool })
    }

    /// Open an in-memory database (testing and schema experiments).
    ///
    /// Capped at one connection: every fresh in-memory connection starts
    /// with an empty database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(store_err)?;

        Ok(Self { pool })
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn banned_users(&self, query: &BannedUsersQuery) -> Result<Vec<UserRecord>> {
        let sort_column = sort_column(&query.sort_by)?;

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, email, banned_at, activated_at, deleted_at \
             FROM users WHERE banned_at IS NOT NULL",
        );

        match query.trashed {
            FilterMode::Exclude => {
                builder.push(" AND deleted_at IS NULL");
            }
            FilterMode::Include => {}
            FilterMode::Only => {
                builder.push(" AND deleted_at IS NOT NULL");
            }
        }

        match query.admin {
            FilterMode::Exclude => {
                builder.push(" AND NOT ");
                push_admin_membership(&mut builder);
            }
            FilterMode::Include => {}
            FilterMode::Only => {
                builder.push(" AND ");
                push_admin_membership(&mut builder);
            }
        }

        if query.active == FilterMode::Only {
            builder.push(" AND activated_at IS NOT NULL");
        }

        builder.push(" ORDER BY ");
        builder.push(sort_column);
        builder.push(" ASC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;
        debug!(total = rows.len(), sort_column, "banned users fetched");

        rows.iter().map(row_to_record).collect()
    }
}

/// Resolve the sort field against the column whitelist.
///
/// Returns the whitelisted static string, so only known identifiers ever
/// reach the ORDER BY clause.
fn sort_column(field: &str) -> Result<&'static str> {
    COLUMN_HEADERS
        .iter()
        .find(|column| **column == field)
        .copied()
        .ok_or_else(|| Error::UnknownSortField {
            field: field.to_string(),
        })
}

fn push_admin_membership(builder: &mut QueryBuilder<'_, Sqlite>) {
    builder.push(
        "EXISTS (SELECT 1 FROM roles_users ru \
         JOIN roles r ON r.id = ru.role_id \
         WHERE ru.user_id = users.id AND r.name = ",
    );
    builder.push_bind(ADMIN_ROLE);
    builder.push(")");
}

fn row_to_record(row: &SqliteRow) -> Result<UserRecord> {
    Ok(UserRecord {
        id: row.try_get("id").map_err(store_err)?,
        email: row.try_get("email").map_err(store_err)?,
        banned_at: parse_timestamp(row.try_get("banned_at").map_err(store_err)?)?,
        activated_at: parse_timestamp(row.try_get("activated_at").map_err(store_err)?)?,
        deleted_at: parse_timestamp(row.try_get("deleted_at").map_err(store_err)?)?,
    })
}

fn parse_timestamp(value: Option<String>) -> Result<Option<Timestamp>> {
    value
        .map(|text| {
            text.parse::<Timestamp>()
                .map_err(|err| Error::Store(format!("bad timestamp `{text}`: {err}")))
        })
        .transpose()
}
