//! Schema bootstrap
//!
//! The tool normally reads an existing application database, but tests and
//! fresh installations need the tables in place. Timestamps are stored as
//! RFC 3339 text; a null `deleted_at` marks a live record (soft deletes).

use sqlx::SqlitePool;

use bu_core::Result;

use crate::store_err;

/// Name of the admin role in the roles table.
pub const ADMIN_ROLE: &str = "admin";

/// Create the users/roles tables if they don't exist.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            banned_at TEXT,
            activated_at TEXT,
            deleted_at TEXT
        )",
    )
    .execute(pool)
    .await
    .map_err(store_err)?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS roles (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )",
    )
    .execute(pool)
    .await
    .map_err(store_err)?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS roles_users (
            role_id INTEGER NOT NULL REFERENCES roles (id),
            user_id INTEGER NOT NULL REFERENCES users (id),
            PRIMARY KEY (role_id, user_id)
        )",
    )
    .execute(pool)
    .await
    .map_err(store_err)?;

    Ok(())
}
