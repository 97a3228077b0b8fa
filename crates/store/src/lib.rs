//! bu-store: SQLite adapter for the bu CLI
//!
//! This crate provides the implementation of the UserStore trait using
//! sqlx on SQLite. It is the only crate that directly depends on a
//! database driver.

pub mod client;
pub mod schema;

pub use client::SqliteUserStore;
pub use schema::{ADMIN_ROLE, ensure_schema};

/// Map a driver error into the store error variant of the core taxonomy.
pub(crate) fn store_err(err: sqlx::Error) -> bu_core::Error {
    bu_core::Error::Store(err.to_string())
}
