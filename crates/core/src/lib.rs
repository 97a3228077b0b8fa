//! bu-core: Core library for the bu banned-users CLI
//!
//! This crate provides the core functionality for the bu CLI, including:
//! - The three-valued query filter model and option resolution
//! - Input validation (flag exclusivity, sort-field whitelist, writable paths)
//! - Delimited export with the overwrite guard
//! - The UserStore trait for banned-user queries
//! - Configuration management
//!
//! This crate is designed to be independent of any specific database driver,
//! allowing for easy testing and potential future support for other backends.

pub mod config;
pub mod error;
pub mod export;
pub mod fsutil;
pub mod options;
pub mod record;
pub mod traits;
pub mod validate;

pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use export::{DEFAULT_OUTPUT_FILE, final_filepath, render_delimited, write_file};
pub use fsutil::{is_writable_recursive, nearest_existing_ancestor};
pub use options::{FilterMode, RawOptions, ResolvedOptions};
pub use record::{COLUMN_HEADERS, UserRecord};
pub use traits::{BannedUsersQuery, UserStore};
pub use validate::validate;
