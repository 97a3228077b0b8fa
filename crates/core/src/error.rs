//! Error types for bu-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use std::path::PathBuf;

use thiserror::Error;

use crate::record::COLUMN_HEADERS;

/// Result type alias for bu-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bu-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// One or more input rules failed; collects every violation
    #[error("Invalid input:\n  {}", .0.join("\n  "))]
    Validation(Vec<String>),

    /// Two mutually exclusive flags were both set
    #[error(
        "The passed options `--{first}` and `--{second}` are incompatible. Please only pass one of them."
    )]
    IncompatibleOptions {
        first: &'static str,
        second: &'static str,
    },

    /// Sort field not in the column whitelist (store-level guard)
    #[error("Unknown sort field `{field}`. Must be one of: {}.", COLUMN_HEADERS.join(", "))]
    UnknownSortField { field: String },

    /// Target file exists and overriding was not requested
    #[error("Cannot override existing file `{}`.", .0.display())]
    OverwriteConflict(PathBuf),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// User store error
    #[error("Store error: {0}")]
    Store(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_)
            | Error::IncompatibleOptions { .. }
            | Error::UnknownSortField { .. }
            | Error::Config(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_) => 2, // UsageError
            Error::Store(_) => 3,              // StoreError
            Error::OverwriteConflict(_) => 6,  // Conflict
            Error::Io(_) => 1,                 // GeneralError
        }
    }
}
