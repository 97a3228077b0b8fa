//! get command - Query banned users and export them
//!
//! Runs the full pipeline: validate input, resolve options, query the store,
//! print the console table and optionally save the result to a file. The
//! file write goes through the overwrite guard: an existing target makes the
//! first attempt fail, the user is asked for confirmation, and only a
//! confirmed retry passes `force_override`.

use std::path::{Path, PathBuf};

use clap::Args;
use clap::builder::TypedValueParser as _;
use dialoguer::Confirm;
use serde::Serialize;
use tracing::debug;

use bu_core::{
    BannedUsersQuery, ConfigManager, Error, RawOptions, ResolvedOptions, UserRecord, UserStore,
    export,
};
use bu_store::SqliteUserStore;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, table};

/// Get banned users
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Filepath in which to store the output; a directory gets the default
    /// filename appended
    #[arg(value_parser = clap::builder::OsStringValueParser::new().map(PathBuf::from))]
    pub save_to: Option<PathBuf>,

    /// The field to use when sorting the output
    #[arg(default_value = "email")]
    pub sort_by: String,

    /// Only show banned users that have been previously activated
    #[arg(long)]
    pub active_users_only: bool,

    /// Show banned users including the deleted ones
    #[arg(long)]
    pub with_trashed: bool,

    /// Only show banned users that have been deleted
    #[arg(long)]
    pub trashed_only: bool,

    /// Show the banned users excluding the admin users
    #[arg(long)]
    pub no_admin: bool,

    /// Only show the banned users that are admin
    #[arg(long)]
    pub admin_only: bool,

    /// Print and save column headers
    #[arg(long)]
    pub with_headers: bool,

    /// Field separator for the file output (defaults from configuration)
    #[arg(long)]
    pub separator: Option<String>,

    /// Overwrite an existing output file without asking
    #[arg(short, long)]
    pub force: bool,

    /// Path to the SQLite user database (overrides the configured path)
    #[arg(long)]
    pub database: Option<PathBuf>,
}

/// Output structure for the get command (JSON format)
#[derive(Debug, Serialize)]
struct GetOutput<'a> {
    users: &'a [UserRecord],
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_to: Option<String>,
}

/// Execute the get command
pub async fn execute(args: GetArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    // Bad invocations must abort before the configuration is read or the
    // store is opened.
    let options = match prepare(&args) {
        Ok(options) => options,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    let config = match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let database = args
        .database
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.database.path));
    let store = match SqliteUserStore::open(&database).await {
        Ok(store) => store,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    let separator = args
        .separator
        .clone()
        .unwrap_or_else(|| config.output.separator.clone());

    let result = run(
        &args,
        &options,
        &store,
        &formatter,
        &separator,
        &config.output.filename,
        ask_overwrite,
    )
    .await;

    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from_error(&e)
        }
    }
}

/// Validate the raw input and resolve it into filter settings. Pure; runs
/// before any query or file I/O.
fn prepare(args: &GetArgs) -> bu_core::Result<ResolvedOptions> {
    let input = raw_options(args);
    bu_core::validate(&input)?;
    let options = input.resolve()?;
    debug!(?options, "options resolved");
    Ok(options)
}

/// The output destination; an empty path counts as no destination.
fn save_destination(args: &GetArgs) -> Option<&Path> {
    args.save_to
        .as_deref()
        .filter(|path| !path.as_os_str().is_empty())
}

/// Run the pipeline against any store, with an injectable confirmation step.
async fn run<F>(
    args: &GetArgs,
    options: &ResolvedOptions,
    store: &dyn UserStore,
    formatter: &Formatter,
    separator: &str,
    default_filename: &str,
    mut confirm_overwrite: F,
) -> bu_core::Result<()>
where
    F: FnMut(&Path) -> bool,
{
    let query = BannedUsersQuery::from(options);
    let users = store.banned_users(&query).await?;
    debug!(total = users.len(), "banned users fetched");

    if !formatter.is_json() {
        formatter.println(&table::render_table(&users, args.with_headers).to_string());
    }

    let mut saved_to = None;
    if let Some(path) = save_destination(args) {
        saved_to = save(
            path,
            &users,
            args,
            formatter,
            separator,
            default_filename,
            &mut confirm_overwrite,
        )?;
    }

    if formatter.is_json() {
        formatter.json(&GetOutput {
            users: &users,
            total: users.len(),
            saved_to: saved_to.map(|p| p.display().to_string()),
        });
    }

    Ok(())
}

/// Write the result set to `path`, asking for confirmation before
/// overwriting an existing file. Returns the final path, or None when the
/// user declined the overwrite (not an error).
fn save<F>(
    path: &Path,
    users: &[UserRecord],
    args: &GetArgs,
    formatter: &Formatter,
    separator: &str,
    default_filename: &str,
    confirm_overwrite: &mut F,
) -> bu_core::Result<Option<PathBuf>>
where
    F: FnMut(&Path) -> bool,
{
    let attempt = export::write_file(
        path,
        users,
        args.with_headers,
        separator,
        default_filename,
        args.force,
    );

    match attempt {
        Ok(filepath) => {
            formatter.success(&format!("Content saved to `{}`.", filepath.display()));
            Ok(Some(filepath))
        }
        Err(Error::OverwriteConflict(filepath)) => {
            if confirm_overwrite(&filepath) {
                let filepath = export::write_file(
                    path,
                    users,
                    args.with_headers,
                    separator,
                    default_filename,
                    true,
                )?;
                formatter.success(&format!("Content saved to `{}`.", filepath.display()));
                Ok(Some(filepath))
            } else {
                formatter.warning("File not overridden. Content not saved to file.");
                Ok(None)
            }
        }
        Err(e) => Err(e),
    }
}

fn raw_options(args: &GetArgs) -> RawOptions {
    RawOptions {
        active_users_only: args.active_users_only,
        with_trashed: args.with_trashed,
        trashed_only: args.trashed_only,
        no_admin: args.no_admin,
        admin_only: args.admin_only,
        with_headers: args.with_headers,
        sort_by: args.sort_by.clone(),
        save_to: save_destination(args).map(Path::to_path_buf),
    }
}

fn ask_overwrite(filepath: &Path) -> bool {
    Confirm::new()
        .with_prompt(format!(
            "The file `{}` already exists and will be overridden. Do you want to continue?",
            filepath.display()
        ))
        .default(false)
        .interact()
        .unwrap_or(false)
}
