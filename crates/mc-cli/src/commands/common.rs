//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use mc_core::{read_migration, Config, Project};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) u8);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; the command has already printed its report.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the project, failing if no config can be found
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    match &global.config {
        Some(path) => Project::load_with_config(&global.project_dir, path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Project::load(&global.project_dir).context("Failed to load project"),
    }
}

/// Load the project if a config exists.
///
/// An explicit `--config` that does not exist is still an error.
pub(crate) fn try_load_project(global: &GlobalArgs) -> Result<Option<Project>> {
    if global.config.is_none() && Config::find_in_dir(&global.project_dir).is_none() {
        log::debug!(
            "No config in {}; continuing without one",
            global.project_dir.display()
        );
        return Ok(None);
    }
    load_project(global).map(Some)
}

/// Read a migration named on the command line
pub(crate) fn read_migration_arg(path: &Path) -> Result<String> {
    read_migration(path).with_context(|| format!("Cannot read migration {}", path.display()))
}

/// Print a path relative to the current directory when possible
pub(crate) fn display_path(path: &Path) -> String {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    path.strip_prefix(&cwd)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Print verbose output if enabled
pub(crate) fn verbose(global: &GlobalArgs, msg: &str) {
    if global.verbose {
        eprintln!("[verbose] {}", msg);
    }
}
