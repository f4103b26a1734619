//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// migcheck - structural checks and remote apply for SQL migrations
#[derive(Parser, Debug)]
#[command(name = "mc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check migrations against the structural facts they must contain
    Check(CheckArgs),

    /// Submit a migration file to the database management API
    Apply(ApplyArgs),

    /// Split a migration into statements and print them
    Statements(StatementsArgs),

    /// List configured check suites
    Ls(LsArgs),

    /// Create a starter migcheck.yml and migrations directory
    Init(InitArgs),
}

/// Output formats shared by reporting commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON document
    Json,
}

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Suites to run (default: all configured suites)
    pub suites: Vec<String>,

    /// Check this migration file instead of the suite's own file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Require CREATE TABLE for this table (repeatable)
    #[arg(long = "table", value_name = "TABLE")]
    pub tables: Vec<String>,

    /// Also require row level security on every --table
    #[arg(long, requires = "tables")]
    pub rls: bool,

    /// Require at least one CREATE POLICY
    #[arg(long)]
    pub policies: bool,

    /// Require CREATE EXTENSION for this extension (repeatable)
    #[arg(long = "extension", value_name = "NAME")]
    pub extensions: Vec<String>,

    /// Require this named constraint (repeatable)
    #[arg(long = "constraint", value_name = "NAME")]
    pub constraints: Vec<String>,

    /// Require this literal text (repeatable)
    #[arg(long = "contains", value_name = "TEXT")]
    pub contains: Vec<String>,

    /// Require a match for this case-insensitive regex (repeatable)
    #[arg(long = "pattern", value_name = "REGEX")]
    pub patterns: Vec<String>,

    /// Schema for facts given as flags (default: the suite's schema, then
    /// the config's default_schema, then "public")
    #[arg(long)]
    pub schema: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Migration file to submit
    pub file: PathBuf,

    /// Override the configured project reference
    #[arg(long)]
    pub project_ref: Option<String>,

    /// Print the SQL instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Run this suite against the file first and refuse to apply on failure
    #[arg(long, value_name = "SUITE")]
    pub check: Option<String>,
}

/// Arguments for the statements command
#[derive(Args, Debug)]
pub struct StatementsArgs {
    /// Migration file to split
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialise
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Project name (default: directory name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Migrations directory, relative to the project
    #[arg(long, default_value = "migrations")]
    pub migrations_dir: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
