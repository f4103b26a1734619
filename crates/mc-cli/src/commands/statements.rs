//! Statements command implementation

use anyhow::{Context, Result};
use mc_sql::{split_statements, StatementStats};
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputFormat, StatementsArgs};
use crate::commands::common;

const SUMMARY_CHARS: usize = 80;

#[derive(Debug, Serialize)]
struct StatementListing<'a> {
    migration: String,
    stats: StatementStats,
    statements: Vec<&'a str>,
}

/// Execute the statements command
pub(crate) async fn execute(args: &StatementsArgs, global: &GlobalArgs) -> Result<()> {
    let sql = common::read_migration_arg(&args.file)?;
    let statements = split_statements(&sql);
    let stats = StatementStats::from_statements(&statements);
    common::verbose(
        global,
        &format!("Split {} into {} statements", args.file.display(), statements.len()),
    );

    match args.output {
        OutputFormat::Text => {
            for (i, stmt) in statements.iter().enumerate() {
                let marker = if stmt.is_grant() {
                    " [grant]"
                } else if stmt.is_create_policy() {
                    " [policy]"
                } else {
                    ""
                };
                println!("{:>4}. {}{}", i + 1, stmt.summary(SUMMARY_CHARS), marker);
            }
            println!();
            println!("Total SQL statements: {}", stats.total_statements);
            println!("Grant statements: {}", stats.grant_statements);
            println!("RLS policies: {}", stats.policies);
        }
        OutputFormat::Json => {
            let listing = StatementListing {
                migration: common::display_path(&args.file),
                stats,
                statements: statements.iter().map(|s| s.text()).collect(),
            };
            let json =
                serde_json::to_string_pretty(&listing).context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
    }
    Ok(())
}
