//! List command implementation

use anyhow::{Context, Result};
use mc_core::Project;
use serde::Serialize;

use crate::cli::{GlobalArgs, LsArgs, OutputFormat};
use crate::commands::common;

/// Summary of one configured suite
#[derive(Debug, Serialize)]
struct SuiteInfo {
    name: String,
    migration: String,
    exists: bool,
    facts: usize,
    description: Option<String>,
}

/// Execute the ls command
pub(crate) async fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let project = common::load_project(global)?;
    let suites = collect_suites(&project);

    match args.output {
        OutputFormat::Text => print_table(&suites),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&suites).context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn collect_suites(project: &Project) -> Vec<SuiteInfo> {
    project
        .config
        .suites
        .iter()
        .map(|(name, suite)| {
            let path = project.migration_path(suite);
            SuiteInfo {
                name: name.to_string(),
                migration: common::display_path(&path),
                exists: path.is_file(),
                facts: suite.fact_count(),
                description: suite.description.clone(),
            }
        })
        .collect()
}

/// Print suites in table format
fn print_table(suites: &[SuiteInfo]) {
    if suites.is_empty() {
        println!("No suites configured");
        return;
    }

    let name_width = suites.iter().map(|s| s.name.len()).max().unwrap_or(4).max(5);
    let migration_width = suites
        .iter()
        .map(|s| s.migration.len())
        .max()
        .unwrap_or(9)
        .max(9);
    let facts_width = 5;

    println!(
        "{:<name_width$}  {:<migration_width$}  {:<facts_width$}  DESCRIPTION",
        "SUITE", "MIGRATION", "FACTS",
    );
    println!(
        "{:-<name_width$}  {:-<migration_width$}  {:-<facts_width$}  {}",
        "",
        "",
        "",
        "-".repeat(30),
    );

    for suite in suites {
        let migration = if suite.exists {
            suite.migration.clone()
        } else {
            format!("{} (missing)", suite.migration)
        };
        println!(
            "{:<name_width$}  {:<migration_width$}  {:<facts_width$}  {}",
            suite.name,
            migration,
            suite.facts,
            suite.description.as_deref().unwrap_or("-"),
        );
    }

    println!();
    println!("{} suites found", suites.len());
}
