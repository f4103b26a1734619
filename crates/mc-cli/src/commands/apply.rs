//! Apply command implementation

use anyhow::{Context, Result};
use mc_core::ApiConfig;
use mc_db::{ManagementApiClient, QueryEndpoint};
use mc_sql::split_statements;

use crate::cli::{ApplyArgs, GlobalArgs, OutputFormat};
use crate::commands::check::{self, CheckPlan};
use crate::commands::common::{self, ExitCode};

/// Characters of a successful response body echoed back
const SUCCESS_PREVIEW_CHARS: usize = 500;

/// Characters of a failed response body echoed back
const FAILURE_PREVIEW_CHARS: usize = 1000;

/// Execute the apply command
pub(crate) async fn execute(args: &ApplyArgs, global: &GlobalArgs) -> Result<()> {
    let sql = common::read_migration_arg(&args.file)?;
    let project = common::try_load_project(global)?;

    if let Some(suite_name) = &args.check {
        let project = project
            .as_ref()
            .context("--check needs a migcheck.yml to look up the suite")?;
        let suite = project.config.suite(suite_name)?;
        let plan = CheckPlan {
            name: suite_name.clone(),
            path: args.file.clone(),
            facts: suite.expected_facts(&project.config.default_schema),
        };
        let run = check::run_check(&plan, &sql)?;
        check::print_run(&run, global.verbose);
        if !run.report.is_success() {
            check::finish(&[run], OutputFormat::Text)?;
        }
        println!("Pre-apply check passed; continuing.\n");
    }

    if args.dry_run {
        println!("SQL to execute:\n");
        println!("{}", sql.trim_end());
        println!(
            "\nDry run: {} statement(s), nothing sent",
            split_statements(&sql).len()
        );
        return Ok(());
    }

    let api = project
        .as_ref()
        .map(|p| p.config.api.clone())
        .unwrap_or_else(ApiConfig::default);
    let client = ManagementApiClient::from_config(&api, args.project_ref.as_deref())
        .context("Cannot build management API client")?;

    log::info!(
        "Applying {} via {}",
        common::display_path(&args.file),
        client.describe()
    );
    apply_with(&client, &sql).await
}

/// Submit `sql` to an endpoint and report the HTTP outcome
pub(crate) async fn apply_with(endpoint: &dyn QueryEndpoint, sql: &str) -> Result<()> {
    let response = endpoint
        .run_query(sql)
        .await
        .with_context(|| format!("Request to {} failed", endpoint.describe()))?;

    println!("HTTP {}", response.status);
    if response.is_success() {
        println!("Migration applied successfully.");
        let preview = response.body_preview(SUCCESS_PREVIEW_CHARS);
        if !preview.is_empty() {
            println!("{}", preview);
        }
        Ok(())
    } else {
        println!("FAILED: {}", response.body_preview(FAILURE_PREVIEW_CHARS));
        Err(ExitCode(1).into())
    }
}

#[cfg(test)]
#[path = "apply_test.rs"]
mod tests;
