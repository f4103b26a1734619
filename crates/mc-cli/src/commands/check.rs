//! Check command implementation

use anyhow::{bail, Context, Result};
use mc_core::{migration_checksum, ExpectedFact, Project};
use mc_sql::{ValidationReport, Validator};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::{CheckArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{self, ExitCode};

/// Schema for flag facts when neither the command line nor a config names one
const DEFAULT_SCHEMA: &str = "public";

/// A migration file and the facts it must satisfy
#[derive(Debug)]
pub(crate) struct CheckPlan {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) facts: Vec<ExpectedFact>,
}

/// Result of one plan
#[derive(Debug, Serialize)]
pub(crate) struct CheckRun {
    pub(crate) name: String,
    pub(crate) migration: String,
    pub(crate) checksum: String,
    pub(crate) report: ValidationReport,
}

/// Execute the check command
pub(crate) async fn execute(args: &CheckArgs, global: &GlobalArgs) -> Result<()> {
    let plans = plan_checks(args, global)?;
    common::verbose(global, &format!("Running {} check(s)", plans.len()));

    let mut runs = Vec::with_capacity(plans.len());
    for plan in &plans {
        let text = common::read_migration_arg(&plan.path)?;
        runs.push(run_check(plan, &text)?);
    }

    match args.output {
        OutputFormat::Text => {
            for run in &runs {
                print_run(run, global.verbose);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&runs).context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
    }

    finish(&runs, args.output)
}

/// Work out which files to check against which facts
pub(crate) fn plan_checks(args: &CheckArgs, global: &GlobalArgs) -> Result<Vec<CheckPlan>> {
    let flag_facts = flag_facts(args);

    let Some(file) = &args.file else {
        if !flag_facts.is_empty() {
            bail!("Fact flags such as --table need --file to name the migration to check");
        }
        return plan_suites(&common::load_project(global)?, &args.suites);
    };

    let (name, mut facts, schema) = match args.suites.as_slice() {
        [] => {
            let schema = match common::try_load_project(global)? {
                Some(project) => project.config.default_schema,
                None => DEFAULT_SCHEMA.to_string(),
            };
            ("adhoc".to_string(), Vec::new(), schema)
        }
        [suite_name] => {
            let project = common::load_project(global)?;
            let suite = project.config.suite(suite_name)?;
            let schema = suite
                .schema
                .clone()
                .unwrap_or_else(|| project.config.default_schema.clone());
            let facts = suite.expected_facts(&project.config.default_schema);
            (suite_name.clone(), facts, schema)
        }
        many => bail!(
            "--file can be combined with at most one suite, got {}",
            many.len()
        ),
    };

    let schema = args.schema.as_deref().unwrap_or(&schema);
    facts.extend(flag_facts.iter().map(|f| f.with_default_schema(schema)));

    if facts.is_empty() {
        bail!(
            "No facts to check: name a suite or pass --table, --policies, --extension, \
             --constraint, --contains or --pattern"
        );
    }

    Ok(vec![CheckPlan {
        name,
        path: file.clone(),
        facts,
    }])
}

/// Plans for configured suites; all of them when none are named
fn plan_suites(project: &Project, names: &[String]) -> Result<Vec<CheckPlan>> {
    let names: Vec<String> = if names.is_empty() {
        project
            .config
            .suite_names()
            .into_iter()
            .map(String::from)
            .collect()
    } else {
        names.to_vec()
    };

    if names.is_empty() {
        bail!(
            "No suites configured in project '{}'. Add one under 'suites:' or use --file",
            project.config.name
        );
    }

    names
        .into_iter()
        .map(|name| {
            let suite = project.config.suite(&name)?;
            Ok(CheckPlan {
                path: project.migration_path(suite),
                facts: suite.expected_facts(&project.config.default_schema),
                name,
            })
        })
        .collect()
}

/// Facts given as command line flags, in a fixed order
fn flag_facts(args: &CheckArgs) -> Vec<ExpectedFact> {
    let mut facts: Vec<ExpectedFact> = args
        .tables
        .iter()
        .map(|t| ExpectedFact::table_created(t.as_str()))
        .collect();
    if args.rls {
        facts.extend(args.tables.iter().map(|t| ExpectedFact::rls_enabled(t.as_str())));
    }
    if args.policies {
        facts.push(ExpectedFact::any_policy());
    }
    facts.extend(
        args.extensions
            .iter()
            .map(|e| ExpectedFact::extension_present(e.as_str())),
    );
    facts.extend(
        args.constraints
            .iter()
            .map(|c| ExpectedFact::constraint_present(c.as_str())),
    );
    facts.extend(args.contains.iter().map(|c| ExpectedFact::contains(c.as_str())));
    facts.extend(args.patterns.iter().map(|p| ExpectedFact::pattern(p.as_str())));
    facts
}

/// Validate migration text for one plan
pub(crate) fn run_check(plan: &CheckPlan, text: &str) -> Result<CheckRun> {
    let validator = Validator::new(&plan.facts)
        .with_context(|| format!("Invalid fact in check '{}'", plan.name))?;
    Ok(CheckRun {
        name: plan.name.clone(),
        migration: common::display_path(&plan.path),
        checksum: migration_checksum(text),
        report: validator.validate(text),
    })
}

/// Print one run as per-fact lines followed by counts
pub(crate) fn print_run(run: &CheckRun, verbose: bool) {
    println!("Checking {}: {}", run.name, run.migration);
    if verbose {
        println!("  Checksum: {}", run.checksum);
    }

    for outcome in &run.report.outcomes {
        let tag = if outcome.found { "OK" } else { "MISSING" };
        if verbose {
            println!("  {}: {}  [{}]", tag, outcome.label, outcome.pattern);
        } else {
            println!("  {}: {}", tag, outcome.label);
        }
    }

    let stats = &run.report.stats;
    println!();
    println!("  Total SQL statements: {}", stats.total_statements);
    println!("  Grant statements: {}", stats.grant_statements);
    println!("  RLS policies: {}", stats.policies);
    println!(
        "  {}/{} facts found\n",
        run.report.found_count(),
        run.report.expected_count()
    );
}

/// Print the combined verdict and map it to an exit code
pub(crate) fn finish(runs: &[CheckRun], output: OutputFormat) -> Result<()> {
    let missing: Vec<(&str, &str)> = runs
        .iter()
        .flat_map(|run| {
            run.report
                .missing()
                .into_iter()
                .map(move |o| (run.name.as_str(), o.label.as_str()))
        })
        .collect();

    if output == OutputFormat::Text {
        if missing.is_empty() {
            println!("All structural checks passed.");
        } else {
            println!("MISSING FACTS:");
            for (name, label) in &missing {
                println!("  - [{}] {}", name, label);
            }
            println!("\n{} fact(s) missing", missing.len());
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ExitCode(1).into())
    }
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
