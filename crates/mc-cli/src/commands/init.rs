//! Init command implementation - scaffolds a migcheck project

use anyhow::{bail, Context, Result};
use mc_core::config::CONFIG_FILE_NAMES;
use mc_core::Config;
use std::fs;
use std::path::Path;

use crate::cli::InitArgs;

/// Execute the init command
pub(crate) async fn execute(args: &InitArgs) -> Result<()> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => default_name(&args.dir),
    };
    validate_name(&name)?;

    if args.migrations_dir.contains("..") || Path::new(&args.migrations_dir).is_absolute() {
        bail!(
            "Invalid migrations directory '{}': must be relative and stay inside the project",
            args.migrations_dir
        );
    }

    if let Some(existing) = Config::find_in_dir(&args.dir) {
        bail!(
            "{} already exists. Remove it or choose another directory.",
            existing.display()
        );
    }

    println!("Creating migcheck project '{}' in {}\n", name, args.dir.display());

    let migrations = args.dir.join(&args.migrations_dir);
    fs::create_dir_all(&migrations)
        .with_context(|| format!("Failed to create directory: {}", migrations.display()))?;

    let migration_file = format!("{}_init.sql", chrono::Utc::now().format("%Y%m%d%H%M%S"));
    let migration_path = migrations.join(&migration_file);
    fs::write(&migration_path, STARTER_MIGRATION)
        .with_context(|| format!("Failed to write {}", migration_path.display()))?;

    let config_path = args.dir.join(CONFIG_FILE_NAMES[0]);
    fs::write(
        &config_path,
        starter_config(&name, &args.migrations_dir, &migration_file),
    )
    .with_context(|| format!("Failed to write {}", config_path.display()))?;

    // Parse what we just wrote so a broken template fails here, not later.
    Config::load(&config_path).context("Generated config does not load")?;

    println!("  Created {}", CONFIG_FILE_NAMES[0]);
    println!("  Created {}/{}", args.migrations_dir, migration_file);
    println!();
    println!("Next steps:");
    println!("  mc check        # Check every suite");
    println!("  mc apply {}/{} --check init --dry-run", args.migrations_dir, migration_file);

    Ok(())
}

fn default_name(dir: &Path) -> String {
    dir.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "migrations".to_string())
}

/// Reject names that would produce confusing YAML or paths
fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty()
        || name.contains(['"', '\\', '\n'])
        || name.starts_with('-')
    {
        bail!(
            "Invalid project name '{}': must be non-empty and not contain quotes, backslashes, \
             or newlines",
            name
        );
    }
    Ok(())
}

const STARTER_MIGRATION: &str = r#"-- Starter migration created by `mc init`
create table if not exists public.notes (
    id uuid primary key default gen_random_uuid(),
    body text not null,
    created_at timestamptz not null default now()
);

alter table public.notes enable row level security;

create policy "notes are readable" on public.notes
    for select using (true);
"#;

fn starter_config(name: &str, migrations_dir: &str, migration_file: &str) -> String {
    format!(
        r#"name: "{name}"
migrations_dir: "{migrations_dir}"
default_schema: public

api:
  # project_ref: your-project-ref
  token_env: SUPABASE_ACCESS_TOKEN

suites:
  init:
    migration: "{migration_file}"
    description: "Starter notes table"
    tables_with_rls: [notes]
    require_policies: true
    facts:
      - kind: column_defined
        column: body
        type: text
        not_null: true
"#
    )
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
