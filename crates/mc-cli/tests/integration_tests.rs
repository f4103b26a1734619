//! Integration tests for the mc binary

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const SAMPLE: &str = "tests/fixtures/sample_project";

/// Path to the compiled mc binary
fn mc_bin() -> String {
    env!("CARGO_BIN_EXE_mc").to_string()
}

/// Run an `mc` command and return (stdout, stderr, exit code).
fn run_mc(args: &[&str], envs: &[(&str, &str)]) -> (String, String, Option<i32>) {
    let output = Command::new(mc_bin())
        .args(args)
        .envs(envs.iter().copied())
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute mc with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code(),
    )
}

fn write_sql(dir: &Path, name: &str, sql: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, sql).unwrap();
    path.display().to_string()
}

#[test]
fn test_check_passing_suite() {
    let (stdout, stderr, code) = run_mc(&["-p", SAMPLE, "check", "foundation"], &[]);
    assert_eq!(code, Some(0), "stdout: {}\nstderr: {}", stdout, stderr);
    assert!(stdout.contains(r#"OK: create table "public"."projects""#));
    assert!(stdout.contains("Total SQL statements: 8"));
    assert!(stdout.contains("Grant statements: 1"));
    assert!(stdout.contains("RLS policies: 1"));
    assert!(stdout.contains("7/7 facts found"));
    assert!(stdout.contains("All structural checks passed."));
    assert!(!stdout.contains("MISSING"));
}

#[test]
fn test_check_column_without_foreign_key() {
    let (stdout, _, code) = run_mc(&["-p", SAMPLE, "check", "template_id"], &[]);
    assert_eq!(code, Some(1));
    assert!(stdout.contains(r#"OK: alter table "public"."campaigns" add column "template_id" bigint"#));
    assert!(stdout.contains(r#"MISSING: constraint "campaigns_template_id_fkey""#));
    assert!(stdout.contains("1/2 facts found"));
    assert!(stdout.contains("MISSING FACTS:"));
}

#[test]
fn test_check_single_missing_extension_fails() {
    let (stdout, _, code) = run_mc(&["-p", SAMPLE, "check", "search"], &[]);
    assert_eq!(code, Some(1));
    assert!(stdout.contains("4/5 facts found"));
    assert!(stdout.contains(r#"[search] create extension "vector""#));
}

#[test]
fn test_check_all_suites_reports_every_missing_fact() {
    let (stdout, _, code) = run_mc(&["-p", SAMPLE, "check"], &[]);
    assert_eq!(code, Some(1));
    let listing = stdout.split("MISSING FACTS:").nth(1).unwrap();
    let constraint = listing.find("campaigns_template_id_fkey").unwrap();
    let vector = listing.find(r#""vector""#).unwrap();
    // Suites run in name order: search before template_id
    assert!(vector < constraint, "missing facts out of order:\n{}", listing);
}

#[test]
fn test_check_json_output() {
    let (stdout, _, code) = run_mc(&["-p", SAMPLE, "check", "search", "-o", "json"], &[]);
    assert_eq!(code, Some(1));
    let runs: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let run = &runs[0];
    assert_eq!(run["name"], "search");
    assert_eq!(run["report"]["outcomes"].as_array().unwrap().len(), 5);
    assert_eq!(run["report"]["stats"]["grant_statements"], 1);
    assert_eq!(run["checksum"].as_str().unwrap().len(), 64);
}

#[test]
fn test_check_unknown_suite_is_error() {
    let (_, stderr, code) = run_mc(&["-p", SAMPLE, "check", "nope"], &[]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("nope"));
}

#[test]
fn test_check_adhoc_file_mixed_case() {
    let tmp = TempDir::new().unwrap();
    let file = write_sql(
        tmp.path(),
        "m.sql",
        "CREATE TABLE \"Public\".\"Campaigns\" (id bigint);\nALTER TABLE public.campaigns ENABLE ROW LEVEL SECURITY;\n",
    );
    let (stdout, _, code) = run_mc(
        &[
            "-p",
            tmp.path().to_str().unwrap(),
            "check",
            "--file",
            &file,
            "--table",
            "campaigns",
            "--rls",
        ],
        &[],
    );
    assert_eq!(code, Some(0), "stdout: {}", stdout);
    assert!(stdout.contains("2/2 facts found"));
}

#[test]
fn test_check_missing_migration_file() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("absent.sql");
    let (_, stderr, code) = run_mc(
        &[
            "check",
            "--file",
            missing.to_str().unwrap(),
            "--contains",
            "x",
        ],
        &[],
    );
    assert_eq!(code, Some(1));
    assert!(stderr.contains("Migration file not found"));
}

#[test]
fn test_statements_counts_grants() {
    let tmp = TempDir::new().unwrap();
    let file = write_sql(
        tmp.path(),
        "c.sql",
        "GRANT SELECT ON t TO role;\nINSERT INTO t VALUES (1);\nUPDATE t SET granted = true;\n",
    );
    let (stdout, _, code) = run_mc(&["statements", &file], &[]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("Total SQL statements: 3"));
    assert!(stdout.contains("Grant statements: 1"));
    assert!(stdout.contains("[grant]"));
}

#[test]
fn test_ls_lists_suites() {
    let (stdout, _, code) = run_mc(&["-p", SAMPLE, "ls"], &[]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("foundation"));
    assert!(stdout.contains("template_id"));
    assert!(stdout.contains("3 suites found"));
}

#[test]
fn test_apply_dry_run_sends_nothing() {
    let file = format!("{}/migrations/003_search.sql", SAMPLE);
    let (stdout, _, code) = run_mc(&["-p", SAMPLE, "apply", &file, "--dry-run"], &[]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("SQL to execute:"));
    assert!(stdout.contains("create table public.documents"));
    assert!(stdout.contains("4 statement(s)"));
}

#[test]
fn test_apply_refuses_when_check_fails() {
    let file = format!("{}/migrations/002_template_id.sql", SAMPLE);
    let (stdout, _, code) = run_mc(
        &["-p", SAMPLE, "apply", &file, "--check", "template_id"],
        &[("MC_SAMPLE_TOKEN", "tok")],
    );
    assert_eq!(code, Some(1));
    assert!(stdout.contains("MISSING FACTS:"));
    assert!(!stdout.contains("HTTP"));
}

#[test]
fn test_apply_without_token() {
    let file = format!("{}/migrations/003_search.sql", SAMPLE);
    let output = Command::new(mc_bin())
        .args(["-p", SAMPLE, "apply", &file])
        .env_remove("MC_SAMPLE_TOKEN")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[D001] MC_SAMPLE_TOKEN not set"));
}

#[test]
fn test_apply_posts_to_management_api() {
    let mut server = mockito::Server::new();
    let ok = server
        .mock("POST", "/v1/projects/sample/database/query")
        .match_header("authorization", "Bearer tok")
        .with_status(201)
        .with_body("[]")
        .create();

    let tmp = TempDir::new().unwrap();
    let config = format!(
        "name: api_test\napi:\n  base_url: \"{}\"\n  project_ref: sample\n  token_env: MC_API_TEST_TOKEN\n",
        server.url()
    );
    fs::write(tmp.path().join("migcheck.yml"), config).unwrap();
    let file = write_sql(tmp.path(), "m.sql", "create table t (id int);\n");

    let (stdout, _, code) = run_mc(
        &["-p", tmp.path().to_str().unwrap(), "apply", &file],
        &[("MC_API_TEST_TOKEN", "tok")],
    );
    ok.assert();
    assert_eq!(code, Some(0), "stdout: {}", stdout);
    assert!(stdout.contains("HTTP 201"));
    assert!(stdout.contains("Migration applied successfully."));
}

#[test]
fn test_apply_reports_error_status() {
    let mut server = mockito::Server::new();
    let _bad = server
        .mock("POST", "/v1/projects/override/database/query")
        .with_status(400)
        .with_body("syntax error at or near \"tabel\"")
        .create();

    let tmp = TempDir::new().unwrap();
    let config = format!(
        "name: api_test\napi:\n  base_url: \"{}\"\n  token_env: MC_API_TEST_TOKEN\n",
        server.url()
    );
    fs::write(tmp.path().join("migcheck.yml"), config).unwrap();
    let file = write_sql(tmp.path(), "m.sql", "create tabel t;\n");

    let (stdout, _, code) = run_mc(
        &[
            "-p",
            tmp.path().to_str().unwrap(),
            "apply",
            &file,
            "--project-ref",
            "override",
        ],
        &[("MC_API_TEST_TOKEN", "tok")],
    );
    assert_eq!(code, Some(1));
    assert!(stdout.contains("HTTP 400"));
    assert!(stdout.contains("FAILED: syntax error"));
}

#[test]
fn test_init_then_check() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().to_str().unwrap();
    let (_, stderr, code) = run_mc(&["init", dir, "--name", "fresh"], &[]);
    assert_eq!(code, Some(0), "stderr: {}", stderr);

    let (stdout, _, code) = run_mc(&["-p", dir, "check"], &[]);
    assert_eq!(code, Some(0), "stdout: {}", stdout);
    assert!(stdout.contains("All structural checks passed."));
}
