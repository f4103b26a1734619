use super::*;
use mc_sql::Validator;
use tempfile::TempDir;

fn init_args(dir: &Path) -> InitArgs {
    InitArgs {
        dir: dir.to_path_buf(),
        name: Some("demo".to_string()),
        migrations_dir: "db/migrations".to_string(),
    }
}

#[tokio::test]
async fn test_init_writes_config_and_passing_migration() {
    let dir = TempDir::new().unwrap();
    execute(&init_args(dir.path())).await.unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "demo");
    assert_eq!(config.migrations_dir, "db/migrations");

    let suite = config.suite("init").unwrap();
    assert!(suite.migration.ends_with("_init.sql"));

    let path = config.migration_path(dir.path(), suite);
    let text = fs::read_to_string(&path).unwrap();
    let facts = suite.expected_facts(&config.default_schema);
    let report = Validator::new(&facts).unwrap().validate(&text);
    assert!(report.is_success(), "missing: {:?}", report.missing());
}

#[tokio::test]
async fn test_init_refuses_existing_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("migcheck.yml"), "name: x\n").unwrap();
    let err = execute(&init_args(dir.path())).await.unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[tokio::test]
async fn test_init_rejects_escaping_migrations_dir() {
    let dir = TempDir::new().unwrap();
    let args = InitArgs {
        migrations_dir: "../elsewhere".to_string(),
        ..init_args(dir.path())
    };
    assert!(execute(&args).await.is_err());
}

#[test]
fn test_validate_name() {
    assert!(validate_name("my-project").is_ok());
    assert!(validate_name("").is_err());
    assert!(validate_name("bad\"name").is_err());
    assert!(validate_name("-flag").is_err());
}

#[test]
fn test_starter_config_parses() {
    let config = Config::from_yaml(&starter_config("n", "migrations", "1_init.sql")).unwrap();
    assert_eq!(config.suite_names(), vec!["init"]);
}
