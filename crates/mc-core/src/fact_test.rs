use super::*;

#[test]
fn test_deserialize_tagged_facts() {
    let yaml = r#"
- kind: table_created
  table: campaigns
- kind: column_added
  table: campaigns
  column: template_id
  type: bigint
- kind: constraint_present
  name: campaigns_template_id_fkey
- kind: rls_enabled
  table: campaigns
  schema: crm
- kind: policy_created
- kind: extension_present
  name: vector
- kind: column_defined
  column: email_address
  type: text
  not_null: true
- kind: contains
  text: user_role
- kind: pattern
  regex: 'create\s+function'
"#;
    let facts: Vec<ExpectedFact> = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(facts.len(), 9);
    assert_eq!(facts[0], ExpectedFact::table_created("campaigns"));
    assert_eq!(
        facts[1],
        ExpectedFact::column_added("campaigns", "template_id", "bigint")
    );
    assert_eq!(facts[3].schema(), Some("crm"));
    assert_eq!(facts[4], ExpectedFact::any_policy());
    assert_eq!(
        facts[6],
        ExpectedFact::column_defined("email_address", "text", true)
    );
    assert_eq!(facts[8].kind(), FactKind::Pattern);
}

#[test]
fn test_unknown_kind_is_rejected() {
    let result = serde_yaml::from_str::<ExpectedFact>("kind: trigger_created\nname: x");
    assert!(result.is_err());
}

#[test]
fn test_column_defined_not_null_defaults_false() {
    let fact: ExpectedFact =
        serde_yaml::from_str("kind: column_defined\ncolumn: subject\ntype: text").unwrap();
    assert_eq!(fact, ExpectedFact::column_defined("subject", "text", false));
}

#[test]
fn test_with_default_schema_fills_only_missing() {
    let fact = ExpectedFact::table_created("campaigns").with_default_schema("public");
    assert_eq!(fact.schema(), Some("public"));

    let explicit: ExpectedFact =
        serde_yaml::from_str("kind: rls_enabled\ntable: t\nschema: crm").unwrap();
    assert_eq!(explicit.with_default_schema("public").schema(), Some("crm"));
}

#[test]
fn test_with_default_schema_leaves_tableless_facts() {
    let policy = ExpectedFact::any_policy().with_default_schema("public");
    assert_eq!(policy.schema(), None);

    let ext = ExpectedFact::extension_present("vector").with_default_schema("public");
    assert_eq!(ext, ExpectedFact::extension_present("vector"));

    let scoped = ExpectedFact::policy_on("segments").with_default_schema("public");
    assert_eq!(scoped.schema(), Some("public"));
}

#[test]
fn test_display_labels() {
    let t = ExpectedFact::table_created("campaigns").with_default_schema("public");
    assert_eq!(t.to_string(), r#"create table "public"."campaigns""#);

    let rls = ExpectedFact::rls_enabled("campaigns");
    assert_eq!(
        rls.to_string(),
        r#"alter table "campaigns" enable row level security"#
    );

    let col = ExpectedFact::column_defined("email_address", "text", true);
    assert_eq!(col.to_string(), r#""email_address" text not null"#);

    assert_eq!(ExpectedFact::any_policy().to_string(), "create policy");
    assert_eq!(
        ExpectedFact::pattern("grant\\s+select").to_string(),
        "pattern /grant\\s+select/"
    );
}

#[test]
fn test_validate_rejects_blank_fields() {
    assert!(ExpectedFact::table_created("  ").validate().is_err());
    assert!(ExpectedFact::column_added("t", "", "text").validate().is_err());
    assert!(ExpectedFact::contains("").validate().is_err());
    assert!(ExpectedFact::any_policy().validate().is_ok());
    assert!(ExpectedFact::policy_on("").validate().is_err());

    let blank_schema = ExpectedFact::table_created("t").with_default_schema(" ");
    let err = blank_schema.validate().unwrap_err();
    assert!(err.to_string().contains("table-created fact has an empty 'schema'"));

    let err = ExpectedFact::extension_present("").validate().unwrap_err();
    assert!(err.to_string().contains("extension-present fact has an empty 'name'"));
}
