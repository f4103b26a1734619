//! Declarative structural facts about a migration.
//!
//! A fact states that some schema element appears in migration text. Facts
//! are plain data: they are declared in `migcheck.yml` or built from CLI
//! flags, and compiled into matchers by `mc-sql`.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One structural assertion about a migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpectedFact {
    /// `CREATE TABLE <schema>.<table>`
    TableCreated {
        table: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<String>,
    },

    /// `ALTER TABLE <schema>.<table> ADD COLUMN <column> <type>`
    ColumnAdded {
        table: String,
        column: String,
        #[serde(rename = "type")]
        data_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<String>,
    },

    /// A named constraint is declared, added, or validated
    ConstraintPresent { name: String },

    /// `ALTER TABLE <schema>.<table> ENABLE ROW LEVEL SECURITY`
    RlsEnabled {
        table: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<String>,
    },

    /// At least one `CREATE POLICY`, optionally restricted to one table
    PolicyCreated {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<String>,
    },

    /// `CREATE EXTENSION <name>`
    ExtensionPresent { name: String },

    /// A column definition `<column> <type> [NOT NULL]`, typically inside a
    /// `CREATE TABLE` body
    ColumnDefined {
        column: String,
        #[serde(rename = "type")]
        data_type: String,
        #[serde(default)]
        not_null: bool,
    },

    /// A literal token anywhere in the text
    Contains { text: String },

    /// A raw regular expression, matched case-insensitively
    Pattern { regex: String },
}

/// Discriminant of [`ExpectedFact`], used for grouping and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactKind {
    TableCreated,
    ColumnAdded,
    ConstraintPresent,
    RlsEnabled,
    PolicyCreated,
    ExtensionPresent,
    ColumnDefined,
    Contains,
    Pattern,
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FactKind::TableCreated => "table-created",
            FactKind::ColumnAdded => "column-added",
            FactKind::ConstraintPresent => "constraint-present",
            FactKind::RlsEnabled => "rls-enabled",
            FactKind::PolicyCreated => "policy-created",
            FactKind::ExtensionPresent => "extension-present",
            FactKind::ColumnDefined => "column-defined",
            FactKind::Contains => "contains",
            FactKind::Pattern => "pattern",
        };
        f.write_str(s)
    }
}

impl ExpectedFact {
    /// `table_created(table)` with the schema left to the suite default
    pub fn table_created(table: impl Into<String>) -> Self {
        ExpectedFact::TableCreated {
            table: table.into(),
            schema: None,
        }
    }

    /// `column_added(table, column, type)` with the schema left to the suite default
    pub fn column_added(
        table: impl Into<String>,
        column: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        ExpectedFact::ColumnAdded {
            table: table.into(),
            column: column.into(),
            data_type: data_type.into(),
            schema: None,
        }
    }

    pub fn constraint_present(name: impl Into<String>) -> Self {
        ExpectedFact::ConstraintPresent { name: name.into() }
    }

    pub fn rls_enabled(table: impl Into<String>) -> Self {
        ExpectedFact::RlsEnabled {
            table: table.into(),
            schema: None,
        }
    }

    /// Any `CREATE POLICY` statement
    pub fn any_policy() -> Self {
        ExpectedFact::PolicyCreated {
            table: None,
            schema: None,
        }
    }

    pub fn policy_on(table: impl Into<String>) -> Self {
        ExpectedFact::PolicyCreated {
            table: Some(table.into()),
            schema: None,
        }
    }

    pub fn extension_present(name: impl Into<String>) -> Self {
        ExpectedFact::ExtensionPresent { name: name.into() }
    }

    pub fn column_defined(
        column: impl Into<String>,
        data_type: impl Into<String>,
        not_null: bool,
    ) -> Self {
        ExpectedFact::ColumnDefined {
            column: column.into(),
            data_type: data_type.into(),
            not_null,
        }
    }

    pub fn contains(text: impl Into<String>) -> Self {
        ExpectedFact::Contains { text: text.into() }
    }

    pub fn pattern(regex: impl Into<String>) -> Self {
        ExpectedFact::Pattern {
            regex: regex.into(),
        }
    }

    /// The kind of this fact
    pub fn kind(&self) -> FactKind {
        match self {
            ExpectedFact::TableCreated { .. } => FactKind::TableCreated,
            ExpectedFact::ColumnAdded { .. } => FactKind::ColumnAdded,
            ExpectedFact::ConstraintPresent { .. } => FactKind::ConstraintPresent,
            ExpectedFact::RlsEnabled { .. } => FactKind::RlsEnabled,
            ExpectedFact::PolicyCreated { .. } => FactKind::PolicyCreated,
            ExpectedFact::ExtensionPresent { .. } => FactKind::ExtensionPresent,
            ExpectedFact::ColumnDefined { .. } => FactKind::ColumnDefined,
            ExpectedFact::Contains { .. } => FactKind::Contains,
            ExpectedFact::Pattern { .. } => FactKind::Pattern,
        }
    }

    /// Explicit schema qualifier, if the fact carries one
    pub fn schema(&self) -> Option<&str> {
        match self {
            ExpectedFact::TableCreated { schema, .. }
            | ExpectedFact::ColumnAdded { schema, .. }
            | ExpectedFact::RlsEnabled { schema, .. }
            | ExpectedFact::PolicyCreated { schema, .. } => schema.as_deref(),
            _ => None,
        }
    }

    /// Return a copy with an unset schema replaced by `default_schema`.
    ///
    /// Facts without a table, or with an explicit schema, are returned as-is.
    /// A table-less `policy_created` stays unqualified.
    pub fn with_default_schema(&self, default_schema: &str) -> Self {
        let mut fact = self.clone();
        match &mut fact {
            ExpectedFact::TableCreated { schema, .. }
            | ExpectedFact::ColumnAdded { schema, .. }
            | ExpectedFact::RlsEnabled { schema, .. } => {
                if schema.is_none() {
                    *schema = Some(default_schema.to_string());
                }
            }
            ExpectedFact::PolicyCreated {
                table: Some(_),
                schema,
            } => {
                if schema.is_none() {
                    *schema = Some(default_schema.to_string());
                }
            }
            _ => {}
        }
        fact
    }

    /// Reject facts with blank required fields
    pub fn validate(&self) -> CoreResult<()> {
        let blank = |field: &'static str, value: &str| -> CoreResult<()> {
            if value.trim().is_empty() {
                Err(CoreError::ConfigInvalid {
                    message: format!("{} fact has an empty '{}'", self.kind(), field),
                })
            } else {
                Ok(())
            }
        };

        if let Some(schema) = self.schema() {
            blank("schema", schema)?;
        }

        match self {
            ExpectedFact::TableCreated { table, .. } | ExpectedFact::RlsEnabled { table, .. } => {
                blank("table", table)
            }
            ExpectedFact::ColumnAdded {
                table,
                column,
                data_type,
                ..
            } => {
                blank("table", table)?;
                blank("column", column)?;
                blank("type", data_type)
            }
            ExpectedFact::ConstraintPresent { name } | ExpectedFact::ExtensionPresent { name } => {
                blank("name", name)
            }
            ExpectedFact::PolicyCreated { table, .. } => match table {
                Some(t) => blank("table", t),
                None => Ok(()),
            },
            ExpectedFact::ColumnDefined {
                column, data_type, ..
            } => {
                blank("column", column)?;
                blank("type", data_type)
            }
            ExpectedFact::Contains { text } => blank("text", text),
            ExpectedFact::Pattern { regex } => blank("regex", regex),
        }
    }
}

/// Render `"schema"."table"` or `"table"` the way migrations usually spell it
fn qualified(schema: Option<&str>, table: &str) -> String {
    match schema {
        Some(s) => format!("\"{}\".\"{}\"", s, table),
        None => format!("\"{}\"", table),
    }
}

impl fmt::Display for ExpectedFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedFact::TableCreated { table, schema } => {
                write!(f, "create table {}", qualified(schema.as_deref(), table))
            }
            ExpectedFact::ColumnAdded {
                table,
                column,
                data_type,
                schema,
            } => write!(
                f,
                "alter table {} add column \"{}\" {}",
                qualified(schema.as_deref(), table),
                column,
                data_type
            ),
            ExpectedFact::ConstraintPresent { name } => write!(f, "constraint \"{}\"", name),
            ExpectedFact::RlsEnabled { table, schema } => write!(
                f,
                "alter table {} enable row level security",
                qualified(schema.as_deref(), table)
            ),
            ExpectedFact::PolicyCreated { table: None, .. } => write!(f, "create policy"),
            ExpectedFact::PolicyCreated {
                table: Some(table),
                schema,
            } => write!(
                f,
                "create policy on {}",
                qualified(schema.as_deref(), table)
            ),
            ExpectedFact::ExtensionPresent { name } => write!(f, "create extension \"{}\"", name),
            ExpectedFact::ColumnDefined {
                column,
                data_type,
                not_null,
            } => {
                write!(f, "\"{}\" {}", column, data_type)?;
                if *not_null {
                    write!(f, " not null")?;
                }
                Ok(())
            }
            ExpectedFact::Contains { text } => write!(f, "contains \"{}\"", text),
            ExpectedFact::Pattern { regex } => write!(f, "pattern /{}/", regex),
        }
    }
}

#[cfg(test)]
#[path = "fact_test.rs"]
mod tests;
