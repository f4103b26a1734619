//! Compile declared facts into text matchers
//!
//! Every generated pattern is case-insensitive, accepts `\s+` wherever the
//! SQL has whitespace, and accepts identifiers with or without double
//! quotes. Key tokens still have to appear in order.

use crate::error::{SqlError, SqlResult};
use crate::statements::{SqlStatement, CREATE_POLICY_PATTERN};
use mc_core::ExpectedFact;
use regex::{Regex, RegexBuilder};

/// How a fact is decided against migration text
#[derive(Debug, Clone)]
pub(crate) enum Matcher {
    /// Regex over the full text
    Text(Regex),
    /// Lowercased literal over the lowercased full text
    Literal(String),
    /// Regex that must match within a single statement
    Statement(Regex),
}

/// A fact together with the matcher that decides it
#[derive(Debug, Clone)]
pub struct CompiledFact {
    fact: ExpectedFact,
    label: String,
    matcher: Matcher,
}

impl CompiledFact {
    /// Compile a fact. Only user-supplied `pattern` facts can fail.
    pub fn compile(fact: &ExpectedFact) -> SqlResult<Self> {
        let matcher = match fact {
            ExpectedFact::TableCreated { table, schema } => Matcher::Text(build(&format!(
                r"\bcreate\s+(?:or\s+replace\s+)?(?:(?:global\s+|local\s+)?(?:temporary|temp)\s+|unlogged\s+)?table\s+(?:if\s+not\s+exists\s+)?{}",
                qualified(schema.as_deref(), table)
            ))?),
            ExpectedFact::ColumnAdded {
                table,
                column,
                data_type,
                schema,
            } => Matcher::Text(build(&format!(
                r"{}\s+add\s+(?:column\s+)?(?:if\s+not\s+exists\s+)?{}\s+{}",
                alter_table(schema.as_deref(), table),
                ident(column),
                type_name(data_type)
            ))?),
            ExpectedFact::ConstraintPresent { name } => {
                Matcher::Text(build(&format!(r"\bconstraint\s+{}", ident(name)))?)
            }
            ExpectedFact::RlsEnabled { table, schema } => Matcher::Text(build(&format!(
                r"{}\s+enable\s+row\s+level\s+security",
                alter_table(schema.as_deref(), table)
            ))?),
            ExpectedFact::PolicyCreated { table, schema } => {
                // The table must follow the policy name, not appear in its text
                let pattern = match table {
                    Some(table) => format!(
                        r#"\bcreate\s+policy\s+(?:"(?:[^"]|"")*"|\w+)\s+on\s+{}"#,
                        qualified(schema.as_deref(), table)
                    ),
                    None => CREATE_POLICY_PATTERN.to_string(),
                };
                Matcher::Statement(build(&pattern)?)
            }
            ExpectedFact::ExtensionPresent { name } => Matcher::Text(build(&format!(
                r"\bcreate\s+extension\s+(?:if\s+not\s+exists\s+)?{}",
                ident(name)
            ))?),
            ExpectedFact::ColumnDefined {
                column,
                data_type,
                not_null,
            } => {
                let mut pattern = format!(r"{}\s+{}", ident(column), type_name(data_type));
                if *not_null {
                    pattern.push_str(r"\s+not\s+null");
                }
                Matcher::Text(build(&pattern)?)
            }
            ExpectedFact::Contains { text } => Matcher::Literal(text.to_lowercase()),
            ExpectedFact::Pattern { regex } => Matcher::Text(build(regex)?),
        };

        Ok(Self {
            fact: fact.clone(),
            label: fact.to_string(),
            matcher,
        })
    }

    /// The fact this matcher decides
    pub fn fact(&self) -> &ExpectedFact {
        &self.fact
    }

    /// Human-readable description of the fact
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The pattern actually searched for, as shown in reports
    pub fn pattern(&self) -> String {
        match &self.matcher {
            Matcher::Text(re) | Matcher::Statement(re) => re.as_str().to_string(),
            Matcher::Literal(needle) => needle.clone(),
        }
    }

    /// Decide the fact against prepared input.
    ///
    /// `lowered` must be `text.to_lowercase()`; it is computed once per run
    /// rather than once per fact.
    pub(crate) fn is_satisfied(
        &self,
        text: &str,
        lowered: &str,
        statements: &[SqlStatement],
    ) -> bool {
        match &self.matcher {
            Matcher::Text(re) => re.is_match(text),
            Matcher::Literal(needle) => lowered.contains(needle.as_str()),
            Matcher::Statement(re) => statements.iter().any(|stmt| re.is_match(stmt.text())),
        }
    }
}

fn build(pattern: &str) -> SqlResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| SqlError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// `"name"` or a bare `name` on word boundaries
fn ident(name: &str) -> String {
    let escaped = regex::escape(name);
    format!(r#"(?:"{0}"|\b{0}\b)"#, escaped)
}

/// Table reference. When a schema is given, the text may qualify the table
/// with exactly that schema or leave it unqualified.
fn qualified(schema: Option<&str>, table: &str) -> String {
    match schema {
        Some(s) => format!(r"(?:{}\s*\.\s*)?{}", ident(s), ident(table)),
        None => format!(r"(?:{}\s*\.\s*)?{}", r#"(?:"[^"]+"|\w+)"#, ident(table)),
    }
}

fn alter_table(schema: Option<&str>, table: &str) -> String {
    format!(
        r"\balter\s+table\s+(?:if\s+exists\s+)?(?:only\s+)?{}",
        qualified(schema, table)
    )
}

/// Type name as a prefix of the written type, with flexible inner spacing
fn type_name(data_type: &str) -> String {
    data_type
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
