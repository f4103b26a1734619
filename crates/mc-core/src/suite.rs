//! Check suites: a migration file bound to the facts it must satisfy

use crate::error::{CoreError, CoreResult};
use crate::fact::ExpectedFact;
use serde::{Deserialize, Serialize};

/// A named group of facts checked against one migration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Suite {
    /// Migration file, relative to `migrations_dir` unless absolute
    pub migration: String,

    /// Free-form description shown by `mc ls`
    #[serde(default)]
    pub description: Option<String>,

    /// Schema override for facts in this suite
    #[serde(default)]
    pub schema: Option<String>,

    /// Shorthand: each table must be created and have RLS enabled
    #[serde(default)]
    pub tables_with_rls: Vec<String>,

    /// Shorthand: at least one `CREATE POLICY` must be present
    #[serde(default)]
    pub require_policies: bool,

    /// Explicit facts, checked after the shorthand expansions
    #[serde(default)]
    pub facts: Vec<ExpectedFact>,
}

impl Suite {
    /// Create a suite for a migration with an explicit fact list
    pub fn new(migration: impl Into<String>, facts: Vec<ExpectedFact>) -> Self {
        Self {
            migration: migration.into(),
            description: None,
            schema: None,
            tables_with_rls: Vec::new(),
            require_policies: false,
            facts,
        }
    }

    /// Expand shorthands and apply the schema default.
    ///
    /// Order is fixed: every `table_created` for `tables_with_rls`, then every
    /// `rls_enabled`, then the policy requirement, then explicit facts.
    pub fn expected_facts(&self, default_schema: &str) -> Vec<ExpectedFact> {
        let schema = self.schema.as_deref().unwrap_or(default_schema);

        let created = self
            .tables_with_rls
            .iter()
            .map(|t| ExpectedFact::table_created(t.as_str()));
        let rls = self
            .tables_with_rls
            .iter()
            .map(|t| ExpectedFact::rls_enabled(t.as_str()));
        let policies = self
            .require_policies
            .then(ExpectedFact::any_policy)
            .into_iter();

        created
            .chain(rls)
            .chain(policies)
            .chain(self.facts.iter().cloned())
            .map(|f| f.with_default_schema(schema))
            .collect()
    }

    /// Check the suite is usable: a migration path and at least one fact
    pub fn validate(&self, name: &str) -> CoreResult<()> {
        if self.migration.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: format!("Suite '{}' has an empty 'migration' path", name),
            });
        }

        if self.tables_with_rls.is_empty() && !self.require_policies && self.facts.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: format!("Suite '{}' declares no facts", name),
            });
        }

        if let Some(t) = self.tables_with_rls.iter().find(|t| t.trim().is_empty()) {
            return Err(CoreError::ConfigInvalid {
                message: format!("Suite '{}' has a blank table name '{}'", name, t),
            });
        }

        for fact in &self.facts {
            fact.validate().map_err(|e| CoreError::ConfigInvalid {
                message: format!("Suite '{}': {}", name, e),
            })?;
        }

        Ok(())
    }

    /// Number of facts after shorthand expansion
    pub fn fact_count(&self) -> usize {
        self.tables_with_rls.len() * 2 + usize::from(self.require_policies) + self.facts.len()
    }
}

#[cfg(test)]
#[path = "suite_test.rs"]
mod tests;
