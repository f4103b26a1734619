//! Validation report types

use crate::statements::SqlStatement;
use mc_core::ExpectedFact;
use serde::Serialize;

/// Outcome for one declared fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactOutcome {
    /// The fact as declared
    pub fact: ExpectedFact,

    /// Human-readable description
    pub label: String,

    /// Pattern searched for
    pub pattern: String,

    /// Whether the text satisfies the fact
    pub found: bool,
}

/// Ancillary counts computed from the split statements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatementStats {
    /// Non-blank, non-comment statements
    pub total_statements: usize,

    /// Statements whose leading keyword is `GRANT`
    pub grant_statements: usize,

    /// Statements containing `CREATE POLICY`
    pub policies: usize,
}

impl StatementStats {
    /// Count statements by category
    pub fn from_statements(statements: &[SqlStatement]) -> Self {
        Self {
            total_statements: statements.len(),
            grant_statements: statements.iter().filter(|s| s.is_grant()).count(),
            policies: statements.iter().filter(|s| s.is_create_policy()).count(),
        }
    }
}

/// Result of checking one migration text against a list of facts.
///
/// `outcomes` has exactly one entry per fact, in the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub outcomes: Vec<FactOutcome>,
    pub stats: StatementStats,
}

impl ValidationReport {
    /// Number of facts checked
    pub fn expected_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of facts satisfied
    pub fn found_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.found).count()
    }

    /// Missing facts in input order
    pub fn missing(&self) -> Vec<&FactOutcome> {
        self.outcomes.iter().filter(|o| !o.found).collect()
    }

    /// True when no fact is missing
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.found)
    }
}
