//! Structural validation of migration text

use crate::error::SqlResult;
use crate::matcher::CompiledFact;
use crate::report::{FactOutcome, StatementStats, ValidationReport};
use crate::statements::split_statements;
use mc_core::ExpectedFact;

/// A reusable set of compiled facts.
///
/// Holds no state between runs; `validate` only reads its input, so one
/// validator can be shared across threads and called repeatedly.
#[derive(Debug, Clone)]
pub struct Validator {
    facts: Vec<CompiledFact>,
}

impl Validator {
    /// Compile the facts. Fails only on an invalid user-supplied pattern.
    pub fn new(facts: &[ExpectedFact]) -> SqlResult<Self> {
        let facts = facts
            .iter()
            .map(CompiledFact::compile)
            .collect::<SqlResult<Vec<_>>>()?;
        Ok(Self { facts })
    }

    /// Check migration text against every fact.
    ///
    /// Blank text satisfies nothing: every fact is reported missing, even a
    /// pattern that would match the empty string.
    pub fn validate(&self, text: &str) -> ValidationReport {
        if text.trim().is_empty() {
            log::debug!("Empty migration text; all {} facts missing", self.facts.len());
            return ValidationReport {
                outcomes: self.facts.iter().map(|f| outcome(f, false)).collect(),
                stats: StatementStats::default(),
            };
        }

        let statements = split_statements(text);
        let lowered = text.to_lowercase();

        let outcomes = self
            .facts
            .iter()
            .map(|f| {
                let found = f.is_satisfied(text, &lowered, &statements);
                if !found {
                    log::debug!("Missing fact: {}", f.label());
                }
                outcome(f, found)
            })
            .collect();

        ValidationReport {
            outcomes,
            stats: StatementStats::from_statements(&statements),
        }
    }
}

fn outcome(fact: &CompiledFact, found: bool) -> FactOutcome {
    FactOutcome {
        fact: fact.fact().clone(),
        label: fact.label().to_string(),
        pattern: fact.pattern(),
        found,
    }
}

/// Compile `facts` and check `text` in one call
pub fn validate(text: &str, facts: &[ExpectedFact]) -> SqlResult<ValidationReport> {
    Ok(Validator::new(facts)?.validate(text))
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
