//! mc-sql - Structural SQL checks for migcheck
//!
//! This crate splits migration text into statements with the sqlparser
//! tokenizer and decides which declared facts the text satisfies. It never
//! touches a database or the network.

pub mod error;
pub mod matcher;
pub mod report;
pub mod statements;
pub mod validator;

pub use error::{SqlError, SqlResult};
pub use matcher::CompiledFact;
pub use report::{FactOutcome, StatementStats, ValidationReport};
pub use statements::{split_statements, SqlStatement};
pub use validator::{validate, Validator};
