//! mc-core - Core library for migcheck
//!
//! This crate provides the declarative fact model, check suites, and
//! project configuration shared by the validator and the CLI.

pub mod checksum;
pub mod config;
pub mod error;
pub mod fact;
mod newtype_string;
pub mod project;
pub mod suite;
pub mod suite_name;

pub use checksum::migration_checksum;
pub use config::{ApiConfig, Config};
pub use error::{CoreError, CoreResult};
pub use fact::{ExpectedFact, FactKind};
pub use project::{read_migration, Project};
pub use suite::Suite;
pub use suite_name::SuiteName;
