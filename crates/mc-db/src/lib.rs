//! mc-db - Remote query endpoint for migcheck
//!
//! This crate provides the `QueryEndpoint` trait and an implementation
//! backed by a hosted database's management HTTP API. The structural
//! validator never depends on it.

pub mod error;
pub mod management;
pub mod traits;

pub use error::{DbError, DbResult};
pub use management::{token_from_env, ManagementApiClient};
pub use traits::{QueryEndpoint, QueryResponse};
