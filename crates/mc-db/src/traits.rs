//! Query endpoint trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Raw HTTP outcome of a submitted query.
///
/// Non-2xx statuses are data, not errors: the caller decides how to report
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub status: u16,
    pub body: String,
}

impl QueryResponse {
    /// True for any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// At most `max_chars` characters of the body
    pub fn body_preview(&self, max_chars: usize) -> &str {
        match self.body.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.body[..idx],
            None => &self.body,
        }
    }
}

/// Something that can run a SQL payload remotely.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait QueryEndpoint: Send + Sync {
    /// Submit `sql` as a single query payload
    async fn run_query(&self, sql: &str) -> DbResult<QueryResponse>;

    /// Endpoint description for logs
    fn describe(&self) -> String;
}
