//! Hosted database management API client

use crate::error::{DbError, DbResult};
use crate::traits::{QueryEndpoint, QueryResponse};
use async_trait::async_trait;
use mc_core::ApiConfig;
use serde::Serialize;
use std::time::Duration;

/// Request body accepted by the `database/query` endpoint
#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

/// Client for `POST {base_url}/v1/projects/{ref}/database/query`
pub struct ManagementApiClient {
    client: reqwest::Client,
    base_url: String,
    project_ref: String,
    token: String,
}

impl std::fmt::Debug for ManagementApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagementApiClient")
            .field("base_url", &self.base_url)
            .field("project_ref", &self.project_ref)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ManagementApiClient {
    /// Create a client with an explicit token
    pub fn new(
        base_url: impl Into<String>,
        project_ref: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> DbResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project_ref: project_ref.into(),
            token: token.into(),
        })
    }

    /// Create a client from config, reading the token from the environment.
    ///
    /// `project_ref` overrides `api.project_ref` when given.
    pub fn from_config(api: &ApiConfig, project_ref: Option<&str>) -> DbResult<Self> {
        let project_ref = project_ref
            .or(api.project_ref.as_deref())
            .filter(|r| !r.trim().is_empty())
            .ok_or(DbError::MissingProjectRef)?;
        let token = token_from_env(&api.token_env)?;
        Self::new(
            api.base_url.as_str(),
            project_ref,
            token,
            Duration::from_secs(api.timeout_secs),
        )
    }

    /// Full URL of the query endpoint
    pub fn query_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/database/query",
            self.base_url, self.project_ref
        )
    }
}

#[async_trait]
impl QueryEndpoint for ManagementApiClient {
    async fn run_query(&self, sql: &str) -> DbResult<QueryResponse> {
        let url = self.query_url();
        log::info!("POST {} ({} bytes of SQL)", url, sql.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&QueryRequest { query: sql })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        log::debug!("Management API answered {} with {} bytes", status, body.len());

        Ok(QueryResponse {
            status,
            body: body.trim().to_string(),
        })
    }

    fn describe(&self) -> String {
        format!("management API project {}", self.project_ref)
    }
}

/// Read a bearer token from `var`, treating blank values as unset
pub fn token_from_env(var: &str) -> DbResult<String> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(DbError::MissingCredential {
            var: var.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "management_test.rs"]
mod tests;
