pub mod linear;

use crate::data::{Issue, UserId};
use anyhow::{Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Shared HTTP client for all API requests to enable connection pooling
pub static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(2)
        .build()
        .expect("Failed to create HTTP client")
});

/// Where issues come from. Two sequential calls, no state kept between them.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Resolve the user the credentials belong to.
    async fn identify(&self) -> Result<UserId>;

    /// Issues assigned to `user`, in the order the API returns them.
    async fn fetch_assigned(&self, user: &UserId) -> Result<Vec<Issue>>;
}

/// "Fetch my issues": identify the viewer, then fetch what is assigned to them.
///
/// Callers get a single failure regardless of which of the two calls failed.
pub async fn fetch_my_issues(source: &dyn IssueSource) -> Result<Vec<Issue>> {
    let me = source
        .identify()
        .await
        .context("Failed to identify current user")?;
    tracing::debug!(user = %me, "Identified viewer");

    let issues = source
        .fetch_assigned(&me)
        .await
        .with_context(|| format!("Failed to fetch issues assigned to {}", me))?;
    tracing::debug!(count = issues.len(), "Fetched assigned issues");

    Ok(issues)
}
