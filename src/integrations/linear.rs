use crate::config::Config;
use crate::data::{Issue, UserId};
use crate::integrations::{IssueSource, HTTP_CLIENT};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const VIEWER_QUERY: &str = r#"
    query Viewer {
        viewer {
            id
            name
            email
        }
    }
"#;

const ASSIGNED_ISSUES_QUERY: &str = r#"
    query UserIssues($id: String!) {
        user(id: $id) {
            id
            name
            assignedIssues {
                nodes {
                    id
                    identifier
                    title
                    url
                }
            }
        }
    }
"#;

// Type-safe API response structures for Linear GraphQL API
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: Viewer,
}

#[derive(Debug, Deserialize)]
struct Viewer {
    id: String,
    #[allow(dead_code)]
    name: Option<String>,
    #[allow(dead_code)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    #[allow(dead_code)]
    id: String,
    assigned_issues: IssueConnection,
}

#[derive(Debug, Deserialize)]
struct IssueConnection {
    nodes: Vec<IssueNode>,
}

#[derive(Debug, Deserialize)]
struct IssueNode {
    id: String,
    identifier: String,
    title: String,
    url: Option<String>,
}

impl From<IssueNode> for Issue {
    fn from(node: IssueNode) -> Self {
        Issue {
            id: node.id,
            identifier: node.identifier,
            title: node.title,
            url: node.url.filter(|u| !u.is_empty()),
        }
    }
}

/// Linear GraphQL client authenticated with a personal API token.
#[derive(Debug, Clone)]
pub struct LinearClient {
    api_url: String,
    api_token: String,
    debug: bool,
}

impl LinearClient {
    pub fn new(api_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_token: api_token.into(),
            debug: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.linear.api_url, &config.auth.api_token)
    }

    /// Log request and response bodies at debug level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// POST a query and return the raw body of a 2xx response.
    async fn post_query(&self, query: &str, variables: serde_json::Value) -> Result<String> {
        let client = &*HTTP_CLIENT;
        let payload = serde_json::json!({ "query": query, "variables": variables });

        if self.debug {
            tracing::debug!(url = %self.api_url, body = %payload, "GraphQL request");
        }

        let response = client
            .post(&self.api_url)
            .header("Authorization", &self.api_token)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.api_url))?;

        let status = response.status();
        let body = response.text().await?;

        if self.debug {
            tracing::debug!(%status, body = %body, "GraphQL response");
        }

        if !status.is_success() {
            anyhow::bail!("Linear API returned {}: {}", status, error_summary(&body));
        }

        Ok(body)
    }
}

#[async_trait]
impl IssueSource for LinearClient {
    async fn identify(&self) -> Result<UserId> {
        let body = self.post_query(VIEWER_QUERY, serde_json::json!({})).await?;
        parse_viewer(&body)
    }

    async fn fetch_assigned(&self, user: &UserId) -> Result<Vec<Issue>> {
        let body = self
            .post_query(ASSIGNED_ISSUES_QUERY, serde_json::json!({ "id": user.as_str() }))
            .await?;
        parse_assigned_issues(&body, user)
    }
}

/// Unwrap a GraphQL envelope into its `data`, turning `errors` into a failure.
fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: GraphQLResponse<T> =
        serde_json::from_str(body).context("Malformed response from Linear API")?;

    let errors = envelope.errors.unwrap_or_default();
    match envelope.data {
        Some(data) => {
            for e in &errors {
                tracing::warn!("Linear API reported a partial error: {}", e.message);
            }
            Ok(data)
        }
        None => match errors.first() {
            Some(e) => anyhow::bail!("Linear API error: {}", e.message),
            None => anyhow::bail!("Malformed response from Linear API: missing data"),
        },
    }
}

fn issues_from_user_data(data: UserData, user: &UserId) -> Result<Vec<Issue>> {
    let user_node = data
        .user
        .with_context(|| format!("User {} not found", user))?;
    Ok(user_node
        .assigned_issues
        .nodes
        .into_iter()
        .map(Issue::from)
        .collect())
}

/// First GraphQL error message if the body carries one, else a prefix of the body.
fn error_summary(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<GraphQLResponse<serde_json::Value>>(body) {
        if let Some(e) = envelope.errors.as_ref().and_then(|errs| errs.first()) {
            return e.message.clone();
        }
    }
    body.chars().take(200).collect()
}

/// Parse a `Viewer` query response body into the viewer's id.
pub fn parse_viewer(body: &str) -> Result<UserId> {
    let data: ViewerData = parse_response(body)?;
    Ok(UserId(data.viewer.id))
}

/// Parse a `UserIssues` query response body into issues, in API order.
pub fn parse_assigned_issues(body: &str, user: &UserId) -> Result<Vec<Issue>> {
    let data: UserData = parse_response(body)?;
    issues_from_user_data(data, user)
}
