//! Test utilities and fixtures for lin tests
#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use lin::data::{Issue, UserId};
use lin::integrations::IssueSource;
use lin::tui::{Message, Session};
use serde_json::{json, Value};
use std::sync::Mutex;

/// The two issues used throughout the picker scenarios
pub fn sample_issues() -> Vec<Issue> {
    vec![
        Issue::new("1", "ENG-1", "Fix bug"),
        Issue::new("2", "ENG-2", "Write docs"),
    ]
}

pub fn make_issues(n: usize) -> Vec<Issue> {
    (0..n)
        .map(|i| {
            Issue::new(format!("id-{i}"), format!("ENG-{i}"), format!("Issue {i}"))
                .with_url(format!("https://linear.app/test/issue/ENG-{i}"))
        })
        .collect()
}

/// A session that has already received `issues`
pub fn session_with(issues: Vec<Issue>) -> Session {
    let mut session = Session::new();
    session.update(Message::fetched(issues));
    session
}

/// Minimal valid `Viewer` query response
pub fn viewer_json() -> Value {
    json!({
        "data": {
            "viewer": {
                "id": "user-123",
                "name": "Test User",
                "email": "test@example.com"
            }
        }
    })
}

/// Minimal valid `UserIssues` query response
pub fn assigned_issues_json() -> Value {
    json!({
        "data": {
            "user": {
                "id": "user-123",
                "name": "Test User",
                "assignedIssues": {
                    "nodes": [
                        {
                            "id": "issue-1",
                            "identifier": "TEST-1",
                            "title": "First",
                            "url": "https://linear.app/test/issue/TEST-1"
                        },
                        {
                            "id": "issue-2",
                            "identifier": "TEST-2",
                            "title": "Second",
                            "url": ""
                        }
                    ]
                }
            }
        }
    })
}

/// In-memory issue source that records which user it was asked about
pub struct FakeSource {
    pub user: Result<UserId, String>,
    pub issues: Result<Vec<Issue>, String>,
    pub asked_for: Mutex<Vec<UserId>>,
}

impl FakeSource {
    pub fn ok(issues: Vec<Issue>) -> Self {
        Self {
            user: Ok(UserId("me".to_string())),
            issues: Ok(issues),
            asked_for: Mutex::new(Vec::new()),
        }
    }

    pub fn identify_fails(reason: &str) -> Self {
        Self {
            user: Err(reason.to_string()),
            ..Self::ok(vec![])
        }
    }

    pub fn fetch_fails(reason: &str) -> Self {
        Self {
            issues: Err(reason.to_string()),
            ..Self::ok(vec![])
        }
    }
}

#[async_trait]
impl IssueSource for FakeSource {
    async fn identify(&self) -> Result<UserId> {
        self.user.clone().map_err(anyhow::Error::msg)
    }

    async fn fetch_assigned(&self, user: &UserId) -> Result<Vec<Issue>> {
        self.asked_for.lock().unwrap().push(user.clone());
        self.issues.clone().map_err(anyhow::Error::msg)
    }
}
