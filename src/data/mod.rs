use std::fmt;

/// A Linear issue assigned to the current user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub id: String,
    pub identifier: String, // e.g., "ENG-123"
    pub title: String,
    pub url: Option<String>,
}

impl Issue {
    pub fn new(id: impl Into<String>, identifier: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            identifier: identifier.into(),
            title: title.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Opaque identifier of the authenticated Linear user (the GraphQL `viewer`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
