//! Query value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user query to be planned and executed (Value Object)
///
/// Always non-blank; the original text is kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Query {
    text: String,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyQuery);
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for Query {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Query::new(value)
    }
}

impl TryFrom<&str> for Query {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Query::new(value)
    }
}

impl From<Query> for String {
    fn from(query: Query) -> Self {
        query.text
    }
}
