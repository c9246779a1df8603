//! The validated search query.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A username submitted for lookup.
///
/// Always non-empty and free of surrounding whitespace. The only way to
/// obtain one is [`SearchQuery::parse`] (or the `TryFrom`/`FromStr`
/// impls that call it), so holding a `SearchQuery` proves the input
/// check already happened. Queries are replaced, never edited.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trim `raw` and accept it if anything is left.
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyInput);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SearchQuery {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for SearchQuery {
    type Error = SearchError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SearchQuery {
    type Error = SearchError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<SearchQuery> for String {
    fn from(q: SearchQuery) -> Self {
        q.0
    }
}
