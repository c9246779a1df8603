//! The fetched profile record.

use serde::{Deserialize, Serialize};

/// A user profile as returned by a [`ProfileLookup`](crate::ProfileLookup).
///
/// The named fields are the ones a profile card renders. Every other
/// field the service sent is kept verbatim in [`extra`](Self::extra), so
/// nothing is lost when a profile is cached or re-serialized. The
/// coordinator never looks inside; to it a profile is just a value.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Account handle.
    pub login: String,
    /// Display name, if the user set one.
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Free-form biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Number of public repositories.
    #[serde(default)]
    pub public_repos: u64,
    /// Follower count.
    #[serde(default)]
    pub followers: u64,
    /// Following count.
    #[serde(default)]
    pub following: u64,
    /// Everything else in the payload.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Profile {
    /// Create a profile with only a login set.
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            name: None,
            avatar_url: None,
            bio: None,
            public_repos: 0,
            followers: 0,
            following: 0,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the public repository count.
    #[must_use]
    pub fn with_public_repos(mut self, count: u64) -> Self {
        self.public_repos = count;
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The name to show: display name if present, otherwise the login.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_payload_fills_defaults() {
        let p: Profile = serde_json::from_value(json!({"login": "alice", "public_repos": 5})).unwrap();
        assert_eq!(p, Profile::new("alice").with_public_repos(5));
        assert_eq!(p.followers, 0);
        assert!(p.bio.is_none());
    }

    #[test]
    fn unknown_fields_are_kept() {
        let p: Profile = serde_json::from_value(json!({
            "login": "octocat",
            "id": 583231,
            "type": "User",
            "bio": null
        }))
        .unwrap();
        assert_eq!(p.extra.get("id"), Some(&json!(583231)));
        assert_eq!(p.extra.get("type"), Some(&json!("User")));
        assert!(!p.extra.contains_key("login"));

        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["id"], json!(583231));
    }

    #[test]
    fn display_name_falls_back_to_login() {
        assert_eq!(Profile::new("bob").display_name(), "bob");
        assert_eq!(Profile::new("bob").with_name("Bob B").display_name(), "Bob B");
    }

    #[test]
    fn missing_login_is_rejected() {
        let err = serde_json::from_value::<Profile>(json!({"name": "nobody"}));
        assert!(err.is_err());
    }
}
