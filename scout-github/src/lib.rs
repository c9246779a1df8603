#![deny(missing_docs)]
//! GitHub users API lookup for scout.
//!
//! [`GitHub`] implements [`scout_proto::ProfileLookup`] against
//! `GET /users/{login}`. A 404 becomes [`LookupError::NotFound`], any
//! other non-success status keeps its code and body, and a fired
//! cancellation token drops the in-flight request.
//!
//! ```no_run
//! use scout_github::GitHub;
//! use scout_proto::{CancellationToken, ProfileLookup, SearchQuery};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let github = GitHub::from_env();
//! let query = SearchQuery::parse("octocat")?;
//! let profile = github.fetch(&query, CancellationToken::new()).await?;
//! println!("{} has {} public repos", profile.display_name(), profile.public_repos);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub(crate) mod error;

pub use client::GitHub;

// Re-export the error type callers match on
pub use scout_proto::LookupError;
