//! # scout-proto: protocol traits for cancellable profile search
//!
//! This crate defines the two boundaries a search coordinator talks to,
//! plus the values that flow across them.
//!
//! ## The Protocols
//!
//! | Protocol | Trait | What it does |
//! |----------|-------|-------------|
//! | ① Lookup | [`ProfileLookup`] | Fetch one profile by username, honoring cancellation |
//! | ② Storage | [`KeyValueStore`] | Remember small strings across restarts |
//!
//! ## The Values
//!
//! | Type | What it is |
//! |------|-----------|
//! | [`SearchQuery`] | A trimmed, non-empty username |
//! | [`Profile`] | The fetched record, typed where the UI needs it, opaque elsewhere |
//! | [`LookupError`], [`StoreError`], [`SearchError`] | One error enum per boundary |
//!
//! ## Design Principle
//!
//! Both traits are operation-defined, not mechanism-defined.
//! [`ProfileLookup::fetch`] means "find this user", not "issue a GET".
//! An HTTP client, a cache, and a scripted fake for tests all implement
//! the same trait, and the coordinator cannot tell them apart.
//!
//! ## Trait Shapes
//!
//! [`ProfileLookup`] uses return-position `impl Future` and is not
//! object-safe; the coordinator is generic over it. [`KeyValueStore`]
//! uses `async-trait` so that stores can be swapped at runtime behind
//! `Arc<dyn KeyValueStore>`.

#![deny(missing_docs)]

pub mod error;
pub mod lookup;
pub mod profile;
pub mod query;
pub mod store;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use error::{LookupError, SearchError, StoreError};
pub use lookup::ProfileLookup;
pub use profile::Profile;
pub use query::SearchQuery;
pub use store::KeyValueStore;
pub use tokio_util::sync::CancellationToken;
