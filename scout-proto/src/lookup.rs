//! The Lookup protocol: how a profile is fetched for a query.

use crate::{error::LookupError, profile::Profile, query::SearchQuery};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Protocol ①: Lookup
///
/// Fetch the profile for one username.
///
/// Implementations:
/// - `GitHub`: the GitHub REST API over HTTPS
/// - `ScriptedLookup`: canned outcomes for tests (`test-utils`)
///
/// # Cancellation
///
/// The caller passes a [`CancellationToken`] per request. Once it fires,
/// the implementation must stop its underlying I/O and resolve promptly
/// with [`LookupError::Cancelled`] rather than hold on to the request.
/// Callers never need the result of a cancelled fetch, so returning
/// `Cancelled` even if a response was already in hand is fine.
///
/// This trait uses RPITIT and is NOT object-safe. The coordinator is
/// generic over its lookup.
pub trait ProfileLookup: Send + Sync {
    /// Fetch the profile for `query`, aborting when `cancel` fires.
    fn fetch(
        &self,
        query: &SearchQuery,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Profile, LookupError>> + Send;
}

impl<T: ProfileLookup> ProfileLookup for std::sync::Arc<T> {
    fn fetch(
        &self,
        query: &SearchQuery,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Profile, LookupError>> + Send {
        T::fetch(self, query, cancel)
    }
}
