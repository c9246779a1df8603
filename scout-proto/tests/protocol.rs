//! Acceptance tests for the protocol crate.
//!
//! Tests cover:
//! - Trait object safety of KeyValueStore (Box/Arc<dyn ..> is Send + Sync)
//! - ProfileLookup through a shared Arc
//! - Query validation at the type boundary

use scout_proto::*;
use std::sync::Arc;

fn _assert_send_sync<T: Send + Sync>() {}

#[test]
fn key_value_store_is_object_safe_send_sync() {
    _assert_send_sync::<Box<dyn KeyValueStore>>();
    _assert_send_sync::<Arc<dyn KeyValueStore>>();
}

#[test]
fn errors_are_send_sync() {
    _assert_send_sync::<LookupError>();
    _assert_send_sync::<StoreError>();
    _assert_send_sync::<SearchError>();
}

struct FixedLookup;

impl ProfileLookup for FixedLookup {
    async fn fetch(
        &self,
        query: &SearchQuery,
        cancel: CancellationToken,
    ) -> Result<Profile, LookupError> {
        if cancel.is_cancelled() {
            return Err(LookupError::Cancelled);
        }
        Ok(Profile::new(query.as_str()))
    }
}

#[tokio::test]
async fn lookup_works_through_arc() {
    let lookup = Arc::new(FixedLookup);
    let q = SearchQuery::parse("octocat").unwrap();

    let p = lookup.fetch(&q, CancellationToken::new()).await.unwrap();
    assert_eq!(p.login, "octocat");
}

#[tokio::test]
async fn lookup_honors_a_fired_token() {
    let q = SearchQuery::parse("octocat").unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let err = FixedLookup.fetch(&q, token).await.unwrap_err();
    assert!(err.is_cancelled());
}

#[test]
fn query_parse_via_from_str() {
    let q: SearchQuery = " torvalds ".parse().unwrap();
    assert_eq!(q.to_string(), "torvalds");
    assert!("".parse::<SearchQuery>().is_err());
}
