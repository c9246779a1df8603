//! ScriptedLookup: canned per-query outcomes with controllable timing.

use crate::error::LookupError;
use crate::lookup::ProfileLookup;
use crate::profile::Profile;
use crate::query::SearchQuery;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
struct Script {
    outcome: Result<Profile, LookupError>,
    gate: Option<Arc<Notify>>,
}

/// A [`ProfileLookup`] that answers from a script instead of a network.
///
/// Queries without a script fail with [`LookupError::NotFound`]. A
/// *gated* query does not resolve until [`release`](Self::release) is
/// called for it, which lets a test decide the order in which responses
/// arrive. By default a pending fetch resolves with
/// [`LookupError::Cancelled`] as soon as its token fires; build with
/// [`ignoring_cancellation`](Self::ignoring_cancellation) to model a
/// service that finishes anyway, so stale results really do arrive late.
pub struct ScriptedLookup {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<String>>,
    honor_cancellation: bool,
}

impl ScriptedLookup {
    /// Create a lookup with no scripts.
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            honor_cancellation: true,
        }
    }

    /// Answer `query` with `profile`.
    #[must_use]
    pub fn found(mut self, query: &str, profile: Profile) -> Self {
        self.scripts.insert(
            query.to_owned(),
            Script {
                outcome: Ok(profile),
                gate: None,
            },
        );
        self
    }

    /// Answer `query` with `error`.
    #[must_use]
    pub fn failing(mut self, query: &str, error: LookupError) -> Self {
        self.scripts.insert(
            query.to_owned(),
            Script {
                outcome: Err(error),
                gate: None,
            },
        );
        self
    }

    /// Hold the answer for `query` until [`release`](Self::release).
    ///
    /// Applies to a script added earlier; an unscripted query is gated
    /// with a not-found outcome.
    #[must_use]
    pub fn gated(mut self, query: &str) -> Self {
        let script = self.scripts.entry(query.to_owned()).or_insert_with(|| Script {
            outcome: Err(LookupError::NotFound(query.to_owned())),
            gate: None,
        });
        script.gate = Some(Arc::new(Notify::new()));
        self
    }

    /// Keep resolving fetches after their token fires.
    #[must_use]
    pub fn ignoring_cancellation(mut self) -> Self {
        self.honor_cancellation = false;
        self
    }

    /// Let one pending (or the next) fetch of a gated `query` resolve.
    pub fn release(&self, query: &str) {
        if let Some(gate) = self.scripts.get(query).and_then(|s| s.gate.as_ref()) {
            gate.notify_one();
        }
    }

    /// Every query fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of fetches so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

impl Default for ScriptedLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileLookup for ScriptedLookup {
    fn fetch(
        &self,
        query: &SearchQuery,
        cancel: CancellationToken,
    ) -> impl Future<Output = Result<Profile, LookupError>> + Send {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.to_string());
        }
        let script = self.scripts.get(query.as_str()).cloned().unwrap_or_else(|| Script {
            outcome: Err(LookupError::NotFound(query.to_string())),
            gate: None,
        });
        let honor_cancellation = self.honor_cancellation;

        async move {
            if honor_cancellation && cancel.is_cancelled() {
                return Err(LookupError::Cancelled);
            }
            if let Some(gate) = script.gate {
                if honor_cancellation {
                    tokio::select! {
                        _ = cancel.cancelled() => return Err(LookupError::Cancelled),
                        _ = gate.notified() => {}
                    }
                } else {
                    gate.notified().await;
                }
            }
            script.outcome
        }
    }
}
