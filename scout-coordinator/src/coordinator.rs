//! The search coordinator: one live request, versioned settlement.

use std::sync::Arc;

use parking_lot::Mutex;
use scout_proto::{
    KeyValueStore, LookupError, Profile, ProfileLookup, SearchError, SearchQuery,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::CoordinatorConfig;
use crate::state::{SearchEvent, SearchState};

/// How a submission ended, from the caller's point of view.
///
/// The visible result is always read from [`SearchCoordinator::state`];
/// this only says whether this particular submission got to set it.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response became the visible state.
    Applied,
    /// A newer submit, or [`SearchCoordinator::cancel`], took over first.
    /// The response was discarded.
    Superseded,
    /// The lookup gave up on its own while still live; the state went
    /// back to what was shown before the search.
    Aborted,
    /// The input was rejected before any request was made.
    Rejected(SearchError),
}

/// The live-request slot. `version` only ever grows.
#[derive(Default)]
struct Live {
    version: u64,
    token: Option<CancellationToken>,
    /// Profile on screen before the current run of searches started.
    shown: Option<Profile>,
}

/// Everything a request needs to settle or be abandoned without the lookup.
struct Shared {
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    live: Mutex<Live>,
    state: watch::Sender<SearchState>,
    /// Version of the newest query written to the store.
    persisted: tokio::sync::Mutex<u64>,
}

impl Shared {
    fn publish(&self, event: SearchEvent) {
        self.state.send_if_modified(|state| {
            let next = state.apply(event);
            if next == *state {
                return false;
            }
            *state = next;
            true
        });
    }

    /// Abandon `version` if it is still the live request.
    fn abandon(&self, version: u64) {
        let mut live = self.live.lock();
        if live.version != version {
            return;
        }
        live.version += 1;
        if let Some(token) = live.token.take() {
            token.cancel();
        }
        self.publish(SearchEvent::Aborted(live.shown.take()));
        tracing::debug!(version, "search abandoned by its caller");
    }

    /// Version-ordered write: an older query never replaces a newer one.
    async fn write_last_search(&self, query: &SearchQuery, version: u64) {
        let mut newest = self.persisted.lock().await;
        if *newest > version {
            return;
        }
        match self.store.set(&self.storage_key, query.as_str()).await {
            Ok(()) => *newest = version,
            Err(e) => tracing::warn!(
                key = %self.storage_key,
                query = %query,
                error = %e,
                "failed to persist last search"
            ),
        }
    }

    /// Persist from a spawned task, for callers that cannot await.
    fn persist_detached(self: &Arc<Self>, query: SearchQuery, version: u64) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(query = %query, "no runtime to persist last search");
            return;
        };
        let shared = Arc::clone(self);
        runtime.spawn(async move {
            shared.write_last_search(&query, version).await;
        });
    }
}

/// A started search.
///
/// Dropping a ticket before it settles abandons the request the way
/// [`SearchCoordinator::cancel`] would; dropping it before its query was
/// written hands the write to a spawned task.
struct Ticket {
    version: u64,
    query: SearchQuery,
    token: CancellationToken,
    shared: Arc<Shared>,
    settled: bool,
    persisted: bool,
}

impl Drop for Ticket {
    fn drop(&mut self) {
        if !self.settled {
            self.shared.abandon(self.version);
        }
        if !self.persisted {
            self.shared.persist_detached(self.query.clone(), self.version);
        }
    }
}

/// Owns the search state and the lifecycle of the one live request.
///
/// Every [`submit`](Self::submit) takes a fresh version number and cancels
/// the token of the request before it. When a response arrives it is
/// applied only if its version is still the current one, so a slow,
/// stale response can never overwrite a newer one no matter the order in
/// which the network delivers them.
///
/// State changes are published on a [`watch`] channel; see
/// [`subscribe`](Self::subscribe).
pub struct SearchCoordinator<L> {
    lookup: L,
    config: CoordinatorConfig,
    shared: Arc<Shared>,
}

impl<L: ProfileLookup> SearchCoordinator<L> {
    /// Create an idle coordinator. Does not touch the store.
    pub fn new(lookup: L, store: Arc<dyn KeyValueStore>, config: CoordinatorConfig) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        let shared = Arc::new(Shared {
            store,
            storage_key: config.storage_key.clone(),
            live: Mutex::new(Live::default()),
            state,
            persisted: tokio::sync::Mutex::new(0),
        });
        Self {
            lookup,
            config,
            shared,
        }
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }

    /// A receiver that observes every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    /// The configuration this coordinator was built with.
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// The lookup this coordinator calls.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Search for `raw` and wait until the request settles.
    ///
    /// Blank input is rejected without a state change or a request.
    /// Otherwise the state becomes `Searching` before the first await,
    /// any earlier request is cancelled, and the query is written to the
    /// store once this request settles, whatever its outcome.
    ///
    /// Calling `submit` again while this one is pending does not wait
    /// for it; the newer call supersedes it. Dropping the returned future
    /// early abandons the request like [`cancel`](Self::cancel) does.
    pub async fn submit(&self, raw: &str) -> SearchOutcome {
        match self.begin(raw) {
            Ok(ticket) => self.complete(ticket).await,
            Err(e) => SearchOutcome::Rejected(e),
        }
    }

    /// Abandon the live request, if any.
    ///
    /// The state goes back to the profile shown before the search, or to
    /// `Idle` if there was none. No error is shown. The abandoned
    /// request's query is still written to the store when it settles.
    pub fn cancel(&self) {
        let mut live = self.shared.live.lock();
        if let Some(token) = live.token.take() {
            live.version += 1;
            token.cancel();
            self.shared.publish(SearchEvent::Aborted(live.shown.take()));
            tracing::debug!(version = live.version, "search cancelled");
        }
    }

    /// Validate, supersede, and publish `Searching`. No await points.
    fn begin(&self, raw: &str) -> Result<Ticket, SearchError> {
        let query = SearchQuery::parse(raw)?;
        let token = CancellationToken::new();

        let mut live = self.shared.live.lock();
        live.version += 1;
        if let Some(previous) = live.token.replace(token.clone()) {
            previous.cancel();
        }
        let before = self.shared.state.borrow().clone();
        match before {
            SearchState::Searching(_) => {}
            SearchState::Succeeded(profile) => live.shown = Some(profile),
            SearchState::Idle | SearchState::Failed(_) => live.shown = None,
        }
        // Published under the lock so state order follows version order.
        self.shared.publish(SearchEvent::Started(query.clone()));
        let version = live.version;
        drop(live);

        tracing::debug!(query = %query, version, "search started");
        Ok(Ticket {
            version,
            query,
            token,
            shared: Arc::clone(&self.shared),
            settled: false,
            persisted: false,
        })
    }

    /// Run the lookup for a started search, settle it, persist the query.
    async fn complete(&self, mut ticket: Ticket) -> SearchOutcome {
        let result = self.lookup.fetch(&ticket.query, ticket.token.clone()).await;
        let outcome = self.settle(&mut ticket, result);
        self.persist(&mut ticket).await;
        outcome
    }

    /// Apply a response if, and only if, it belongs to the live version.
    fn settle(&self, ticket: &mut Ticket, result: Result<Profile, LookupError>) -> SearchOutcome {
        ticket.settled = true;
        let mut live = self.shared.live.lock();
        if live.version != ticket.version {
            tracing::trace!(
                query = %ticket.query,
                version = ticket.version,
                current = live.version,
                "discarding stale response"
            );
            return SearchOutcome::Superseded;
        }
        live.token = None;
        let shown = live.shown.take();

        match result {
            Ok(profile) => {
                tracing::debug!(query = %ticket.query, version = ticket.version, "search succeeded");
                self.shared.publish(SearchEvent::Resolved(profile));
                SearchOutcome::Applied
            }
            Err(e) if e.is_cancelled() => {
                tracing::debug!(query = %ticket.query, version = ticket.version, "search aborted");
                self.shared.publish(SearchEvent::Aborted(shown));
                SearchOutcome::Aborted
            }
            Err(e) => {
                tracing::debug!(query = %ticket.query, version = ticket.version, error = %e, "search failed");
                self.shared
                    .publish(SearchEvent::Rejected(self.config.failure_message.clone()));
                SearchOutcome::Applied
            }
        }
    }

    /// Write the ticket's query unless a newer one is already stored.
    ///
    /// A failed write is logged and not retried.
    async fn persist(&self, ticket: &mut Ticket) {
        self.shared
            .write_last_search(&ticket.query, ticket.version)
            .await;
        ticket.persisted = true;
    }
}

impl<L: ProfileLookup + 'static> SearchCoordinator<L> {
    /// Create a coordinator and resume the stored search, if any.
    ///
    /// When [`CoordinatorConfig::hydrate`] is set and the store holds a
    /// non-blank query, exactly one search for it is started before this
    /// returns (the state is already `Searching`). A store read failure
    /// is logged and the coordinator starts idle.
    pub async fn open(
        lookup: L,
        store: Arc<dyn KeyValueStore>,
        config: CoordinatorConfig,
    ) -> Arc<Self> {
        let coordinator = Arc::new(Self::new(lookup, store, config));
        if coordinator.config.hydrate {
            coordinator.hydrate().await;
        }
        coordinator
    }

    /// Read the stored query once and start a search for it.
    ///
    /// Returns the handle of the started search, or `None` if nothing
    /// usable was stored.
    pub async fn hydrate(self: &Arc<Self>) -> Option<JoinHandle<SearchOutcome>> {
        match self.shared.store.get(&self.config.storage_key).await {
            Ok(Some(last)) => {
                let handle = self.spawn_submit(&last);
                if handle.is_some() {
                    tracing::debug!(query = %last.trim(), "resuming last search");
                }
                handle
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key = %self.config.storage_key, error = %e, "failed to read last search");
                None
            }
        }
    }

    /// Start a search now and drive it on a tokio task.
    ///
    /// The state is `Searching` when this returns. Returns `None` (and
    /// changes nothing) for blank input. Aborting the returned handle
    /// abandons the search like [`cancel`](Self::cancel) does.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn_submit(self: &Arc<Self>, raw: &str) -> Option<JoinHandle<SearchOutcome>> {
        match self.begin(raw) {
            Ok(ticket) => {
                let this = Arc::clone(self);
                Some(tokio::spawn(async move { this.complete(ticket).await }))
            }
            Err(e) => {
                tracing::trace!(error = %e, "ignoring blank search");
                None
            }
        }
    }
}
