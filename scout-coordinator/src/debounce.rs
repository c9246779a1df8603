//! Type-ahead search: submit only after input stops changing.
//!
//! The debouncer sits in front of a coordinator and never touches its
//! state machine; all it does is decide *when* to call
//! [`SearchCoordinator::spawn_submit`].

use std::sync::Arc;

use parking_lot::Mutex;
use scout_proto::ProfileLookup;
use tokio::task::JoinHandle;

use crate::config::DebounceConfig;
use crate::coordinator::{SearchCoordinator, SearchOutcome};

struct Pending {
    generation: u64,
    text: String,
    timer: JoinHandle<()>,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    pending: Option<Pending>,
}

struct Inner<L> {
    coordinator: Arc<SearchCoordinator<L>>,
    slot: Mutex<Slot>,
}

impl<L: ProfileLookup + 'static> Inner<L> {
    /// Called by a timer once its quiet period has passed.
    fn fire(&self, generation: u64) {
        let text = {
            let mut slot = self.slot.lock();
            match slot.pending.take_if(|p| p.generation == generation) {
                Some(pending) => pending.text,
                None => return,
            }
        };
        self.coordinator.spawn_submit(&text);
    }
}

/// Restartable quiet-period timer in front of a [`SearchCoordinator`].
///
/// Each [`input`](Self::input) replaces the pending text and restarts the
/// timer; only text that survives a full quiet period is submitted.
/// Dropping the debouncer discards whatever is pending.
pub struct Debouncer<L: ProfileLookup + 'static> {
    inner: Arc<Inner<L>>,
    config: DebounceConfig,
}

impl<L: ProfileLookup + 'static> Debouncer<L> {
    /// Wrap `coordinator`.
    pub fn new(coordinator: Arc<SearchCoordinator<L>>, config: DebounceConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                coordinator,
                slot: Mutex::new(Slot::default()),
            }),
            config,
        }
    }

    /// Record the latest text and restart the quiet period.
    ///
    /// Blank text clears anything pending and schedules nothing.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn input(&self, text: &str) {
        let mut slot = self.inner.slot.lock();
        slot.generation += 1;
        if let Some(previous) = slot.pending.take() {
            previous.timer.abort();
        }
        if text.trim().is_empty() {
            return;
        }

        let generation = slot.generation;
        let quiet_period = self.config.quiet_period;
        let inner = Arc::clone(&self.inner);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            inner.fire(generation);
        });
        slot.pending = Some(Pending {
            generation,
            text: text.to_owned(),
            timer,
        });
    }

    /// Submit the pending text now instead of waiting out the timer.
    pub fn flush(&self) -> Option<JoinHandle<SearchOutcome>> {
        let pending = {
            let mut slot = self.inner.slot.lock();
            slot.generation += 1;
            slot.pending.take()?
        };
        pending.timer.abort();
        self.inner.coordinator.spawn_submit(&pending.text)
    }

    /// Text waiting for its quiet period to end, if any.
    pub fn pending(&self) -> Option<String> {
        self.inner.slot.lock().pending.as_ref().map(|p| p.text.clone())
    }

    /// The coordinator this debouncer feeds.
    pub fn coordinator(&self) -> &Arc<SearchCoordinator<L>> {
        &self.inner.coordinator
    }
}

impl<L: ProfileLookup + 'static> Drop for Debouncer<L> {
    fn drop(&mut self) {
        if let Some(pending) = self.inner.slot.lock().pending.take() {
            pending.timer.abort();
        }
    }
}
