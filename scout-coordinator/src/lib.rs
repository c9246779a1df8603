#![deny(missing_docs)]
//! Search coordinator for scout.
//!
//! [`SearchCoordinator`] accepts usernames, keeps exactly one lookup
//! live, and publishes a four-state machine ([`SearchState`]) for a UI
//! to render:
//!
//! ```text
//!            submit(q)                success
//!   Idle ───────────────▶ Searching ─────────▶ Succeeded
//!    ▲                     │  │  ▲                 │
//!    │ cancel()            │  │  └─ submit(q2) ────┤
//!    └─────────────────────┘  │    (old cancelled) │
//!                             └─────────▶ Failed ──┘
//!                               failure
//! ```
//!
//! A cancelled search falls back to the profile that was on screen when
//! it started, or to `Idle` when there was none.
//!
//! Liveness is decided by a request version, not by the cancellation
//! token: the token only asks the lookup to stop its I/O, the version
//! decides whether a response may touch the state. The last attempted
//! query goes to a [`KeyValueStore`](scout_proto::KeyValueStore) and is
//! resumed by [`SearchCoordinator::open`].
//!
//! [`Debouncer`] is an optional layer for type-ahead input.

pub mod config;
pub mod coordinator;
pub mod debounce;
pub mod state;

pub use config::{CoordinatorConfig, DebounceConfig};
pub use coordinator::{SearchCoordinator, SearchOutcome};
pub use debounce::Debouncer;
pub use state::{SearchEvent, SearchState};
