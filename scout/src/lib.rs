#![deny(missing_docs)]
//! # scout: umbrella crate
//!
//! Single import surface for scout: the protocol types, the search
//! coordinator, and the lookup and store implementations behind feature
//! flags, plus a `prelude` for the happy path.

#[cfg(feature = "core")]
pub use scout_coordinator;
#[cfg(feature = "github")]
pub use scout_github;
#[cfg(feature = "core")]
pub use scout_proto;
#[cfg(feature = "store-fs")]
pub use scout_store_fs;
#[cfg(feature = "store-memory")]
pub use scout_store_memory;

/// Happy-path imports for wiring a search.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use scout_proto::{
        CancellationToken, KeyValueStore, LookupError, Profile, ProfileLookup, SearchError,
        SearchQuery, StoreError,
    };

    #[cfg(feature = "core")]
    pub use scout_coordinator::{
        CoordinatorConfig, DebounceConfig, Debouncer, SearchCoordinator, SearchOutcome,
        SearchState,
    };

    #[cfg(feature = "github")]
    pub use scout_github::GitHub;

    #[cfg(feature = "store-memory")]
    pub use scout_store_memory::MemoryStore;

    #[cfg(feature = "store-fs")]
    pub use scout_store_fs::FsStore;
}
