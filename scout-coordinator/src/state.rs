//! The visible search state and its transition function.

use scout_proto::{Profile, SearchQuery};

/// What a UI should render right now. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    /// Nothing to show: no search yet, or a search was cancelled with no
    /// earlier profile to fall back to.
    #[default]
    Idle,
    /// A request for this query is in flight.
    Searching(SearchQuery),
    /// The most recent search found a profile.
    Succeeded(Profile),
    /// The most recent search failed; holds the user-facing message.
    Failed(String),
}

/// Input alphabet of [`SearchState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// A search for the query was issued.
    Started(SearchQuery),
    /// The live request produced a profile.
    Resolved(Profile),
    /// The live request failed; carries the message to show.
    Rejected(String),
    /// The live request was abandoned without a replacement; carries the
    /// profile that was on screen before the search, if any.
    Aborted(Option<Profile>),
}

impl SearchState {
    /// Total transition function.
    ///
    /// `Started` is accepted from every state. `Resolved`, `Rejected` and
    /// `Aborted` only move a `Searching` state; anywhere else they are
    /// ignored and the current state is returned unchanged.
    #[must_use]
    pub fn apply(&self, event: SearchEvent) -> SearchState {
        match (self, event) {
            (_, SearchEvent::Started(query)) => SearchState::Searching(query),
            (SearchState::Searching(_), SearchEvent::Resolved(profile)) => {
                SearchState::Succeeded(profile)
            }
            (SearchState::Searching(_), SearchEvent::Rejected(reason)) => {
                SearchState::Failed(reason)
            }
            (SearchState::Searching(_), SearchEvent::Aborted(shown)) => match shown {
                Some(profile) => SearchState::Succeeded(profile),
                None => SearchState::Idle,
            },
            (state, _) => state.clone(),
        }
    }

    /// Show a spinner.
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Searching(_))
    }

    /// Show this message.
    pub fn error(&self) -> Option<&str> {
        match self {
            SearchState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Show this profile.
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            SearchState::Succeeded(profile) => Some(profile),
            _ => None,
        }
    }

    /// The query in flight, if any.
    pub fn query(&self) -> Option<&SearchQuery> {
        match self {
            SearchState::Searching(query) => Some(query),
            _ => None,
        }
    }
}
