//! Test doubles for the protocol traits.
//!
//! Available behind the `test-utils` feature flag. These are small,
//! deterministic implementations for exercising a coordinator without a
//! network or a disk.

mod recording_store;
mod scripted_lookup;

pub use recording_store::RecordingStore;
pub use scripted_lookup::ScriptedLookup;
