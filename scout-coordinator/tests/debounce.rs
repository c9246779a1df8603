//! Debouncer timing tests on a paused clock.

use std::sync::Arc;
use std::time::Duration;

use scout_coordinator::{
    CoordinatorConfig, DebounceConfig, Debouncer, SearchCoordinator, SearchOutcome, SearchState,
};
use scout_proto::Profile;
use scout_proto::test_utils::{RecordingStore, ScriptedLookup};

fn debouncer() -> Debouncer<ScriptedLookup> {
    let lookup = ScriptedLookup::new().found("alice", Profile::new("alice"));
    let coordinator = Arc::new(SearchCoordinator::new(
        lookup,
        Arc::new(RecordingStore::new()),
        CoordinatorConfig::default(),
    ));
    Debouncer::new(coordinator, DebounceConfig::default())
}

async fn wait_for_profile(d: &Debouncer<ScriptedLookup>) -> SearchState {
    let mut rx = d.coordinator().subscribe();
    let state = rx
        .wait_for(|s| s.profile().is_some())
        .await
        .expect("coordinator alive")
        .clone();
    state
}

#[tokio::test(start_paused = true)]
async fn only_the_last_keystroke_is_submitted() {
    let d = debouncer();

    for text in ["a", "al", "ali", "alic", "alice"] {
        d.input(text);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let state = wait_for_profile(&d).await;

    assert_eq!(state, SearchState::Succeeded(Profile::new("alice")));
    assert_eq!(d.coordinator().lookup().calls(), vec!["alice"]);
}

#[tokio::test(start_paused = true)]
async fn nothing_is_submitted_before_the_quiet_period() {
    let d = debouncer();

    d.input("alice");
    tokio::time::sleep(Duration::from_millis(499)).await;

    assert_eq!(d.coordinator().state(), SearchState::Idle);
    assert_eq!(d.coordinator().lookup().call_count(), 0);
    assert_eq!(d.pending().as_deref(), Some("alice"));

    tokio::time::sleep(Duration::from_millis(2)).await;

    assert_ne!(d.coordinator().state(), SearchState::Idle);
    assert_eq!(d.pending(), None);
}

#[tokio::test(start_paused = true)]
async fn new_input_restarts_the_timer() {
    let d = debouncer();

    d.input("al");
    tokio::time::sleep(Duration::from_millis(300)).await;
    d.input("alice");
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(d.coordinator().lookup().call_count(), 0);

    wait_for_profile(&d).await;
    assert_eq!(d.coordinator().lookup().calls(), vec!["alice"]);
}

#[tokio::test(start_paused = true)]
async fn blank_input_clears_pending_text() {
    let d = debouncer();

    d.input("alice");
    d.input("   ");
    assert_eq!(d.pending(), None);

    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(d.coordinator().state(), SearchState::Idle);
    assert_eq!(d.coordinator().lookup().call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn flush_submits_immediately() {
    let d = debouncer();

    d.input("alice");
    let handle = d.flush().expect("pending text");

    assert_eq!(d.pending(), None);
    assert_eq!(handle.await.unwrap(), SearchOutcome::Applied);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(d.coordinator().lookup().call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn flush_with_nothing_pending_is_none() {
    let d = debouncer();
    assert!(d.flush().is_none());
}

#[tokio::test(start_paused = true)]
async fn dropping_discards_pending_text() {
    let d = debouncer();
    let coordinator = Arc::clone(d.coordinator());

    d.input("alice");
    drop(d);
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(coordinator.state(), SearchState::Idle);
    assert_eq!(coordinator.lookup().call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn custom_quiet_period_is_honoured() {
    let lookup = ScriptedLookup::new().found("alice", Profile::new("alice"));
    let coordinator = Arc::new(SearchCoordinator::new(
        lookup,
        Arc::new(RecordingStore::new()),
        CoordinatorConfig::default(),
    ));
    let d = Debouncer::new(
        coordinator,
        DebounceConfig {
            quiet_period: Duration::from_millis(50),
        },
    );

    d.input("alice");
    tokio::time::sleep(Duration::from_millis(60)).await;

    assert_ne!(d.coordinator().state(), SearchState::Idle);
}
