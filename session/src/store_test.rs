use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;

use super::*;
use crate::client::SessionEventKind;

fn ada() -> Identity {
    Identity::new("u-ada").with_email("ada@example.com")
}

// =============================================================================
// SessionState
// =============================================================================

#[test]
fn default_state_is_unresolved() {
    assert_eq!(SessionState::default(), SessionState::Unresolved);
    assert!(!SessionState::Unresolved.is_resolved());
}

#[test]
fn from_identity_is_total() {
    assert_eq!(SessionState::from_identity(None), SessionState::Anonymous);
    assert_eq!(SessionState::from_identity(Some(ada())), SessionState::Authenticated(ada()));
}

#[test]
fn identity_only_present_when_authenticated() {
    assert!(SessionState::Unresolved.identity().is_none());
    assert!(SessionState::Anonymous.identity().is_none());
    assert_eq!(SessionState::Authenticated(ada()).identity(), Some(&ada()));
}

#[test]
fn labels() {
    assert_eq!(SessionState::Unresolved.label(), "unresolved");
    assert_eq!(SessionState::Anonymous.label(), "anonymous");
    assert_eq!(SessionState::Authenticated(ada()).label(), "authenticated");
}

// =============================================================================
// SessionStore transitions
// =============================================================================

#[test]
fn new_store_is_unresolved_at_revision_zero() {
    let store = SessionStore::new();
    assert_eq!(store.state(), SessionState::Unresolved);
    assert_eq!(store.revision(), 0);
}

#[test]
fn initial_query_resolves_unresolved_store() {
    let store = SessionStore::new();
    assert!(store.resolve_initial(Some(ada())));
    assert_eq!(store.state(), SessionState::Authenticated(ada()));
    assert_eq!(store.revision(), 1);
}

#[test]
fn initial_query_after_event_is_discarded() {
    let store = SessionStore::new();
    store.apply_event(&SessionEvent::signed_out());
    assert!(!store.resolve_initial(Some(ada())));
    assert_eq!(store.state(), SessionState::Anonymous);
    assert_eq!(store.revision(), 1);
}

#[test]
fn events_override_each_other() {
    let store = SessionStore::new();
    store.apply_event(&SessionEvent::signed_in(ada()));
    store.apply_event(&SessionEvent::signed_out());
    assert_eq!(store.state(), SessionState::Anonymous);
    assert_eq!(store.revision(), 2);
}

#[test]
fn clones_share_state() {
    let store = SessionStore::new();
    let view = store.clone();
    store.apply_event(&SessionEvent::signed_in(ada()));
    assert!(view.state().is_authenticated());
}

// =============================================================================
// Listeners
// =============================================================================

#[test]
fn watch_sees_each_transition() {
    let store = SessionStore::new();
    let seen: Arc<Mutex<Vec<SessionState>>> = Arc::default();
    let sink = seen.clone();
    store.watch(move |state| sink.lock().unwrap().push(state.clone()));

    store.resolve_initial(None);
    store.apply_event(&SessionEvent::signed_in(ada()));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![SessionState::Anonymous, SessionState::Authenticated(ada())]
    );
}

#[test]
fn unwatch_stops_notifications() {
    let store = SessionStore::new();
    let count = Arc::new(AtomicUsize::new(0));
    let hits = count.clone();
    let id = store.watch(move |_| {
        hits.fetch_add(1, Ordering::SeqCst);
    });

    store.apply_event(&SessionEvent::signed_out());
    store.unwatch(id);
    store.apply_event(&SessionEvent::signed_in(ada()));

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn listener_may_read_store_without_deadlock() {
    let store = SessionStore::new();
    let reader = store.clone();
    let seen = Arc::new(AtomicUsize::new(0));
    let hits = seen.clone();
    store.watch(move |state| {
        assert_eq!(&reader.state(), state);
        hits.fetch_add(1, Ordering::SeqCst);
    });
    store.apply_event(&SessionEvent::signed_in(ada()));
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Last writer wins, for any event sequence
// =============================================================================

fn event_strategy() -> impl Strategy<Value = SessionEvent> {
    prop_oneof![
        Just(SessionEvent::signed_out()),
        "[a-z]{1,8}".prop_map(|id| SessionEvent::signed_in(Identity::new(id))),
        "[a-z]{1,8}".prop_map(|id| SessionEvent::new(SessionEventKind::TokenRefreshed, Some(Identity::new(id)))),
        Just(SessionEvent::new(SessionEventKind::UserUpdated, None)),
    ]
}

proptest! {
    #[test]
    fn final_state_matches_last_event(
        initial in proptest::option::of("[a-z]{1,8}"),
        events in proptest::collection::vec(event_strategy(), 1..32),
    ) {
        let store = SessionStore::new();
        for event in &events {
            store.apply_event(event);
        }
        store.resolve_initial(initial.map(Identity::new));

        let last = events.last().unwrap();
        prop_assert_eq!(store.state(), last.state());
        prop_assert_eq!(store.revision(), events.len() as u64);
    }
}
