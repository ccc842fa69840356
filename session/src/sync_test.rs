use super::*;
use crate::client::SessionEvent;
use crate::identity::Identity;
use crate::store::SessionState;
use crate::testing::FakeSessionClient;

fn ada() -> Identity {
    Identity::new("u-ada").with_email("ada@example.com")
}

fn wired(client: FakeSessionClient) -> (Arc<FakeSessionClient>, SessionSync) {
    let client = Arc::new(client);
    let sync = SessionSync::new(client.clone(), SessionStore::new());
    (client, sync)
}

// =============================================================================
// Initial resolution
// =============================================================================

#[tokio::test]
async fn start_restores_persisted_session() {
    let (client, sync) = wired(FakeSessionClient::new().with_session(ada()));
    sync.start().await;
    assert_eq!(sync.store().state(), SessionState::Authenticated(ada()));
    assert_eq!(client.calls().current_identity, 1);
}

#[tokio::test]
async fn start_without_session_resolves_anonymous() {
    let (_client, sync) = wired(FakeSessionClient::new());
    assert_eq!(sync.store().state(), SessionState::Unresolved);
    sync.start().await;
    assert_eq!(sync.store().state(), SessionState::Anonymous);
}

#[tokio::test]
async fn event_during_initial_query_wins() {
    let (client, sync) = wired(FakeSessionClient::new().with_session(ada()));
    let release = client.hold_current_identity();

    let driver = async {
        client.push(SessionEvent::signed_out());
        release.send(()).unwrap();
    };
    futures::join!(sync.start(), driver);

    assert_eq!(sync.store().state(), SessionState::Anonymous);
    assert_eq!(sync.store().revision(), 1);
}

#[tokio::test]
async fn stop_before_initial_query_settles_leaves_store_unresolved() {
    let (client, sync) = wired(FakeSessionClient::new().with_session(ada()));
    let release = client.hold_current_identity();

    let driver = async {
        sync.stop();
        release.send(()).unwrap();
    };
    futures::join!(sync.start(), driver);

    assert_eq!(sync.store().state(), SessionState::Unresolved);
}

// =============================================================================
// Subscription lifecycle
// =============================================================================

#[tokio::test]
async fn pushed_events_update_store_in_order() {
    let (client, sync) = wired(FakeSessionClient::new());
    sync.start().await;

    client.push(SessionEvent::signed_in(ada()));
    assert_eq!(sync.store().state(), SessionState::Authenticated(ada()));
    client.push(SessionEvent::signed_out());
    assert_eq!(sync.store().state(), SessionState::Anonymous);
}

#[tokio::test]
async fn restart_keeps_a_single_subscription() {
    let (client, sync) = wired(FakeSessionClient::new());
    sync.start().await;
    sync.start().await;
    sync.start().await;

    assert_eq!(client.subscriber_count(), 1);
    let before = sync.store().revision();
    client.push(SessionEvent::signed_in(ada()));
    assert_eq!(sync.store().revision(), before + 1);
}

#[tokio::test]
async fn stop_ignores_further_events() {
    let (client, sync) = wired(FakeSessionClient::new());
    sync.start().await;
    assert!(sync.is_running());

    sync.stop();
    sync.stop();
    let before = sync.store().revision();
    client.push(SessionEvent::signed_in(ada()));

    assert!(!sync.is_running());
    assert_eq!(client.subscriber_count(), 0);
    assert_eq!(sync.store().revision(), before);
    assert_eq!(sync.store().state(), SessionState::Anonymous);
}

#[tokio::test]
async fn dropping_sync_tears_down_subscription() {
    let (client, sync) = wired(FakeSessionClient::new());
    sync.start().await;
    let store = sync.store().clone();
    drop(sync);

    client.push(SessionEvent::signed_in(ada()));

    assert_eq!(client.subscriber_count(), 0);
    assert_eq!(store.state(), SessionState::Anonymous);
}
