use std::cell::RefCell;
use std::sync::Arc;

use super::*;
use crate::error::AuthError;
use crate::identity::Identity;
use crate::store::{SessionState, SessionStore};
use crate::sync::SessionSync;
use crate::testing::FakeSessionClient;

async fn signed_in_sync() -> (Arc<FakeSessionClient>, SessionSync) {
    let client = Arc::new(FakeSessionClient::new().with_session(Identity::new("u-1")));
    let sync = SessionSync::new(client.clone(), SessionStore::new());
    sync.start().await;
    assert!(sync.store().state().is_authenticated());
    (client, sync)
}

#[tokio::test]
async fn navbar_sign_out_reports_acknowledgement() {
    let (client, sync) = signed_in_sync().await;
    assert!(sign_out(client.as_ref()).await);
    assert_eq!(sync.store().state(), SessionState::Anonymous);
}

#[tokio::test]
async fn navbar_sign_out_failure_still_ends_session() {
    let (client, sync) = signed_in_sync().await;
    client.fail_sign_out(AuthError::NetworkFailure("offline".into()));
    assert!(!sign_out(client.as_ref()).await);
    assert_eq!(sync.store().state(), SessionState::Anonymous);
}

#[tokio::test]
async fn redirect_flow_always_lands_on_sign_in() {
    for failure in [None, Some(AuthError::BackendRejected { status: 500, message: "boom".into() })] {
        let (client, sync) = signed_in_sync().await;
        if let Some(error) = failure {
            client.fail_sign_out(error);
        }
        let visited = RefCell::new(Vec::new());
        let nav = |route: Route| visited.borrow_mut().push(route);

        sign_out_and_redirect(client.as_ref(), &nav).await;

        assert_eq!(sync.store().state(), SessionState::Anonymous);
        assert_eq!(*visited.borrow(), vec![Route::SignIn]);
        assert_eq!(client.calls().sign_out, 1);
    }
}
