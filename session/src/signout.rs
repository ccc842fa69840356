//! Sign-out flows.
//!
//! Sign-out is best effort. The client always drops the local session and
//! emits `SignedOut`; a backend failure is logged and never shown.

#[cfg(test)]
#[path = "signout_test.rs"]
mod signout_test;

use crate::client::SessionClient;
use crate::nav::{Navigator, Route};

/// Navbar action: sign out in place. Returns whether the backend acknowledged.
pub async fn sign_out(client: &dyn SessionClient) -> bool {
    match client.sign_out().await {
        Ok(()) => {
            log::info!("signed out");
            true
        }
        Err(error) => {
            log::warn!("sign-out not acknowledged by backend [{}]: {error}", error.error_code());
            false
        }
    }
}

/// `/signout` route: sign out, then go to `/signin` whatever the backend said.
pub async fn sign_out_and_redirect<N>(client: &dyn SessionClient, navigator: &N)
where
    N: Navigator + ?Sized,
{
    sign_out(client).await;
    navigator.navigate(Route::SignIn);
}
