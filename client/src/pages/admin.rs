//! Admin landing page behind the session gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! While the session is unresolved the page shows a placeholder instead of
//! redirecting, so a restored session never flashes `/signin`.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::use_navigate;
use session::AdminAccess;
use session::nav::admin_access;

use crate::state::session::SessionContext;
use crate::util::auth::install_admin_gate;

#[component]
pub fn AdminPage() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let state = ctx.state;
    install_admin_gate(state, use_navigate());

    let body = move || match admin_access(&state.get()) {
        AdminAccess::Pending => view! { <p class="page__status">"Checking session…"</p> }.into_any(),
        AdminAccess::Redirect(_) => view! { <p class="page__status">"Redirecting to sign in…"</p> }.into_any(),
        AdminAccess::Granted(identity) => view! {
            <h1>"Admin"</h1>
            <p class="admin-identity">
                "Signed in as "
                <strong>{identity.display_name().to_owned()}</strong>
            </p>
        }
        .into_any(),
    };

    view! { <section class="page admin-page">{body}</section> }
}
