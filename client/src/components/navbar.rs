//! Top navigation bar.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the session signal only. The sign-out button signs out in place; the
//! store update arrives through the client's `SignedOut` event.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use session::nav::nav_items;
use session::NavItem;

use crate::site::{EXTERNAL_LINKS, SITE_TITLE};
use crate::state::session::SessionContext;

/// Navbar shown on every app route.
#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let state = ctx.state;
    let signing_out = RwSignal::new(false);

    let client = ctx.client();
    let on_sign_out = Callback::new(move |()| {
        if signing_out.get_untracked() {
            return;
        }
        signing_out.set(true);
        #[cfg(feature = "hydrate")]
        {
            let client = std::sync::Arc::clone(&client);
            leptos::task::spawn_local(async move {
                session::signout::sign_out(client.as_ref()).await;
                signing_out.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &client;
            signing_out.set(false);
        }
    });

    let items = move || {
        nav_items(&state.get())
            .into_iter()
            .map(|item| match item {
                NavItem::Link { label, route } => view! {
                    <a class="navbar__link" href=route.path()>{label}</a>
                }
                .into_any(),
                NavItem::SignOutButton => view! {
                    <button
                        class="navbar__button"
                        type="button"
                        disabled=move || signing_out.get()
                        on:click=move |_| on_sign_out.run(())
                    >
                        {item.label()}
                    </button>
                }
                .into_any(),
            })
            .collect_view()
    };

    view! {
        <nav class="navbar" data-session=move || state.get().label()>
            <a class="navbar__brand" href="/" rel="external">{SITE_TITLE}</a>
            <div class="navbar__links">
                {items}
                {EXTERNAL_LINKS
                    .into_iter()
                    .map(|(label, href)| view! {
                        <a class="navbar__link" href=href target="_blank" rel="noreferrer">{label}</a>
                    })
                    .collect_view()}
            </div>
        </nav>
    }
}
