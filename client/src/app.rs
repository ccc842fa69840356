//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_navigate,
};
use session::Route as AppRoute;

use crate::components::{footer::Footer, navbar::Navbar};
use crate::net::config::{AUTH_ANON_KEY_META, AUTH_URL_META, AuthConfig};
use crate::net::gotrue::GoTrueClient;
use crate::pages::{admin::AdminPage, signin::SignInPage, signout::SignOutPage};
use crate::site::SITE_TITLE;
use crate::state::session::SessionContext;
use crate::util::auth::install_pending_navigation;

/// HTML shell rendered on the server for SSR + hydration.
///
/// The public auth config provided by the server is rendered as `<meta>` tags
/// so the hydrated client can read it back.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    let auth = use_context::<AuthConfig>().unwrap_or_default();
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=AUTH_URL_META content=auth.url/>
                <meta name=AUTH_ANON_KEY_META content=auth.anon_key/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session context, starts session sync in the browser and sets
/// up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = use_context::<AuthConfig>().or_else(AuthConfig::from_document).unwrap_or_default();
    if !config.is_configured() {
        log::debug!("auth backend not configured; sign-in disabled");
    }
    let client = Arc::new(GoTrueClient::new(config));
    let ctx = SessionContext::new(client.clone());
    provide_context(ctx.clone());

    #[cfg(feature = "hydrate")]
    {
        crate::net::gotrue::install_storage_listener(Arc::clone(&client));
        let sync = ctx.sync.clone();
        leptos::task::spawn_local(async move {
            sync.start().await;
        });
    }

    let sync = ctx.sync.clone();
    on_cleanup(move || sync.stop());

    view! {
        <Stylesheet id="leptos" href="/pkg/devups-notes.css"/>
        <Title text=SITE_TITLE/>

        <Router>
            <PendingNavigation/>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment(AppRoute::SignIn.segment()) view=SignInPage/>
                    <Route path=StaticSegment(AppRoute::SignOut.segment()) view=SignOutPage/>
                    <Route path=StaticSegment(AppRoute::Admin.segment()) view=AdminPage/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}

/// Turns routes queued by session flows into router navigations.
#[component]
fn PendingNavigation() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    install_pending_navigation(ctx.pending_route, use_navigate());
}
