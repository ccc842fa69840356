//! `/signout` route: sign out on visit, then go to `/signin`.

use leptos::prelude::*;

use crate::state::session::SessionContext;

#[component]
pub fn SignOutPage() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();

    #[cfg(feature = "hydrate")]
    {
        let client = ctx.client();
        let navigator = ctx.navigator();
        leptos::task::spawn_local(async move {
            session::signout::sign_out_and_redirect(client.as_ref(), &navigator).await;
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = ctx;

    view! {
        <section class="page signout-page">
            <p class="page__status">"Signing out…"</p>
        </section>
    }
}
