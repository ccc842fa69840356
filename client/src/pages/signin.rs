//! Email + password sign-in page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The whole form lives in one signal. Submissions go through the shared
//! [`SignInFlow`](session::signin::SignInFlow), which navigates to `/admin` on
//! success; the store flips through the client's `SignedIn` event.

#[cfg(test)]
#[path = "signin_test.rs"]
mod signin_test;

use leptos::prelude::*;
use session::signin::SignInForm;

use crate::state::session::SessionContext;

/// Sign-in page.
#[component]
pub fn SignInPage() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let form = RwSignal::new(SignInForm::default());
    let flow = ctx.sign_in.clone();
    let navigator = ctx.navigator();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut started = false;
        form.update(|f| started = f.begin());
        if !started {
            return;
        }
        let (email, password) = form.with_untracked(|f| (f.email.clone(), f.password.clone()));

        #[cfg(feature = "hydrate")]
        {
            let flow = flow.clone();
            leptos::task::spawn_local(async move {
                let outcome = flow.submit(&email, &password, &navigator).await;
                form.update(|f| f.settle(&outcome));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&flow, email, password, navigator);
            form.update(|f| f.busy = false);
        }
    };

    let busy = move || form.with(|f| f.busy);
    let message = move || form.with(|f| f.message.clone());

    view! {
        <section class="page signin-page">
            <div class="signin-card">
                <h1>"Sign In"</h1>
                <form class="signin-form" on:submit=on_submit>
                    <label class="signin-label" for="signin-email">"Email"</label>
                    <input
                        id="signin-email"
                        class="signin-input"
                        type="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <label class="signin-label" for="signin-password">"Password"</label>
                    <input
                        id="signin-password"
                        class="signin-input"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <button class="signin-button" type="submit" disabled=busy>
                        {move || submit_label(busy())}
                    </button>
                </form>
                <Show when=move || message().is_some()>
                    <p class="signin-message" role="alert">{move || message().unwrap_or_default()}</p>
                </Show>
            </div>
        </section>
    }
}

fn submit_label(busy: bool) -> &'static str {
    if busy { "Signing in…" } else { "Sign In" }
}
