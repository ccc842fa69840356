//! Site footer.

use leptos::prelude::*;

use crate::site::{REPOSITORY_URL, footer_text};
use crate::util::clock::current_year;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <span>{footer_text(current_year())}</span>
            <a class="footer__link" href=REPOSITORY_URL target="_blank" rel="noreferrer">"Source"</a>
        </footer>
    }
}
