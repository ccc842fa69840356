//! Site identity shared by the app shell and the docs theme.

#[cfg(test)]
#[path = "site_test.rs"]
mod site_test;

pub const SITE_TITLE: &str = "DevUps Notes";
pub const REPOSITORY_URL: &str = "https://github.com/munaciella/devups-notes";
pub const CHAT_URL: &str = "https://discord.com";

/// Off-site links shown in the navbar, as `(label, url)`.
pub const EXTERNAL_LINKS: [(&str, &str); 2] = [("GitHub", REPOSITORY_URL), ("Chat", CHAT_URL)];

pub fn footer_text(year: i32) -> String {
    format!("© {year} DevUps. All rights reserved.")
}
