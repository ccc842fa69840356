use super::*;

#[test]
fn navbar_links_match_the_docs_theme() {
    assert_eq!(EXTERNAL_LINKS, [("GitHub", "https://github.com/munaciella/devups-notes"), ("Chat", "https://discord.com")]);
}

#[test]
fn footer_text_format() {
    assert_eq!(footer_text(2026), "© 2026 DevUps. All rights reserved.");
}
