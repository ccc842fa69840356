use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_without_environment() {
    let cfg = SiteConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert!(cfg.docs_dir.ends_with("../docs/out"));
    assert_eq!(cfg.auth, None);
}

#[test]
fn reads_overrides() {
    let cfg = SiteConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("DOCS_DIR", "/srv/docs"),
        ("SUPABASE_URL", "https://abcd.supabase.co/"),
        ("SUPABASE_ANON_KEY", "anon"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.docs_dir, PathBuf::from("/srv/docs"));
    assert_eq!(cfg.auth, Some(AuthConfig::new("https://abcd.supabase.co", "anon")));
}

#[test]
fn invalid_port_is_an_error() {
    let err = SiteConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidPort("eighty".into()));
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = SiteConfig::from_lookup(lookup(&[("PORT", " "), ("DOCS_DIR", ""), ("SUPABASE_URL", "  ")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert!(cfg.docs_dir.ends_with("../docs/out"));
    assert_eq!(cfg.auth, None);
}

#[test]
fn half_configured_auth_is_disabled() {
    let cfg = SiteConfig::from_lookup(lookup(&[("SUPABASE_URL", "https://abcd.supabase.co")])).unwrap();
    assert_eq!(cfg.auth, None);
    assert_eq!(
        auth_from_lookup(&lookup(&[("SUPABASE_URL", "https://abcd.supabase.co")])).unwrap_err(),
        ConfigError::MissingVar("SUPABASE_ANON_KEY")
    );
}
