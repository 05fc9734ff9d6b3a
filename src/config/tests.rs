//! Configuration tests
//!
//! Precedence is exercised through `Config::resolve` with an injected
//! environment lookup, so nothing here depends on the real process env or
//! the user's config file.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Serialization
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that serialized config can be parsed back.
#[test]
fn test_config_roundtrip_default() {
    let toml_str = Config::default().to_toml();

    let parsed = Config::parse_file_config(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

#[test]
fn test_config_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.base_url = "http://localhost:9000/posts".to_string();
    config.page_size = 25;
    config.theme = "Ember".to_string();
    config.image.seed_bound = 64;
    config.demo.total_posts = 7;
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let file = Config::parse_file_config(&config.to_toml()).unwrap();
    let restored = Config::resolve(file, &no_env);

    assert_eq!(restored.base_url, "http://localhost:9000/posts");
    assert_eq!(restored.page_size, 25);
    assert_eq!(restored.theme, "Ember");
    assert_eq!(restored.image.seed_bound, 64);
    assert_eq!(restored.image.url_template, config.image.url_template);
    assert_eq!(restored.demo, config.demo);
    assert!(restored.logging.file_enabled);
    assert_eq!(restored.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn test_config_roundtrip_escapes_strings() {
    let file = Config::parse_file_config(
        r#"
        base_url = 'http://localhost:9000/posts?tag="rust"'

        [logging]
        file_dir = 'C:\Users\me\logs'
        file_prefix = 'feed\"x'
        "#,
    )
    .unwrap();
    let config = Config::resolve(file, &no_env);
    assert_eq!(config.logging.file_dir, PathBuf::from(r"C:\Users\me\logs"));

    let toml_str = config.to_toml();
    let reparsed = Config::parse_file_config(&toml_str);
    assert!(
        reparsed.is_ok(),
        "Escaped config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        reparsed.err()
    );

    let restored = Config::resolve(reparsed.unwrap(), &no_env);
    assert_eq!(restored.base_url, r#"http://localhost:9000/posts?tag="rust""#);
    assert_eq!(restored.logging.file_dir, config.logging.file_dir);
    assert_eq!(restored.logging.file_prefix, r#"feed\"x"#);
}

#[test]
fn test_template_keeps_placeholders() {
    let toml_str = Config::default().to_toml();
    assert!(toml_str.contains("https://picsum.photos/seed/{seed}/{size}"));
    assert!(toml_str.contains("({seed} and {size} are substituted)"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Defaults and precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_defaults_match_public_endpoint() {
    let config = Config::resolve(FileConfig::default(), &no_env);
    assert_eq!(config.base_url, "https://jsonplaceholder.typicode.com/posts");
    assert_eq!(config.page_size, 10);
    assert_eq!(config.image.seed_bound, 1000);
    assert!(config.enable_tui);
    assert!(!config.demo_mode);
}

#[test]
fn test_file_overrides_defaults() {
    let file = Config::parse_file_config(
        r#"
        base_url = "http://file.test/posts"
        page_size = 5

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    let config = Config::resolve(file, &no_env);
    assert_eq!(config.base_url, "http://file.test/posts");
    assert_eq!(config.page_size, 5);
    assert_eq!(config.logging.level, "debug");
    // Untouched sections keep defaults
    assert_eq!(config.logging.file_prefix, "postscroll");
}

#[test]
fn test_env_overrides_file() {
    let file = Config::parse_file_config(
        r#"
        base_url = "http://file.test/posts"
        page_size = 5
        theme = "Ember"
        "#,
    )
    .unwrap();
    let env = env_from(&[
        ("POSTSCROLL_BASE_URL", "http://env.test/posts"),
        ("POSTSCROLL_PAGE_SIZE", "20"),
        ("POSTSCROLL_NO_TUI", "1"),
        ("POSTSCROLL_DEMO", "true"),
    ]);

    let config = Config::resolve(file, &env);
    assert_eq!(config.base_url, "http://env.test/posts");
    assert_eq!(config.page_size, 20);
    assert_eq!(config.theme, "Ember");
    assert!(!config.enable_tui);
    assert!(config.demo_mode);
}

#[test]
fn test_unparseable_env_page_size_falls_through_to_file() {
    let file = Config::parse_file_config("page_size = 12").unwrap();
    let env = env_from(&[("POSTSCROLL_PAGE_SIZE", "lots")]);

    assert_eq!(Config::resolve(file, &env).page_size, 12);
}

#[test]
fn test_zero_values_fall_back_to_defaults() {
    let file = Config::parse_file_config(
        r#"
        page_size = 0
        request_timeout_secs = 0

        [image]
        seed_bound = 0
        "#,
    )
    .unwrap();

    let config = Config::resolve(file, &no_env);
    assert_eq!(config.page_size, 10);
    assert_eq!(config.request_timeout_secs, Config::default().request_timeout_secs);
    assert!(config.request_timeout_secs > 0);
    assert_eq!(config.image.seed_bound, 1000);
}

#[test]
fn test_invalid_demo_bind_addr_uses_default() {
    let file = Config::parse_file_config(
        r#"
        [demo]
        bind_addr = "not-an-address"
        total_posts = 3
        "#,
    )
    .unwrap();

    let config = Config::resolve(file, &no_env);
    assert_eq!(config.demo.bind_addr, DemoConfig::default().bind_addr);
    assert_eq!(config.demo.total_posts, 3);
}

#[test]
fn test_log_rotation_parsing() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let parsed = Config::parse_file_config(
        r#"
        bind_addr = "127.0.0.1:8080"
        [features]
        storage = true
        "#,
    );
    assert!(parsed.is_ok());
}
