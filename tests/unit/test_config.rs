//! Unit tests for the config module
//!
//! Tests cover:
//! - Defaults
//! - TOML parsing, partial and full
//! - Loading from an explicit path

use smellhunt::config::Config;

#[test]
fn test_default_values() {
    let config = Config::default();
    assert_eq!(config.endpoint, "https://api.anthropic.com");
    assert_eq!(config.model, "claude-3-5-sonnet-20240620");
    assert_eq!(config.max_tokens, 1000);
    assert_eq!(config.rounds, 3);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config: Config = toml::from_str("rounds = 7").unwrap();
    assert_eq!(config.rounds, 7);
    assert_eq!(config.model, "claude-3-5-sonnet-20240620");
}

#[test]
fn test_load_explicit_path() {
    let path = std::env::temp_dir().join("smellhunt-test-config.toml");
    std::fs::write(&path, "model = \"claude-from-file\"\nmax_tokens = 64\n").unwrap();

    let config = Config::load(path.to_str()).unwrap();
    assert_eq!(config.model, "claude-from-file");
    assert_eq!(config.max_tokens, 64);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_load_missing_explicit_path_fails() {
    let result = Config::load(Some("/definitely/not/a/real/path.toml"));
    assert!(result.is_err());
}

#[test]
fn test_load_invalid_toml_fails() {
    let path = std::env::temp_dir().join("smellhunt-test-bad-config.toml");
    std::fs::write(&path, "rounds = \"three\"\n").unwrap();

    let result = Config::load(path.to_str());
    assert!(result.is_err());

    std::fs::remove_file(&path).ok();
}
