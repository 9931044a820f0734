//! Integration tests for configuration loading

use price_tracker::config::Config;
use price_tracker::store::RandomWalk;
use price_tracker::TrackerSettings;
use std::time::Duration;

#[test]
fn test_bundled_example_config_is_valid() {
    let config = Config::parse(include_str!("../../config.toml.example")).unwrap();

    assert!(!config.tracker.symbols.is_empty());
    assert_eq!(config.tracker.symbols[0], "AAPL");
    assert_eq!(config.walk.random_walk(), RandomWalk::default());

    let settings = TrackerSettings::from_config(&config);
    assert_eq!(settings.feed_period, Duration::from_secs(2));
    assert_eq!(settings.flash_duration, Duration::from_secs(1));
    assert_eq!(settings.symbols, config.tracker.symbols);
}

#[test]
fn test_load_from_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.toml");
    std::fs::write(
        &path,
        r#"
        [tracker]
        symbols = ["NVDA"]
        feed_period_ms = 100

        [gateway]
        url = "ws://127.0.0.1:9001"
        "#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.tracker.symbols, vec!["NVDA"]);
    assert_eq!(config.tracker.feed_period_ms, 100);
    assert_eq!(config.tracker.flash_duration_ms, 1_000);
    assert_eq!(config.gateway.ws_config().url, "ws://127.0.0.1:9001");
}

#[test]
fn test_load_rejects_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.toml");
    std::fs::write(&path, "[tracker]\nsymbols = [\"A\", \"A\"]\n").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}
