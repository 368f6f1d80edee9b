use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.dataset_path.to_string_lossy(), "./dataset_1k.csv");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.csv_delimiter, b',');
    assert_eq!(cfg.recent_window_days, 30);
    assert_eq!(cfg.window_anchor, WindowAnchor::Filtered);
    assert_eq!(cfg.output_format, OutputFormat::Text);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("TRENDBOARD_DATASET_PATH", "/data/trends.csv");
    map.insert("TRENDBOARD_LOG_LEVEL", "debug");
    map.insert("TRENDBOARD_CSV_DELIMITER", ";");
    map.insert("TRENDBOARD_RECENT_WINDOW_DAYS", "14");
    map.insert("TRENDBOARD_WINDOW_ANCHOR", "global");
    map.insert("TRENDBOARD_OUTPUT_FORMAT", "JSON");
    let cfg = build_app_config(lookup_from_map(&map)).expect("overrides should be valid");
    assert_eq!(cfg.dataset_path.to_string_lossy(), "/data/trends.csv");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.csv_delimiter, b';');
    assert_eq!(cfg.recent_window_days, 14);
    assert_eq!(cfg.window_anchor, WindowAnchor::Global);
    assert_eq!(cfg.output_format, OutputFormat::Json);
}

#[test]
fn build_app_config_accepts_tab_delimiter() {
    let mut map = HashMap::new();
    map.insert("TRENDBOARD_CSV_DELIMITER", "tab");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.csv_delimiter, b'\t');
}

#[test]
fn build_app_config_rejects_multi_char_delimiter() {
    let mut map = HashMap::new();
    map.insert("TRENDBOARD_CSV_DELIMITER", "||");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDBOARD_CSV_DELIMITER"),
        "expected InvalidEnvVar(TRENDBOARD_CSV_DELIMITER), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_window() {
    let mut map = HashMap::new();
    map.insert("TRENDBOARD_RECENT_WINDOW_DAYS", "a month");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDBOARD_RECENT_WINDOW_DAYS"),
        "expected InvalidEnvVar(TRENDBOARD_RECENT_WINDOW_DAYS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_day_window() {
    let mut map = HashMap::new();
    map.insert("TRENDBOARD_RECENT_WINDOW_DAYS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDBOARD_RECENT_WINDOW_DAYS"),
        "expected InvalidEnvVar(TRENDBOARD_RECENT_WINDOW_DAYS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_unknown_window_anchor() {
    let mut map = HashMap::new();
    map.insert("TRENDBOARD_WINDOW_ANCHOR", "dataset");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDBOARD_WINDOW_ANCHOR"),
        "expected InvalidEnvVar(TRENDBOARD_WINDOW_ANCHOR), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_unknown_output_format() {
    let mut map = HashMap::new();
    map.insert("TRENDBOARD_OUTPUT_FORMAT", "yaml");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDBOARD_OUTPUT_FORMAT"),
        "expected InvalidEnvVar(TRENDBOARD_OUTPUT_FORMAT), got: {result:?}"
    );
}

#[test]
fn parse_delimiter_accepts_escaped_tab() {
    assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
}

#[test]
fn parse_delimiter_rejects_empty() {
    assert!(parse_delimiter("").is_err());
}
