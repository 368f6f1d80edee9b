use crate::app_config::{AppConfig, OutputFormat, WindowAnchor};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables fall back to their defaults.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let dataset_path = PathBuf::from(or_default("TRENDBOARD_DATASET_PATH", "./dataset_1k.csv"));
    let log_level = or_default("TRENDBOARD_LOG_LEVEL", "info");

    let csv_delimiter = parse_delimiter(&or_default("TRENDBOARD_CSV_DELIMITER", ","))
        .map_err(|reason| invalid("TRENDBOARD_CSV_DELIMITER", reason))?;

    let recent_window_days = or_default("TRENDBOARD_RECENT_WINDOW_DAYS", "30")
        .parse::<u32>()
        .map_err(|e| e.to_string())
        .and_then(|days| {
            if days == 0 {
                Err("window must be at least one day".to_string())
            } else {
                Ok(days)
            }
        })
        .map_err(|reason| invalid("TRENDBOARD_RECENT_WINDOW_DAYS", reason))?;

    let window_anchor = or_default("TRENDBOARD_WINDOW_ANCHOR", "filtered")
        .parse::<WindowAnchor>()
        .map_err(|reason| invalid("TRENDBOARD_WINDOW_ANCHOR", reason))?;

    let output_format = or_default("TRENDBOARD_OUTPUT_FORMAT", "text")
        .parse::<OutputFormat>()
        .map_err(|reason| invalid("TRENDBOARD_OUTPUT_FORMAT", reason))?;

    Ok(AppConfig {
        dataset_path,
        log_level,
        csv_delimiter,
        recent_window_days,
        window_anchor,
        output_format,
    })
}

/// Parse a delimiter setting into the single byte the CSV reader expects.
///
/// Accepts `\t` and `tab` as spellings of the tab character.
fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "\\t" | "tab" | "\t" => return Ok(b'\t'),
        _ => {}
    }
    match raw.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("delimiter must be a single ASCII character, got '{raw}'")),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
