use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// USGS GeoJSON summary feed covering the past hour.
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_hour.geojson";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let bot_token = require("QUAKEWATCH_BOT_TOKEN")?;
    let recipients = parse_recipients(&require("QUAKEWATCH_RECIPIENTS")?)?;

    let feed_url = or_default("QUAKEWATCH_FEED_URL", DEFAULT_FEED_URL);
    let min_magnitude = parse_f64("QUAKEWATCH_MIN_MAGNITUDE", "1.0")?;
    let poll_interval_secs = parse_u64("QUAKEWATCH_POLL_INTERVAL_SECS", "300")?;
    let request_timeout_secs = parse_u64("QUAKEWATCH_REQUEST_TIMEOUT_SECS", "15")?;
    let seen_path = PathBuf::from(or_default("QUAKEWATCH_SEEN_PATH", "./seen_ids.json"));
    let log_level = or_default("QUAKEWATCH_LOG_LEVEL", "info");

    Ok(AppConfig {
        bot_token,
        recipients,
        feed_url,
        min_magnitude,
        poll_interval_secs,
        request_timeout_secs,
        seen_path,
        log_level,
    })
}

/// Split a comma-separated recipient list into trimmed, non-empty chat ids.
fn parse_recipients(raw: &str) -> Result<Vec<String>, ConfigError> {
    let recipients: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    if recipients.is_empty() {
        return Err(ConfigError::Validation(
            "QUAKEWATCH_RECIPIENTS must list at least one chat id".to_string(),
        ));
    }

    Ok(recipients)
}

#[cfg(test)]
mod tests {
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

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("QUAKEWATCH_BOT_TOKEN", "123:ABC-test-token");
        m.insert("QUAKEWATCH_RECIPIENTS", "5747516199");
        m
    }

    #[test]
    fn build_app_config_fails_without_bot_token() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "QUAKEWATCH_BOT_TOKEN"),
            "expected MissingEnvVar(QUAKEWATCH_BOT_TOKEN), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_recipients() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("QUAKEWATCH_BOT_TOKEN", "123:ABC-test-token");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "QUAKEWATCH_RECIPIENTS"),
            "expected MissingEnvVar(QUAKEWATCH_RECIPIENTS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.bot_token, "123:ABC-test-token");
        assert_eq!(cfg.recipients, vec!["5747516199".to_string()]);
        assert_eq!(cfg.feed_url, DEFAULT_FEED_URL);
        assert!((cfg.min_magnitude - 1.0).abs() < f64::EPSILON);
        assert_eq!(cfg.poll_interval_secs, 300);
        assert_eq!(cfg.request_timeout_secs, 15);
        assert_eq!(cfg.seen_path.to_string_lossy(), "./seen_ids.json");
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn recipients_split_on_commas_and_trimmed() {
        let mut map = full_env();
        map.insert("QUAKEWATCH_RECIPIENTS", " 111 ,222, , 333 ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.recipients,
            vec!["111".to_string(), "222".to_string(), "333".to_string()]
        );
    }

    #[test]
    fn recipients_all_blank_is_rejected() {
        let mut map = full_env();
        map.insert("QUAKEWATCH_RECIPIENTS", " , ,, ");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(_))),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn feed_url_override() {
        let mut map = full_env();
        map.insert("QUAKEWATCH_FEED_URL", "http://localhost:9999/feed.geojson");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.feed_url, "http://localhost:9999/feed.geojson");
    }

    #[test]
    fn min_magnitude_override() {
        let mut map = full_env();
        map.insert("QUAKEWATCH_MIN_MAGNITUDE", "4.5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!((cfg.min_magnitude - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn min_magnitude_invalid() {
        let mut map = full_env();
        map.insert("QUAKEWATCH_MIN_MAGNITUDE", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "QUAKEWATCH_MIN_MAGNITUDE"),
            "expected InvalidEnvVar(QUAKEWATCH_MIN_MAGNITUDE), got: {result:?}"
        );
    }

    #[test]
    fn poll_interval_override() {
        let mut map = full_env();
        map.insert("QUAKEWATCH_POLL_INTERVAL_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.poll_interval_secs, 60);
    }

    #[test]
    fn poll_interval_invalid() {
        let mut map = full_env();
        map.insert("QUAKEWATCH_POLL_INTERVAL_SECS", "five minutes");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "QUAKEWATCH_POLL_INTERVAL_SECS"),
            "expected InvalidEnvVar(QUAKEWATCH_POLL_INTERVAL_SECS), got: {result:?}"
        );
    }

    #[test]
    fn request_timeout_override() {
        let mut map = full_env();
        map.insert("QUAKEWATCH_REQUEST_TIMEOUT_SECS", "30");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn seen_path_override() {
        let mut map = full_env();
        map.insert("QUAKEWATCH_SEEN_PATH", "/var/lib/quakewatch/seen.json");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.seen_path.to_string_lossy(),
            "/var/lib/quakewatch/seen.json"
        );
    }

    #[test]
    fn debug_output_redacts_bot_token() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("ABC-test-token"), "token leaked: {rendered}");
        assert!(rendered.contains("[redacted]"));
    }
}
