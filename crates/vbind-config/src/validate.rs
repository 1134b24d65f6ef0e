//! Post-merge configuration validation.
//!
//! Validates that deserialized [`Config`](crate::Config) values are within
//! acceptable ranges and that cross-field invariants hold.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_search(config)?;
    validate_probe(config)?;
    validate_logging(config)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_search(config: &Config) -> ConfigResult<()> {
    let s = &config.search;

    if let Some(version) = &s.version
        && !looks_like_version(version)
    {
        return Err(invalid(
            "search.version",
            format!("'{version}' is not a version; expected major[.minor[.patch]]"),
        ));
    }

    for host in &s.hosts {
        let rest = host
            .strip_prefix("http://")
            .or_else(|| host.strip_prefix("https://"));
        if rest.is_none_or(|r| r.trim_matches('/').is_empty()) {
            return Err(invalid(
                "search.hosts",
                format!("'{host}' is not an http:// or https:// URL"),
            ));
        }
    }

    if s.version.is_none() && s.hosts.is_empty() {
        return Err(invalid(
            "search.hosts",
            "at least one host is required unless search.version is pinned",
        ));
    }

    if !matches!(s.version_key.as_str(), "major" | "full") {
        return Err(invalid(
            "search.version_key",
            format!(
                "unsupported version key '{}'; expected one of: major, full",
                s.version_key
            ),
        ));
    }

    Ok(())
}

/// Cheap shape check; the facade does the real parse.
fn looks_like_version(raw: &str) -> bool {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    let core = trimmed
        .split_once(['-', '+'])
        .map_or(trimmed, |(core, _)| core);
    let segments: Vec<&str> = core.split('.').collect();
    (1..=3).contains(&segments.len())
        && segments
            .iter()
            .all(|seg| !seg.is_empty() && seg.parse::<u32>().is_ok())
}

fn validate_probe(config: &Config) -> ConfigResult<()> {
    let p = &config.probe;

    if p.timeout_secs == 0 {
        return Err(invalid("probe.timeout_secs", "timeout_secs must be greater than 0"));
    }

    if p.max_attempts == 0 {
        return Err(invalid("probe.max_attempts", "max_attempts must be at least 1"));
    }

    if p.initial_delay_ms > p.max_delay_ms {
        return Err(invalid(
            "probe.initial_delay_ms",
            format!(
                "initial_delay_ms ({}) must not exceed max_delay_ms ({})",
                p.initial_delay_ms, p.max_delay_ms
            ),
        ));
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(invalid(
            "logging.level",
            format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        ));
    }

    let valid_formats = ["pretty", "compact", "json", "full"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(invalid(
            "logging.format",
            format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: ConfigResult<()>) -> String {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_pinned_version_shape() {
        let mut config = Config::default();
        for ok in ["7", "7.10", "v8.1.0", "7.10.2-SNAPSHOT"] {
            config.search.version = Some(ok.to_owned());
            assert!(validate(&config).is_ok(), "{ok} should be accepted");
        }

        for bad in ["", "seven", "1.2.3.4", "7..1"] {
            config.search.version = Some(bad.to_owned());
            assert_eq!(field_of(validate(&config)), "search.version");
        }
    }

    #[test]
    fn test_hosts_must_be_http_urls() {
        let mut config = Config::default();
        config.search.hosts = vec!["es-node:9200".to_owned()];
        assert_eq!(field_of(validate(&config)), "search.hosts");

        config.search.hosts = vec!["https://".to_owned()];
        assert_eq!(field_of(validate(&config)), "search.hosts");

        config.search.hosts = vec!["https://es.internal:9243".to_owned()];
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_hosts_required_unless_pinned() {
        let mut config = Config::default();
        config.search.hosts.clear();
        assert_eq!(field_of(validate(&config)), "search.hosts");

        config.search.version = Some("7".to_owned());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_version_key() {
        let mut config = Config::default();
        config.search.version_key = "minor".to_owned();
        assert_eq!(field_of(validate(&config)), "search.version_key");

        config.search.version_key = "full".to_owned();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_probe_bounds() {
        let mut config = Config::default();
        config.probe.timeout_secs = 0;
        assert_eq!(field_of(validate(&config)), "probe.timeout_secs");

        let mut config = Config::default();
        config.probe.max_attempts = 0;
        assert_eq!(field_of(validate(&config)), "probe.max_attempts");

        let mut config = Config::default();
        config.probe.initial_delay_ms = 10_000;
        config.probe.max_delay_ms = 1_000;
        assert_eq!(field_of(validate(&config)), "probe.initial_delay_ms");
    }

    #[test]
    fn test_logging_values() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.level");

        let mut config = Config::default();
        config.logging.format = "xml".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.format");
    }
}
