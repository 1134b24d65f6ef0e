//! Environment variable fallbacks.
//!
//! Env vars are a fallback, not an override: they only fill fields that no
//! config file set. Built-in defaults do not count as set.

use std::collections::HashMap;
use std::hash::BuildHasher;

use tracing::debug;

use crate::merge::{ConfigLayer, FieldSources};

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
}

/// All supported `VBIND_*` env var mappings.
const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "VBIND_SEARCH_VERSION",
        field_path: "search.version",
    },
    EnvMapping {
        var_name: "VBIND_SEARCH_HOSTS",
        field_path: "search.hosts",
    },
    EnvMapping {
        var_name: "VBIND_SEARCH_VERSION_KEY",
        field_path: "search.version_key",
    },
    EnvMapping {
        var_name: "VBIND_PROBE_TIMEOUT_SECS",
        field_path: "probe.timeout_secs",
    },
    EnvMapping {
        var_name: "VBIND_PROBE_MAX_ATTEMPTS",
        field_path: "probe.max_attempts",
    },
    EnvMapping {
        var_name: "VBIND_PROBE_INITIAL_DELAY_MS",
        field_path: "probe.initial_delay_ms",
    },
    EnvMapping {
        var_name: "VBIND_PROBE_MAX_DELAY_MS",
        field_path: "probe.max_delay_ms",
    },
    EnvMapping {
        var_name: "VBIND_LOG_LEVEL",
        field_path: "logging.level",
    },
    EnvMapping {
        var_name: "VBIND_LOG_FORMAT",
        field_path: "logging.format",
    },
];

/// Apply environment variable fallbacks to fields no config file set.
///
/// Returns the number of env vars applied.
pub fn apply_env_fallbacks<S: BuildHasher>(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        if sources.get(mapping.field_path).is_some_and(ConfigLayer::is_file) {
            continue;
        }

        let Some(val) = env_vars.get(mapping.var_name) else {
            continue;
        };
        if val.trim().is_empty() {
            continue;
        }

        debug!(
            var = mapping.var_name,
            field = mapping.field_path,
            "applying env var fallback"
        );
        set_field(merged, mapping.field_path, coerce_to_toml_value(mapping.field_path, val));
        sources.insert(mapping.field_path.to_owned(), ConfigLayer::Environment);
        count = count.saturating_add(1);
    }

    count
}

/// Set a dotted field in the TOML tree, creating intermediate tables.
fn set_field(root: &mut toml::Value, path: &str, value: toml::Value) {
    let (parents, leaf) = path.rsplit_once('.').unwrap_or(("", path));

    let mut current = root;
    for segment in parents.split('.').filter(|s| !s.is_empty()) {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        current = table
            .entry(segment)
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    if let Some(table) = current.as_table_mut() {
        table.insert(leaf.to_owned(), value);
    }
}

/// Coerce an env var string to the TOML type of the field it fills.
fn coerce_to_toml_value(path: &str, val: &str) -> toml::Value {
    if matches!(
        path,
        "probe.timeout_secs" | "probe.max_attempts" | "probe.initial_delay_ms" | "probe.max_delay_ms"
    ) && let Ok(i) = val.trim().parse::<i64>()
    {
        return toml::Value::Integer(i);
    }

    if path == "search.hosts" {
        return toml::Value::Array(
            val.split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(|h| toml::Value::String(h.to_owned()))
                .collect(),
        );
    }

    toml::Value::String(val.trim().to_owned())
}

/// Collect all current environment variables into a map.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}
