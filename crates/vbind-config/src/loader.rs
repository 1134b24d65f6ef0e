//! Config file discovery and layered loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.toml` → base
//! 2. Merge `/etc/vbind/config.toml` (system)
//! 3. Merge `~/.vbind/config.toml` (user)
//! 4. Merge the explicitly requested file, if any
//! 5. Apply env var fallbacks for fields no file set
//! 6. Deserialize merged tree → `Config`
//! 7. Validate

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{apply_env_fallbacks, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources, deep_merge_tracking, record_leaves};
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// System-wide config location.
const SYSTEM_CONFIG_PATH: &str = "/etc/vbind/config.toml";

/// A validated configuration together with where each value came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final configuration.
    pub config: Config,
    /// Which layer set each field, keyed by dotted path.
    pub field_sources: FieldSources,
    /// Config files that were found and merged, in merge order.
    pub loaded_files: Vec<String>,
}

impl ResolvedConfig {
    /// Layer that set `field` (e.g. `"search.hosts"`).
    #[must_use]
    pub fn source_of(&self, field: &str) -> Option<&ConfigLayer> {
        self.field_sources.get(field)
    }
}

/// Where the layered loader looks for its inputs.
struct LoadSources<'a> {
    system_path: &'a Path,
    user_path: PathBuf,
    explicit: Option<&'a Path>,
    env_vars: &'a HashMap<String, String>,
}

/// Load the configuration with layered file precedence.
///
/// `explicit` is a file requested by the caller; unlike the system and user
/// files it must exist. `home_override` replaces the user's home directory
/// for discovery of `~/.vbind/config.toml`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any config file is malformed, the explicit
/// file is missing, or the final merged configuration fails validation.
pub fn load(explicit: Option<&Path>, home_override: Option<&Path>) -> ConfigResult<ResolvedConfig> {
    let home_dir = match home_override {
        Some(h) => h.to_path_buf(),
        None => home_directory()?,
    };
    let env_vars = collect_env_vars();

    load_layers(&LoadSources {
        system_path: Path::new(SYSTEM_CONFIG_PATH),
        user_path: home_dir.join(".vbind").join("config.toml"),
        explicit,
        env_vars: &env_vars,
    })
}

fn load_layers(sources: &LoadSources<'_>) -> ConfigResult<ResolvedConfig> {
    // 1. Embedded defaults.
    let mut merged = parse_toml(DEFAULTS_TOML, "<embedded defaults>")?;
    let mut field_sources = FieldSources::new();
    let mut loaded_files = Vec::new();
    record_leaves(&merged, "", &ConfigLayer::Defaults, &mut field_sources);

    // 2–3. System and user files are optional.
    for (path, layer) in [
        (sources.system_path.to_path_buf(), ConfigLayer::System),
        (sources.user_path.clone(), ConfigLayer::User),
    ] {
        if let Some(overlay) = try_load_file(&path)? {
            deep_merge_tracking(&mut merged, &overlay, "", &layer, &mut field_sources);
            info!(path = %path.display(), layer = %layer, "loaded config file");
            loaded_files.push(path.display().to_string());
        }
    }

    // 4. Explicit file is required.
    if let Some(path) = sources.explicit {
        let overlay = try_load_file(path)?.ok_or_else(|| ConfigError::ReadError {
            path: path.display().to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })?;
        let layer = ConfigLayer::File(path.display().to_string());
        deep_merge_tracking(&mut merged, &overlay, "", &layer, &mut field_sources);
        info!(path = %path.display(), "loaded config file");
        loaded_files.push(path.display().to_string());
    }

    // 5. Env var fallbacks.
    let env_count = apply_env_fallbacks(&mut merged, &mut field_sources, sources.env_vars);
    if env_count > 0 {
        debug!(count = env_count, "applied environment variable fallbacks");
    }

    // 6–7. Deserialize and validate.
    let config: Config = merged
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: "<merged config>".to_owned(),
            source: e,
        })?;
    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        field_sources,
        loaded_files,
    })
}

/// Load a single config file over the built-in defaults (no layering, no env).
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed, or the
/// result fails validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let overlay = try_load_file(path)?.ok_or_else(|| ConfigError::ReadError {
        path: path.display().to_string(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    })?;

    let mut merged = parse_toml(DEFAULTS_TOML, "<embedded defaults>")?;
    let mut sources = FieldSources::new();
    deep_merge_tracking(
        &mut merged,
        &overlay,
        "",
        &ConfigLayer::File(path.display().to_string()),
        &mut sources,
    );

    let config: Config = merged
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: path.display().to_string(),
            source: e,
        })?;
    validate::validate(&config)?;
    Ok(config)
}

fn parse_toml(content: &str, origin: &str) -> ConfigResult<toml::Value> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: origin.to_owned(),
        source: e,
    })
}

/// Try to load a file, returning `None` if the file doesn't exist.
///
/// Reads once and checks the size afterwards so there is no separate stat.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                content.len()
            ),
        });
    }

    parse_toml(&content, &path.display().to_string()).map(Some)
}

/// Determine the user's home directory.
fn home_directory() -> ConfigResult<PathBuf> {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDir)
}
