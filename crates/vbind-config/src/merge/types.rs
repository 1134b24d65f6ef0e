use std::collections::HashMap;
use std::fmt;

/// Which configuration layer a value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLayer {
    /// Compiled-in defaults (`defaults.toml`).
    Defaults,
    /// System-wide configuration (`/etc/vbind/config.toml`).
    System,
    /// User-level configuration (`~/.vbind/config.toml`).
    User,
    /// File passed explicitly by the caller.
    File(String),
    /// Environment variable fallback.
    Environment,
}

impl ConfigLayer {
    /// Returns true for layers read from a config file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::System | Self::User | Self::File(_))
    }
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => write!(f, "defaults"),
            Self::System => write!(f, "system (/etc/vbind/config.toml)"),
            Self::User => write!(f, "user (~/.vbind/config.toml)"),
            Self::File(path) => write!(f, "file ({path})"),
            Self::Environment => write!(f, "environment variable"),
        }
    }
}

/// Tracks which layer set each field's value, keyed by dotted path.
pub type FieldSources = HashMap<String, ConfigLayer>;
