//! Version keys for version-specific implementations.
//!
//! A [`Version`] identifies a release line of an external dependency. It is
//! the key under which version-specific implementations are registered and
//! the value a version probe reports at startup.

use std::cmp::Ordering;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic version of an external dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    /// Major version - the release line
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version
    pub patch: u32,
}

impl Version {
    /// Creates a new version.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Creates the key for a whole major release line (`major.0.0`).
    #[must_use]
    pub const fn major(major: u32) -> Self {
        Self::new(major, 0, 0)
    }

    /// Returns the major release line this version belongs to.
    ///
    /// `7.10.2` becomes `7.0.0`.
    #[must_use]
    pub const fn major_line(&self) -> Self {
        Self::major(self.major)
    }

    /// Checks if this version is newer than another.
    #[must_use]
    pub fn is_newer_than(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Greater
    }

    /// Parse a version from strings like `"7"`, `"7.10"` or `"7.10.2-SNAPSHOT"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty, has more than three numeric
    /// segments, or a segment is not a number.
    pub fn parse(s: &str) -> Result<Self, VersionParseError> {
        s.parse()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
    }
}

/// Error returned when parsing a version string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    /// Nothing to parse.
    #[error("empty version string")]
    Empty,
    /// Too many segments (expected at most "major.minor.patch").
    #[error("invalid version format: {0} (expected major[.minor[.patch]])")]
    InvalidFormat(String),
    /// A numeric segment could not be parsed.
    #[error("invalid version number: {0}")]
    InvalidNumber(#[from] ParseIntError),
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        // Pre-release and build metadata do not take part in selection.
        let core = trimmed
            .split_once(['-', '+'])
            .map_or(trimmed, |(core, _)| core);
        if core.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() > 3 {
            return Err(VersionParseError::InvalidFormat(s.to_string()));
        }

        let mut numbers = [0_u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part.parse()?;
        }
        let [major, minor, patch] = numbers;
        Ok(Self::new(major, minor, patch))
    }
}

impl TryFrom<String> for Version {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}
