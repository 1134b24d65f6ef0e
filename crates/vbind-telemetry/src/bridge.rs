//! Conversion from the `[logging]` config section.

use vbind_config::LoggingSection;

use crate::error::TelemetryError;
use crate::logging::{LogConfig, LogFormat};

impl TryFrom<&LoggingSection> for LogConfig {
    type Error = TelemetryError;

    fn try_from(section: &LoggingSection) -> Result<Self, Self::Error> {
        let format: LogFormat = section.format.parse()?;
        Ok(section
            .directives
            .iter()
            .fold(Self::new(&section.level).with_format(format), |config, d| {
                config.with_directive(d)
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_logging_section() {
        let section = LoggingSection {
            level: "debug".to_owned(),
            format: "json".to_owned(),
            directives: vec!["vbind_probe=trace".to_owned()],
        };

        let config = LogConfig::try_from(&section).unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.directives, vec!["vbind_probe=trace"]);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let section = LoggingSection {
            format: "xml".to_owned(),
            ..LoggingSection::default()
        };
        assert!(LogConfig::try_from(&section).is_err());
    }
}
