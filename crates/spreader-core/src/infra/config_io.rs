//! Configuration file loading

use crate::domain::config::{ConfigError, DetectorConfig};
use std::fs;
use std::path::Path;

/// Load and validate a TOML configuration file
///
/// Missing keys fall back to their defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<DetectorConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&text)
}

/// Parse and validate configuration text
pub fn parse_config(text: &str) -> Result<DetectorConfig, ConfigError> {
    let config: DetectorConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::ParsePolicy;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), DetectorConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = parse_config(
            r#"
parse_policy = "lenient"

[calibration]
max_time = 10.0
"#,
        )
        .unwrap();

        assert_eq!(config.parse_policy, ParsePolicy::Lenient);
        assert_eq!(config.calibration.max_time, 10.0);
        assert_eq!(config.calibration.min_distance, 1.0);
        assert_eq!(config.thresholds, DetectorConfig::default().thresholds);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = parse_config(
            r#"
[thresholds]
medical_supervision = 0.1
quarantine = 0.3
"#,
        );
        assert!(matches!(result, Err(ConfigError::ThresholdOrder { .. })));

        let result = parse_config("parse_policy = \"sloppy\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("detector.toml");
        std::fs::write(&path, "[thresholds]\nquarantine = 0.05\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.thresholds.quarantine, 0.05);

        let missing = load_config(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
