//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::LoggingConfig;
use crate::config::validation::validate_config;
use crate::config::ConfigError;

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<LoggingConfig, ConfigError> {
    let config: LoggingConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LoggingConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{BackpressurePolicy, ConsoleTarget};
    use crate::config::schema::AdapterKind;
    use crate::level::Level;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
        [defaults]
        threshold = "debug"

        [[adapters]]
        name = "console"
        kind = "console"
        target = "stderr"
        threshold = "warn"

        [[adapters]]
        name = "file"
        kind = "file"
        path = "/var/log/service.log"
        queue = { capacity = 64, policy = "drop" }
    "#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();

        assert_eq!(config.defaults.threshold, Level::DEBUG);
        assert_eq!(config.adapters.len(), 2);

        let console = &config.adapters[0];
        assert_eq!(console.kind, AdapterKind::Console);
        assert_eq!(console.target, ConsoleTarget::Stderr);
        assert_eq!(console.threshold, Some(Level::WARN));

        let file = &config.adapters[1];
        assert_eq!(file.kind, AdapterKind::File);
        assert!(file.threshold.is_none());
        let queue = file.queue.as_ref().unwrap();
        assert_eq!(queue.capacity, 64);
        assert_eq!(queue.policy, BackpressurePolicy::Drop);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.defaults.threshold, Level::INFO);
        assert!(config.adapters.is_empty());
    }

    #[test]
    fn test_unknown_level_is_parse_error() {
        let err = parse_config(
            r#"
            [[adapters]]
            name = "console"
            kind = "console"
            threshold = "loud"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_surfaces() {
        let err = parse_config(
            r#"
            [[adapters]]
            name = "file"
            kind = "file"
            "#,
        )
        .unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 1),
            other => panic!("Expected ConfigError::Validation, got {}", other),
        }
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logging.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.adapters[0].name, "console");

        let missing = load_config(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
