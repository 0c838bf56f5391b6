//! Configuration for the `joko` command.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with JOKO_ prefix)
//! 3. .env files
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;

use joko_sim::SimulatorConfig;

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Simulator settings
    pub simulator: SimulatorConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;

        let config: CliConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with full precedence handling.
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => CliConfig::default(),
        };

        let config = config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Merge process environment variables into this configuration.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge variables from `lookup`; absent variables leave fields unchanged.
    pub fn merge_vars<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("JOKO_MAX_QUBITS") {
            self.simulator.max_qubits = parse_var("JOKO_MAX_QUBITS", &v)?;
        }
        if let Some(v) = lookup("JOKO_SEED") {
            self.simulator.seed = Some(parse_var("JOKO_SEED", &v)?);
        }
        if let Some(v) = lookup("JOKO_STRICT_COLUMNS") {
            self.simulator.strict_columns = parse_var("JOKO_STRICT_COLUMNS", &v)?;
        }
        if let Some(v) = lookup("JOKO_LOG_LEVEL") {
            self.logging.level = v;
        }
        Ok(self)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulator
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ParseError(format!("{key}: cannot parse '{value}'")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.simulator.max_qubits, 12);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "simulator:\n  max_qubits: 8\n  seed: 42\nlogging:\n  level: debug"
        )
        .unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(config.simulator.max_qubits, 8);
        assert_eq!(config.simulator.seed, Some(42));
        assert!(config.simulator.strict_columns);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_file_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "simulator:\n  max_qubits: 40").unwrap();
        assert!(matches!(
            CliConfig::from_file(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CliConfig::from_file("/nonexistent/joko.yaml"),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = CliConfig::default()
            .merge_vars(vars(&[
                ("JOKO_MAX_QUBITS", "16"),
                ("JOKO_SEED", "7"),
                ("JOKO_STRICT_COLUMNS", "false"),
                ("JOKO_LOG_LEVEL", "trace"),
            ]))
            .unwrap();
        assert_eq!(config.simulator.max_qubits, 16);
        assert_eq!(config.simulator.seed, Some(7));
        assert!(!config.simulator.strict_columns);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_env_absent_leaves_values() {
        let base = CliConfig::default();
        let merged = base.clone().merge_vars(vars(&[])).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn test_env_parse_error() {
        assert!(matches!(
            CliConfig::default().merge_vars(vars(&[("JOKO_SEED", "abc")])),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = CliConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}
