//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use webstat_common::{Result as WebStatResult, WebStatError};

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "WEBSTAT_CONFIG_PATH";

/// File names probed in the working directory, in order
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["webstat.yaml", "webstat.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for WebStatError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        WebStatError::config_with_source(message, err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config = Self::parse_yaml(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Parse a YAML document; absent sections and fields take their defaults
    pub fn parse_yaml(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from the usual places, falling back to defaults
    pub fn load() -> WebStatResult<Config> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            debug!(path = %config_path, "loading configuration from {}", CONFIG_PATH_VAR);
            Self::load_config(&config_path)?
        } else if let Some(found) = DEFAULT_CONFIG_FILES.iter().find(|f| Path::new(f).exists()) {
            debug!(path = %found, "loading configuration file");
            Self::load_config(found)?
        } else {
            debug!("no configuration file found, using defaults");
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate_all().map_err(ConfigError::ValidationError)?;
            config
        };

        Ok(config)
    }

    /// Apply process environment overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |name| env::var(name).ok())
    }

    /// Apply overrides read through `lookup`
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Input overrides
        if let Some(path) = lookup("WEBSTAT_INPUT") {
            config.input.path = path;
        }

        if let Some(delimiter) = lookup("WEBSTAT_DELIMITER") {
            config.input.delimiter = delimiter;
        }

        if let Some(format) = lookup("WEBSTAT_TIMESTAMP_FORMAT") {
            config.input.timestamp_format = Some(format);
        }

        // Report overrides
        if let Some(pages) = lookup("WEBSTAT_FUNNEL_PAGES") {
            config.report.funnel_pages = pages
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Chart overrides
        if let Some(dir) = lookup("WEBSTAT_OUTPUT_DIR") {
            config.charts.output_dir = dir;
        }

        if let Some(enabled) = lookup("WEBSTAT_CHARTS_ENABLED") {
            config.charts.enabled = parse_var("WEBSTAT_CHARTS_ENABLED", &enabled)?;
        }

        if let Some(width) = lookup("WEBSTAT_CHART_WIDTH") {
            config.charts.width = parse_var("WEBSTAT_CHART_WIDTH", &width)?;
        }

        if let Some(height) = lookup("WEBSTAT_CHART_HEIGHT") {
            config.charts.height = parse_var("WEBSTAT_CHART_HEIGHT", &height)?;
        }

        // Logging overrides
        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = lookup("LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a temporary YAML config file for testing
    fn create_test_config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = "input:\n  path: \"data/sessions.csv\"\n  delimiter: \";\"\n  timestamp_format: \"%d/%m/%Y %H:%M\"\nreport:\n  top_pages: 5\n  peak_hours: 2\n  funnel_pages: [\"/basket\", \"/pay\"]\n  histogram_bins: 20\ncharts:\n  enabled: false\n  output_dir: \"out\"\n  width: 1024\n  height: 768\n  background_color: \"#F0F0F0\"\n  font_family: \"DejaVu Sans\"\n  title_font_size: 18\n  label_font_size: 12\nlogging:\n  level: \"debug\"\n  format: \"json\"\n  colored: false";

        let config = ConfigLoader::parse_yaml(yaml).expect("Failed to parse config");

        assert_eq!(config.input.path, "data/sessions.csv");
        assert_eq!(config.input.delimiter_byte(), b';');
        assert_eq!(config.input.timestamp_format.as_deref(), Some("%d/%m/%Y %H:%M"));
        assert_eq!(config.report.top_pages, 5);
        assert_eq!(config.report.funnel_pages, vec!["/basket", "/pay"]);
        assert!(!config.charts.enabled);
        assert_eq!(config.charts.width, 1024);
        assert_eq!(config.logging.format, "json");
        assert!(config.validate_all().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = ConfigLoader::parse_yaml("charts:\n  width: 1200\n").expect("parse");

        assert_eq!(config.charts.width, 1200);
        assert_eq!(config.charts.height, 600);
        assert_eq!(config.input.path, "web_traffic.csv");
        assert_eq!(config.report.histogram_bins, 50);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = ConfigLoader::parse_yaml("  \n").expect("parse");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_file = create_test_config_file("input:\n  path: [unclosed");
        let result = ConfigLoader::load_config(temp_file.path());

        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_error() {
        let temp_file = create_test_config_file("report:\n  peak_hours: 0\n");
        let result = ConfigLoader::load_config(temp_file.path());

        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config("/nonexistent/path/webstat.yaml");
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_overrides_replace_values() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("WEBSTAT_INPUT", "/data/traffic.csv"),
            ("WEBSTAT_OUTPUT_DIR", "/tmp/charts"),
            ("WEBSTAT_CHARTS_ENABLED", "false"),
            ("WEBSTAT_CHART_WIDTH", "1500"),
            ("WEBSTAT_FUNNEL_PAGES", "/a, /b,,/c"),
            ("LOG_LEVEL", "debug"),
        ]);

        ConfigLoader::apply_overrides(&mut config, lookup).expect("overrides apply");

        assert_eq!(config.input.path, "/data/traffic.csv");
        assert_eq!(config.charts.output_dir, "/tmp/charts");
        assert!(!config.charts.enabled);
        assert_eq!(config.charts.width, 1500);
        assert_eq!(config.report.funnel_pages, vec!["/a", "/b", "/c"]);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_override_parse_error_names_variable() {
        let mut config = Config::default();
        let lookup = lookup_from(&[("WEBSTAT_CHART_HEIGHT", "tall")]);

        let err = ConfigLoader::apply_overrides(&mut config, lookup).unwrap_err();
        match err {
            ConfigError::EnvParseError { var, .. } => assert_eq!(var, "WEBSTAT_CHART_HEIGHT"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_config_error_converts_to_webstat_error() {
        let err: WebStatError = ConfigError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ))
        .into();
        assert_eq!(err.kind(), "config");
        assert!(err.to_string().contains("Failed to read configuration file"));
    }
}
