//! Application configuration
//!
//! All process-wide settings are read once at startup into [`AppConfig`] and
//! handed to the router through its state. Nothing reads the environment
//! after that.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// How failures without an explicit status are turned into status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorClassification {
    /// Derive the status from the error kind
    #[default]
    Full,
    /// Every unclassified failure is a 500
    Basic,
}

/// Process configuration
///
/// # Environment Variables
/// - `APP_ENV`: `production` enables secure cookies and hides stack traces (default: `development`)
/// - `JWT_SECRET`: secret used to sign tokens (required)
/// - `PORT`: listen port (default: 8000)
/// - `ERROR_CLASSIFICATION`: `full` or `basic` (default: `full`)
/// - `CORS_ORIGINS`: comma-separated origins allowed to send credentials
///   (default: `http://localhost:3000`)
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub jwt_secret: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub error_classification: ErrorClassification,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> String {
    "http://localhost:3000".to_string()
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(Environment::default())
    }

    /// Load configuration from an explicit environment source
    pub fn from_source(source: Environment) -> Result<Self, ConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        if config.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message("JWT_SECRET must not be empty".to_string()));
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Origins allowed by the CORS layer, blanks removed
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<config::Map<String, String>>();
        Environment::default().source(Some(source))
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_source(environment(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.port, 8000);
        assert_eq!(config.error_classification, ErrorClassification::Full);
        assert!(!config.is_production());
        assert_eq!(config.cors_origin_list(), vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_app_config_custom_values() {
        let config = AppConfig::from_source(environment(&[
            ("JWT_SECRET", "s3cret"),
            ("APP_ENV", "production"),
            ("PORT", "5000"),
            ("ERROR_CLASSIFICATION", "basic"),
            ("CORS_ORIGINS", "https://a.example, ,https://b.example"),
        ]))
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.port, 5000);
        assert_eq!(config.error_classification, ErrorClassification::Basic);
        assert_eq!(
            config.cors_origin_list(),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_app_config_requires_secret() {
        assert!(AppConfig::from_source(environment(&[])).is_err());
        assert!(AppConfig::from_source(environment(&[("JWT_SECRET", "  ")])).is_err());
    }

    #[test]
    fn test_app_config_rejects_unknown_classification() {
        let result = AppConfig::from_source(environment(&[
            ("JWT_SECRET", "s3cret"),
            ("ERROR_CLASSIFICATION", "fancy"),
        ]));
        assert!(result.is_err());
    }
}
