//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `router.base_path`.
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, std::env::var(BASE_URL_ENV).ok())
}

/// Load the built-in configuration, still honouring `BASE_URL`.
pub fn default_config() -> Result<AppConfig, ConfigError> {
    finish(AppConfig::default(), std::env::var(BASE_URL_ENV).ok())
}

/// Parse and validate TOML, applying a base path override if given.
pub fn parse_config(content: &str, base_url: Option<String>) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    finish(config, base_url)
}

fn finish(mut config: AppConfig, base_url: Option<String>) -> Result<AppConfig, ConfigError> {
    if let Some(base) = base_url.filter(|b| !b.trim().is_empty()) {
        tracing::debug!(base_path = %base, "Base path taken from environment");
        config.router.base_path = base;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
