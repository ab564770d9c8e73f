// crates/aws-env-config/src/config.rs
// ============================================================================
// Module: aws-env Configuration
// Description: Configuration loading and validation for aws-env.
// Purpose: Provide strict config parsing with hard size and path limits.
// Dependencies: aws-env-core, aws-env-ssm, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is read from a TOML file only when one is named explicitly,
//! either by the caller or through [`CONFIG_ENV_VAR`]. Without a file every
//! setting keeps its default. Unknown keys, oversized files and invalid
//! values are rejected.
//!
//! ```toml
//! [export]
//! format = "dotenv"
//! recursive = true
//!
//! [ssm]
//! region = "eu-west-1"
//! page_size = 10
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use aws_env_core::OutputFormat;
use aws_env_ssm::SsmStoreConfig;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "AWS_ENV_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Top-level aws-env configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsEnvConfig {
    /// Export defaults.
    #[serde(default)]
    pub export: ExportConfig,
    /// SSM client settings.
    #[serde(default)]
    pub ssm: SsmStoreConfig,
}

/// Export defaults applied when the matching flag is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Default output format.
    #[serde(default)]
    pub format: Option<OutputFormat>,
    /// Default recursion setting.
    #[serde(default)]
    pub recursive: Option<bool>,
}

impl AwsEnvConfig {
    /// Loads configuration from `path`, or from [`CONFIG_ENV_VAR`] when `path`
    /// is `None`. Returns defaults when neither names a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(resolved) = resolve_path(path)? else {
            return Ok(Self::default());
        };
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ssm.validate().map_err(|err| ConfigError::Invalid(err.to_string()))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or the environment.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    match env::var(CONFIG_ENV_VAR) {
        Ok(env_path) if !env_path.is_empty() => {
            if env_path.len() > MAX_TOTAL_PATH_LENGTH {
                return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
            }
            Ok(Some(PathBuf::from(env_path)))
        }
        _ => Ok(None),
    }
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}
