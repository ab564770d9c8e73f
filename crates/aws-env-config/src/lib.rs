// crates/aws-env-config/src/lib.rs
// ============================================================================
// Module: aws-env Config Library
// Description: Public API surface for aws-env configuration files.
// Purpose: Expose the TOML config model and its loader.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Optional TOML configuration for the aws-env CLI: default export options and
//! SSM client settings. Command-line flags always take precedence over the file.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::AwsEnvConfig;
pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::ExportConfig;
pub use config::MAX_CONFIG_FILE_SIZE;
