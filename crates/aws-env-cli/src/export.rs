// crates/aws-env-cli/src/export.rs
// ============================================================================
// Module: Export Command
// Description: Resolves CLI flags against configuration and runs one export.
// Purpose: Keep the binary thin and the command logic testable.
// Dependencies: aws-env-core, aws-env-ssm, aws-env-config, thiserror
// ============================================================================

//! ## Overview
//! An export run goes through fixed stages:
//! 1. A missing or empty root path ends the run successfully with no output.
//! 2. Flags are merged over the config file and the output format is
//!    validated. Nothing touches the parameter store before this succeeds.
//! 3. The store is built through a caller-supplied connector.
//! 4. Parameters are streamed to the output writer.
//!
//! Errors are returned as [`CliError`] values carrying a catalog message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use aws_env_config::AwsEnvConfig;
use aws_env_core::ExportError;
use aws_env_core::ExportRequest;
use aws_env_core::ExportSummary;
use aws_env_core::OutputFormat;
use aws_env_core::ParameterStore;
use aws_env_ssm::SsmStoreConfig;
use thiserror::Error;

use crate::t;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the root path to export.
pub const PATH_ENV: &str = "AWS_ENV_PATH";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog error messages.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a rendered message.
    #[must_use]
    pub const fn new(message: String) -> Self {
        Self {
            message,
        }
    }

    /// Returns the rendered message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// CLI result alias for fallible operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Export settings taken from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportArgs {
    /// `--recursive` was given.
    pub recursive: bool,
    /// Raw `--format` value, validated during planning.
    pub format: Option<String>,
    /// `--region` override.
    pub region: Option<String>,
    /// `--endpoint-url` override.
    pub endpoint: Option<String>,
}

/// Fully resolved inputs for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    /// Traversal and formatting request.
    pub request: ExportRequest,
    /// Store settings after flag overrides.
    pub ssm: SsmStoreConfig,
}

/// Result of [`run_export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// No root path was set; nothing was exported.
    Skipped,
    /// Export finished.
    Exported(ExportSummary),
}

// ============================================================================
// SECTION: Planning
// ============================================================================

/// Returns the root path to export, or `None` when it is missing or empty.
#[must_use]
pub fn resolve_root(raw: Option<&str>) -> Option<&str> {
    raw.filter(|root| !root.is_empty())
}

/// Merges flags over `config` for `root`.
///
/// Flags win over the config file, which wins over defaults. Recursion is
/// enabled when either the flag or the config file enables it.
///
/// # Errors
///
/// Returns [`CliError`] when the format is unsupported or the merged store
/// settings are invalid.
pub fn plan_export(root: &str, args: &ExportArgs, config: &AwsEnvConfig) -> CliResult<ExportPlan> {
    let format = match args.format.as_deref() {
        Some(raw) => raw
            .parse::<OutputFormat>()
            .map_err(|err| CliError::new(t!("format.unsupported", format = err.0)))?,
        None => config.export.format.unwrap_or_default(),
    };
    let recursive = args.recursive || config.export.recursive.unwrap_or(false);
    let mut ssm = config.ssm.clone();
    if let Some(region) = &args.region {
        ssm.region = Some(region.clone());
    }
    if let Some(endpoint) = &args.endpoint {
        ssm.endpoint = Some(endpoint.clone());
    }
    ssm.validate().map_err(|err| CliError::new(t!("config.invalid", error = err)))?;
    Ok(ExportPlan {
        request: ExportRequest {
            root: root.to_string(),
            recursive,
            format,
        },
        ssm,
    })
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Runs one export of `root` to `out`.
///
/// `connect` builds the parameter store from the resolved settings and is
/// only called once planning succeeded.
///
/// # Errors
///
/// Returns [`CliError`] for configuration, store construction, store and
/// output failures. Output written before a failure is kept.
pub fn run_export<S, C, W>(
    root: Option<&str>,
    args: &ExportArgs,
    config: &AwsEnvConfig,
    connect: C,
    out: &mut W,
) -> CliResult<ExportOutcome>
where
    S: ParameterStore,
    C: FnOnce(&SsmStoreConfig) -> CliResult<S>,
    W: Write + ?Sized,
{
    let Some(root) = resolve_root(root) else {
        return Ok(ExportOutcome::Skipped);
    };
    let plan = plan_export(root, args, config)?;
    let store = connect(&plan.ssm)?;
    let summary = aws_env_core::export_parameters(&store, &plan.request, out)
        .map_err(|err| export_error(&plan.request.root, &err))?;
    Ok(ExportOutcome::Exported(summary))
}

/// Formats an export failure message.
fn export_error(root: &str, error: &ExportError) -> CliError {
    match error {
        ExportError::Store(err) => {
            CliError::new(t!("export.store_failed", path = root, error = err))
        }
        ExportError::Output(err) => CliError::new(t!("export.output_failed", error = err)),
    }
}
