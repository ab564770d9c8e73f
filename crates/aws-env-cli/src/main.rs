// crates/aws-env-cli/src/main.rs
// ============================================================================
// Module: aws-env CLI Entry Point
// Description: Exports SSM parameters under AWS_ENV_PATH as sourceable lines.
// Purpose: Provide a fail-fast CLI around the export pipeline.
// Dependencies: clap, aws-env-cli, aws-env-config, aws-env-ssm
// ============================================================================

//! ## Overview
//! `aws-env` reads the root path from `AWS_ENV_PATH`, exports every parameter
//! below it to stdout and exits. Stdout carries only exported lines so the
//! output can be sourced directly; diagnostics go to stderr. Without a root
//! path the binary does nothing and exits successfully, which keeps local
//! runs of wrapped programs working.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use aws_env_cli::export::CliError;
use aws_env_cli::export::CliResult;
use aws_env_cli::export::ExportArgs;
use aws_env_cli::export::ExportOutcome;
use aws_env_cli::export::PATH_ENV;
use aws_env_cli::export::resolve_root;
use aws_env_cli::export::run_export;
use aws_env_cli::logging;
use aws_env_cli::t;
use aws_env_config::AwsEnvConfig;
use aws_env_ssm::SsmParameterStore;
use clap::ArgAction;
use clap::Parser;
use tracing::debug;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "aws-env", disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
    /// Include parameters in nested sub-paths.
    #[arg(long, action = ArgAction::SetTrue)]
    recursive: bool,
    /// Output format: exports, dotenv or prop [default: exports].
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,
    /// Path to a TOML config file (overrides `AWS_ENV_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// AWS region override.
    #[arg(long, value_name = "REGION")]
    region: Option<String>,
    /// Custom SSM endpoint URL.
    #[arg(long = "endpoint-url", value_name = "URL")]
    endpoint_url: Option<String>,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(err.message()),
    }
}

/// Executes one export run.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let raw_root = std::env::var(PATH_ENV).ok();
    let Some(root) = resolve_root(raw_root.as_deref()) else {
        write_stderr_line(&t!("main.local_run", env = PATH_ENV))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        return Ok(ExitCode::SUCCESS);
    };

    logging::init();

    let config = AwsEnvConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let args = ExportArgs {
        recursive: cli.recursive,
        format: cli.format,
        region: cli.region,
        endpoint: cli.endpoint_url,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = run_export(
        Some(root),
        &args,
        &config,
        |ssm| {
            SsmParameterStore::new(ssm.clone())
                .map_err(|err| CliError::new(t!("store.init_failed", error = err)))
        },
        &mut out,
    )?;
    if let ExportOutcome::Exported(summary) = outcome {
        debug!(parameters = summary.parameters, lines = summary.lines, "aws-env finished");
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message for `stream`.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    t!("output.write_failed", stream = stream, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
