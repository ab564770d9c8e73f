// crates/aws-env-cli/src/lib.rs
// ============================================================================
// Module: aws-env CLI Library
// Description: Shared CLI helpers for the aws-env binary.
// Purpose: Expose messages, logging and export orchestration to the binary.
// Dependencies: aws-env-core, aws-env-ssm, aws-env-config, tracing
// ============================================================================

//! ## Overview
//! The `aws-env` binary is a thin shell around this library: [`messages`]
//! owns every diagnostic string, [`logging`] installs the stderr tracing
//! subscriber, and [`export`] resolves flags against configuration and drives
//! one export run against any parameter store.

pub mod export;
pub mod logging;
pub mod messages;

#[cfg(test)]
mod tests;
