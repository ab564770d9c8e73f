// crates/aws-env-cli/src/logging.rs
// ============================================================================
// Module: CLI Logging
// Description: Installs the stderr tracing subscriber for the CLI.
// Purpose: Keep diagnostics off stdout, which carries sourceable output.
// Dependencies: tracing-subscriber
// ============================================================================

//! ## Overview
//! Library crates emit `tracing` events; this module decides where they go.
//! Events are always written to stderr. The filter comes from `RUST_LOG`
//! and defaults to [`DEFAULT_FILTER`], so a normal run prints nothing beyond
//! the catalog error lines.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

// ============================================================================
// SECTION: Initialization
// ============================================================================

/// Builds the event filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global stderr subscriber.
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one is kept.
pub fn init() -> bool {
    fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .is_ok()
}
