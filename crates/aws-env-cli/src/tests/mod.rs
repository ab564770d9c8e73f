// crates/aws-env-cli/src/tests/mod.rs
// ============================================================================
// Module: CLI Unit Tests
// Description: Crate-internal tests for the CLI library.
// Purpose: Cover helpers that are not part of the public API.
// Dependencies: aws-env-cli
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions are permitted."
)]
