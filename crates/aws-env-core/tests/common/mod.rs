// crates/aws-env-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared helpers for aws-env-core tests.
// Purpose: Run exports into memory and compare the produced lines.
// Dependencies: aws-env-core
// ============================================================================

//! ## Overview
//! Provides export helpers that capture output in a byte buffer, plus a
//! writer that fails after a fixed number of writes.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]
#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::io;
use std::io::Write;

use aws_env_core::ExportError;
use aws_env_core::ExportRequest;
use aws_env_core::ExportSummary;
use aws_env_core::OutputFormat;
use aws_env_core::ParameterStore;
use aws_env_core::export_parameters;

/// Builds an export request.
pub fn request(root: &str, recursive: bool, format: OutputFormat) -> ExportRequest {
    ExportRequest {
        root: root.to_string(),
        recursive,
        format,
    }
}

/// Runs an export and returns the result with everything written so far.
pub fn export_to_string<S: ParameterStore>(
    store: &S,
    request: &ExportRequest,
) -> (Result<ExportSummary, ExportError>, String) {
    let mut out = Vec::new();
    let result = export_parameters(store, request, &mut out);
    (result, String::from_utf8(out).expect("utf-8 output"))
}

/// Runs an export that must succeed and returns its output lines.
pub fn export_lines<S: ParameterStore>(store: &S, request: &ExportRequest) -> Vec<String> {
    let (result, output) = export_to_string(store, request);
    result.expect("export succeeds");
    output.lines().map(str::to_string).collect()
}

/// Writer that rejects every write after `remaining` successful ones.
pub struct FailingWriter {
    /// Writes still accepted.
    pub remaining: usize,
    /// Bytes accepted so far.
    pub written: Vec<u8>,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        }
        self.remaining -= 1;
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
