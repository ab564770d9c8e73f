// crates/aws-env-core/src/escape.rs
// ============================================================================
// Module: Value Escaping
// Description: Normalizes raw parameter values into single-line literals.
// Purpose: Keep every exported value on one output line.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Only newline characters are rewritten, into the two-character sequence
//! `\n`. Quotes, backslashes and `$` pass through untouched; the supported
//! output syntaxes (`$'...'`, `"..."`, properties) all read `\n` back as a
//! newline.

/// Replaces every newline in `raw` with a literal backslash-n.
#[must_use]
pub fn escape_value(raw: &str) -> String {
    raw.replace('\n', "\\n")
}
