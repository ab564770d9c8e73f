// crates/aws-env-cli/src/messages.rs
// ============================================================================
// Module: CLI Messages
// Description: Operator-facing message catalog and placeholder rendering.
// Purpose: Keep every stderr diagnostic in one table with stable wording.
// Dependencies: Standard library only.
// ============================================================================

//! ## Overview
//! Stdout carries only exported lines, so every diagnostic aws-env prints is
//! looked up here by key and rendered through the [`t!`](crate::t) macro.
//! Placeholders are written `{name}` and are substituted in a single pass:
//! text inserted for one placeholder is never scanned again, so a root path
//! such as `/app/{error}` is reproduced literally.

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Message templates keyed by stable identifiers.
pub const MESSAGES: &[(&str, &str)] = &[
    ("main.version", "aws-env {version}"),
    ("main.local_run", "aws-env running locally, without {env}"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    (
        "format.unsupported",
        "Unsupported format option {format}. Must be 'exports', 'dotenv', or 'prop'.",
    ),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.invalid", "Invalid configuration: {error}"),
    ("store.init_failed", "Failed to initialize parameter store: {error}"),
    ("export.store_failed", "Failed to export parameters under {path}: {error}"),
    ("export.output_failed", "Failed to write exported parameters: {error}"),
];

/// Returns the template for `key`, if the catalog has one.
#[must_use]
pub fn template(key: &str) -> Option<&'static str> {
    MESSAGES.iter().find(|(name, _)| *name == key).map(|(_, text)| *text)
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders `key` with named `args`.
///
/// Unknown keys render as the key itself. Placeholders without a matching
/// argument are left as written; arguments without a placeholder are ignored.
#[must_use]
pub fn render(key: &str, args: &[(&str, String)]) -> String {
    let Some(template) = template(key) else {
        return key.to_string();
    };
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[.. open]);
        let after = &rest[open + 1 ..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open ..]);
            return out;
        };
        let name = &after[.. close];
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open ..= open + 1 + close]),
        }
        rest = &after[close + 1 ..];
    }
    out.push_str(rest);
    out
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Renders a catalog message with named arguments.
///
/// `t!("export.store_failed", path = root, error = err)` substitutes
/// `{path}` and `{error}` using each value's `Display` output.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {
        $crate::messages::render($key, &[$( (stringify!($name), $value.to_string()), )*])
    };
}
