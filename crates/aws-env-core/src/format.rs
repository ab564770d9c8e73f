// crates/aws-env-core/src/format.rs
// ============================================================================
// Module: Output Formatting
// Description: Renders export records into shell, dotenv, or property lines.
// Purpose: Produce the exact line shapes consumed by `source`, dotenv loaders,
//          and property-file readers.
// Dependencies: serde, thiserror, crate::{escape, naming}
// ============================================================================

//! ## Overview
//! Rendering is a pure function of its inputs: the same record, root and
//! format always produce byte-identical lines.
//!
//! | format    | lines                                             |
//! |-----------|---------------------------------------------------|
//! | `exports` | `export <id>=$'<value>'`                          |
//! | `dotenv`  | `<id>="<value>"`                                  |
//! | `prop`    | optional `# <description>`, then `<key> = <value>` |

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::escape::escape_value;
use crate::naming::ENV_SEPARATOR;
use crate::naming::PROPERTY_SEPARATOR;
use crate::naming::map_identifier;

// ============================================================================
// SECTION: Output Format
// ============================================================================

/// Supported output syntaxes.
///
/// # Invariants
/// - Labels are stable; they are the accepted CLI and config values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Shell `export` statements using ANSI-C quoting.
    #[default]
    Exports,
    /// Dotenv `KEY="value"` assignments.
    Dotenv,
    /// Java-style `key = value` properties with description comments.
    Prop,
}

/// All output formats in presentation order.
pub const SUPPORTED_FORMATS: &[OutputFormat] =
    &[OutputFormat::Exports, OutputFormat::Dotenv, OutputFormat::Prop];

impl OutputFormat {
    /// Returns the stable label for the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exports => "exports",
            Self::Dotenv => "dotenv",
            Self::Prop => "prop",
        }
    }

    /// Returns the separator used to flatten paths for this format.
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::Exports | Self::Dotenv => ENV_SEPARATOR,
            Self::Prop => PROPERTY_SEPARATOR,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected output format label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported output format: {0}")]
pub struct UnsupportedFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnsupportedFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SUPPORTED_FORMATS
            .iter()
            .copied()
            .find(|format| format.as_str() == value)
            .ok_or_else(|| UnsupportedFormat(value.to_string()))
    }
}

// ============================================================================
// SECTION: Export Record
// ============================================================================

/// A parameter paired with its resolved description, ready for rendering.
///
/// Records are ephemeral: produced by the traverser, rendered once, dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    /// Fully-qualified parameter path.
    pub path: String,
    /// Raw parameter value.
    pub value: String,
    /// Latest non-empty description, or empty.
    pub description: String,
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Formats one identifier/value pair into output lines (without newlines).
///
/// `escaped_value` must already be escaped. `description` is only rendered by
/// [`OutputFormat::Prop`], and only when non-empty.
#[must_use]
pub fn format_lines(
    identifier: &str,
    escaped_value: &str,
    description: &str,
    format: OutputFormat,
) -> Vec<String> {
    match format {
        OutputFormat::Exports => vec![format!("export {identifier}=$'{escaped_value}'")],
        OutputFormat::Dotenv => vec![format!("{identifier}=\"{escaped_value}\"")],
        OutputFormat::Prop => {
            let mut lines = Vec::with_capacity(2);
            if !description.is_empty() {
                lines.push(format!("# {description}"));
            }
            lines.push(format!("{identifier} = {escaped_value}"));
            lines
        }
    }
}

/// Renders a record exported from `root` into output lines.
#[must_use]
pub fn render_record(record: &ExportRecord, root: &str, format: OutputFormat) -> Vec<String> {
    let identifier = map_identifier(&record.path, root, format.separator());
    let escaped = escape_value(&record.value);
    format_lines(&identifier, &escaped, &record.description, format)
}
