// crates/aws-env-core/src/naming.rs
// ============================================================================
// Module: Identifier Mapping
// Description: Flattens hierarchical parameter paths into output identifiers.
// Purpose: Derive variable names and property keys relative to the export root.
// Dependencies: none
// ============================================================================

//! ## Overview
//! A parameter path such as `/app/prod/db/password` exported from the root
//! `/app/prod` becomes `db_password` (environment syntaxes) or `db.password`
//! (property syntax). No other characters are rewritten: names that are
//! invalid in the target syntax come out as-is.

/// Separator used by shell and dotenv identifiers.
pub const ENV_SEPARATOR: char = '_';
/// Separator used by property keys.
pub const PROPERTY_SEPARATOR: char = '.';

/// Maps a fully-qualified parameter path to an identifier relative to `root`.
///
/// `root` is stripped as a literal prefix, surrounding `/` characters are
/// trimmed from the remainder, and every remaining `/` becomes `separator`.
/// A path outside `root` keeps its full text as the remainder.
#[must_use]
pub fn map_identifier(full_path: &str, root: &str, separator: char) -> String {
    let remainder = full_path.strip_prefix(root).unwrap_or(full_path);
    remainder.trim_matches('/').replace('/', &separator.to_string())
}
