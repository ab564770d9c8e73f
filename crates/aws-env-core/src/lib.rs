// crates/aws-env-core/src/lib.rs
// ============================================================================
// Module: aws-env Core Library
// Description: Public API surface for the parameter export pipeline.
// Purpose: Expose the store contract, formatting rules, and traversal driver.
// Dependencies: crate::{escape, format, history, interfaces, memory, naming, traverse}
// ============================================================================

//! ## Overview
//! aws-env exports hierarchical key/value configuration from a parameter store
//! as shell `export` statements, dotenv assignments, or property-file lines.
//! This crate holds the whole pipeline and is backend-agnostic: stores plug in
//! through [`ParameterStore`], and the root path is always passed in
//! explicitly rather than read from the environment.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod escape;
pub mod format;
pub mod history;
pub mod interfaces;
pub mod memory;
pub mod naming;
pub mod traverse;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use escape::escape_value;
pub use format::ExportRecord;
pub use format::OutputFormat;
pub use format::SUPPORTED_FORMATS;
pub use format::UnsupportedFormat;
pub use format::format_lines;
pub use format::render_record;
pub use history::HistoryResolver;
pub use interfaces::HistoryEntry;
pub use interfaces::Page;
pub use interfaces::Parameter;
pub use interfaces::ParameterStore;
pub use interfaces::PathQuery;
pub use interfaces::StoreError;
pub use memory::InMemoryParameterStore;
pub use naming::map_identifier;
pub use traverse::ExportError;
pub use traverse::ExportRecords;
pub use traverse::ExportRequest;
pub use traverse::ExportSummary;
pub use traverse::ParameterPages;
pub use traverse::ParameterTraverser;
pub use traverse::export_parameters;
