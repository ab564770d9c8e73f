// crates/aws-env-core/src/traverse.rs
// ============================================================================
// Module: Parameter Traversal
// Description: Lazy paginated traversal and streaming export of parameters.
// Purpose: Turn a root path into formatted output, one parameter at a time.
// Dependencies: thiserror, tracing, crate::{format, history, interfaces}
// ============================================================================

//! ## Overview
//! [`ParameterPages`] pulls one page of parameters at a time and stops when the
//! store stops returning a continuation token. [`ParameterTraverser`] pairs
//! each parameter with its latest description, and [`export_parameters`]
//! renders and writes each record before fetching the next one.
//!
//! ## Invariants
//! - Output order equals store pagination order.
//! - The first store error ends the traversal; lines already written stay
//!   written.
//! - Iterators are fused and cannot be restarted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::iter::FusedIterator;
use std::mem;

use thiserror::Error;
use tracing::debug;
use tracing::info;

use crate::format::ExportRecord;
use crate::format::OutputFormat;
use crate::format::render_record;
use crate::history::HistoryResolver;
use crate::interfaces::Parameter;
use crate::interfaces::ParameterStore;
use crate::interfaces::PathQuery;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Page Iterator
// ============================================================================

/// Pagination cursor state.
#[derive(Debug)]
enum Cursor {
    /// No page requested yet.
    Start,
    /// Next page is requested with this token.
    Next(String),
    /// Final page consumed or an error was returned.
    Exhausted,
}

/// Lazy iterator over every parameter under a path, across all pages.
#[derive(Debug)]
pub struct ParameterPages<'a, S: ?Sized> {
    /// Store queried for parameter pages.
    store: &'a S,
    /// Listing request reused for every page.
    query: PathQuery,
    /// Parameters of the current page not yet yielded.
    buffered: std::vec::IntoIter<Parameter>,
    /// Where the next page request starts.
    cursor: Cursor,
    /// Number of page requests issued.
    requests: usize,
}

impl<'a, S: ParameterStore + ?Sized> ParameterPages<'a, S> {
    /// Creates a page iterator for `query`. No request is issued until the
    /// first call to [`Iterator::next`].
    #[must_use]
    pub fn new(store: &'a S, query: PathQuery) -> Self {
        Self {
            store,
            query,
            buffered: Vec::new().into_iter(),
            cursor: Cursor::Start,
            requests: 0,
        }
    }

    /// Returns the number of page requests issued so far.
    #[must_use]
    pub const fn requests(&self) -> usize {
        self.requests
    }
}

impl<S: ParameterStore + ?Sized> Iterator for ParameterPages<'_, S> {
    type Item = Result<Parameter, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(parameter) = self.buffered.next() {
                return Some(Ok(parameter));
            }
            let token = match mem::replace(&mut self.cursor, Cursor::Exhausted) {
                Cursor::Start => None,
                Cursor::Next(token) => Some(token),
                Cursor::Exhausted => return None,
            };
            self.requests += 1;
            let page = match self.store.list_parameters_by_path(&self.query, token.as_deref()) {
                Ok(page) => page,
                Err(err) => return Some(Err(err)),
            };
            debug!(
                path = %self.query.path,
                request = self.requests,
                parameters = page.items.len(),
                more = page.continuation().is_some(),
                "fetched parameter page"
            );
            if let Some(next) = page.continuation() {
                self.cursor = Cursor::Next(next.to_string());
            }
            self.buffered = page.items.into_iter();
        }
    }
}

impl<S: ParameterStore + ?Sized> FusedIterator for ParameterPages<'_, S> {}

// ============================================================================
// SECTION: Traverser
// ============================================================================

/// Traverses the parameters under a root path.
#[derive(Debug)]
pub struct ParameterTraverser<'a, S: ?Sized> {
    /// Store queried for parameters and history.
    store: &'a S,
    /// Root path to export.
    root: &'a str,
    /// Include nested sub-paths.
    recursive: bool,
}

impl<'a, S: ParameterStore + ?Sized> ParameterTraverser<'a, S> {
    /// Creates a traverser for `root`.
    #[must_use]
    pub const fn new(store: &'a S, root: &'a str, recursive: bool) -> Self {
        Self {
            store,
            root,
            recursive,
        }
    }

    /// Returns a lazy iterator over the raw parameters.
    #[must_use]
    pub fn parameters(&self) -> ParameterPages<'a, S> {
        ParameterPages::new(
            self.store,
            PathQuery {
                path: self.root.to_string(),
                recursive: self.recursive,
                with_decryption: true,
            },
        )
    }

    /// Returns a lazy iterator over export records with resolved descriptions.
    #[must_use]
    pub fn records(&self) -> ExportRecords<'a, S> {
        ExportRecords {
            pages: self.parameters(),
            resolver: HistoryResolver::new(self.store),
            failed: false,
        }
    }
}

/// Lazy iterator of [`ExportRecord`] values.
#[derive(Debug)]
pub struct ExportRecords<'a, S: ?Sized> {
    /// Underlying parameter pages.
    pages: ParameterPages<'a, S>,
    /// Resolver used for each parameter's description.
    resolver: HistoryResolver<'a, S>,
    /// Set once any error was yielded.
    failed: bool,
}

impl<S: ParameterStore + ?Sized> Iterator for ExportRecords<'_, S> {
    type Item = Result<ExportRecord, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let parameter = match self.pages.next()? {
            Ok(parameter) => parameter,
            Err(err) => {
                self.failed = true;
                return Some(Err(err));
            }
        };
        match self.resolver.resolve_latest_description(&parameter.name) {
            Ok(description) => Some(Ok(ExportRecord {
                path: parameter.name,
                value: parameter.value,
                description,
            })),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: ParameterStore + ?Sized> FusedIterator for ExportRecords<'_, S> {}

// ============================================================================
// SECTION: Export
// ============================================================================

/// Inputs for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Root path whose parameters are exported.
    pub root: String,
    /// Include nested sub-paths.
    pub recursive: bool,
    /// Output syntax.
    pub format: OutputFormat,
}

/// Counters for a completed export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Parameters written.
    pub parameters: usize,
    /// Output lines written.
    pub lines: usize,
}

/// Export run errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The parameter store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Writing formatted output failed.
    #[error("failed to write export output: {0}")]
    Output(#[from] std::io::Error),
}

/// Exports every parameter under `request.root` to `out`.
///
/// Each record is written and flushed before the next parameter is fetched.
///
/// # Errors
///
/// Returns [`ExportError::Store`] on the first store failure and
/// [`ExportError::Output`] when `out` rejects a write. Output written before the
/// failure is not retracted.
pub fn export_parameters<S, W>(
    store: &S,
    request: &ExportRequest,
    out: &mut W,
) -> Result<ExportSummary, ExportError>
where
    S: ParameterStore + ?Sized,
    W: Write + ?Sized,
{
    let traverser = ParameterTraverser::new(store, &request.root, request.recursive);
    let mut summary = ExportSummary::default();
    for record in traverser.records() {
        let record = record?;
        let lines = render_record(&record, &request.root, request.format);
        let mut chunk = String::new();
        for line in &lines {
            chunk.push_str(line);
            chunk.push('\n');
        }
        out.write_all(chunk.as_bytes())?;
        out.flush()?;
        summary.parameters += 1;
        summary.lines += lines.len();
    }
    info!(
        root = %request.root,
        format = request.format.as_str(),
        parameters = summary.parameters,
        lines = summary.lines,
        "export complete"
    );
    Ok(summary)
}
