// crates/aws-env-core/src/history.rs
// ============================================================================
// Module: History Resolution
// Description: Finds the latest non-empty description in a parameter history.
// Purpose: Supply property-file comments from the parameter change log.
// Dependencies: tracing, crate::interfaces
// ============================================================================

//! ## Overview
//! The store returns history oldest-first, page after page. The resolver walks
//! every entry of every page and keeps the last non-empty description it saw,
//! so the result is the most recent one. An entry with an empty or missing
//! description never clears an earlier one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;

use crate::interfaces::ParameterStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves parameter descriptions from change history.
#[derive(Debug)]
pub struct HistoryResolver<'a, S: ?Sized> {
    /// Store queried for history pages.
    store: &'a S,
}

impl<'a, S: ParameterStore + ?Sized> HistoryResolver<'a, S> {
    /// Creates a resolver over `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            store,
        }
    }

    /// Returns the most recent non-empty description for `name`.
    ///
    /// Returns an empty string when the parameter has no history or no entry
    /// ever carried a description.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] from the first failing history page; there is no
    /// fallback to an empty description.
    pub fn resolve_latest_description(&self, name: &str) -> Result<String, StoreError> {
        let mut latest = String::new();
        let mut token: Option<String> = None;
        loop {
            let page = self.store.list_parameter_history(name, token.as_deref())?;
            debug!(parameter = name, entries = page.items.len(), "fetched history page");
            for entry in &page.items {
                if let Some(description) = entry.description.as_deref()
                    && !description.is_empty()
                {
                    description.clone_into(&mut latest);
                }
            }
            match page.continuation() {
                Some(next) => token = Some(next.to_string()),
                None => return Ok(latest),
            }
        }
    }
}
