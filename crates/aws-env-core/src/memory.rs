// crates/aws-env-core/src/memory.rs
// ============================================================================
// Module: In-Memory Parameter Store
// Description: Deterministic parameter store for tests and local demos.
// Purpose: Exercise the export pipeline without a network backend.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryParameterStore`] answers path listings from a sorted map,
//! paginates with numeric continuation tokens, and counts every request so
//! tests can assert how many calls a run made. It is not intended for
//! production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::interfaces::HistoryEntry;
use crate::interfaces::Page;
use crate::interfaces::Parameter;
use crate::interfaces::ParameterStore;
use crate::interfaces::PathQuery;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default number of parameters per listing page.
const DEFAULT_PAGE_SIZE: usize = 10;
/// Default number of history entries per page.
const DEFAULT_HISTORY_PAGE_SIZE: usize = 50;

// ============================================================================
// SECTION: Store
// ============================================================================

/// Request counters and recorded queries.
#[derive(Debug, Default)]
struct CallLog {
    /// Path listing requests, with the token each one carried.
    listings: Vec<(PathQuery, Option<String>)>,
    /// History requests, by parameter name.
    histories: Vec<String>,
}

/// In-memory parameter store.
#[derive(Debug, Clone)]
pub struct InMemoryParameterStore {
    /// Parameter values keyed by full path.
    parameters: BTreeMap<String, String>,
    /// History entries (oldest first) keyed by full path.
    history: BTreeMap<String, Vec<HistoryEntry>>,
    /// Parameters per listing page.
    page_size: usize,
    /// History entries per page.
    history_page_size: usize,
    /// Error returned by path listings once this many pages were served.
    listing_failure: Option<(usize, StoreError)>,
    /// Error returned by history requests for the named parameter.
    history_failure: Option<(String, StoreError)>,
    /// Shared call log.
    calls: Arc<Mutex<CallLog>>,
}

impl Default for InMemoryParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryParameterStore {
    /// Creates an empty store with default page sizes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parameters: BTreeMap::new(),
            history: BTreeMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
            history_page_size: DEFAULT_HISTORY_PAGE_SIZE,
            listing_failure: None,
            history_failure: None,
            calls: Arc::new(Mutex::new(CallLog::default())),
        }
    }

    /// Adds or replaces a parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Appends a history entry (newest so far) for `name`.
    #[must_use]
    pub fn with_history(mut self, name: impl Into<String>, entry: HistoryEntry) -> Self {
        self.history.entry(name.into()).or_default().push(entry);
        self
    }

    /// Sets the number of parameters per listing page (minimum 1).
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the number of history entries per page (minimum 1).
    #[must_use]
    pub fn with_history_page_size(mut self, page_size: usize) -> Self {
        self.history_page_size = page_size.max(1);
        self
    }

    /// Fails every listing request after `pages` successful ones.
    #[must_use]
    pub fn failing_listing_after(mut self, pages: usize, error: StoreError) -> Self {
        self.listing_failure = Some((pages, error));
        self
    }

    /// Fails history requests for `name`.
    #[must_use]
    pub fn failing_history_for(mut self, name: impl Into<String>, error: StoreError) -> Self {
        self.history_failure = Some((name.into(), error));
        self
    }

    /// Returns the number of path listing requests served or rejected.
    #[must_use]
    pub fn listing_calls(&self) -> usize {
        self.calls.lock().map_or(0, |log| log.listings.len())
    }

    /// Returns the number of history requests served or rejected.
    #[must_use]
    pub fn history_calls(&self) -> usize {
        self.calls.lock().map_or(0, |log| log.histories.len())
    }

    /// Returns every path listing request received, in order.
    #[must_use]
    pub fn listing_requests(&self) -> Vec<(PathQuery, Option<String>)> {
        self.calls.lock().map_or_else(|_| Vec::new(), |log| log.listings.clone())
    }

    /// Records a call, failing closed on a poisoned log.
    fn record<F>(&self, update: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut CallLog),
    {
        let mut guard = self
            .calls
            .lock()
            .map_err(|_| StoreError::Backend("in-memory call log mutex poisoned".to_string()))?;
        update(&mut guard);
        Ok(())
    }
}

impl ParameterStore for InMemoryParameterStore {
    fn list_parameters_by_path(
        &self,
        query: &PathQuery,
        next_token: Option<&str>,
    ) -> Result<Page<Parameter>, StoreError> {
        let served = self.listing_calls();
        self.record(|log| log.listings.push((query.clone(), next_token.map(str::to_string))))?;
        if let Some((pages, error)) = &self.listing_failure
            && served >= *pages
        {
            return Err(error.clone());
        }
        let matching: Vec<Parameter> = self
            .parameters
            .iter()
            .filter(|(name, _)| is_under_path(name, &query.path, query.recursive))
            .map(|(name, value)| Parameter::new(name.clone(), value.clone()))
            .collect();
        paginate(matching, next_token, self.page_size)
    }

    fn list_parameter_history(
        &self,
        name: &str,
        next_token: Option<&str>,
    ) -> Result<Page<HistoryEntry>, StoreError> {
        self.record(|log| log.histories.push(name.to_string()))?;
        if let Some((failing, error)) = &self.history_failure
            && failing == name
        {
            return Err(error.clone());
        }
        let entries = self.history.get(name).cloned().unwrap_or_default();
        paginate(entries, next_token, self.history_page_size)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when `name` lies under `path` (immediate child unless recursive).
fn is_under_path(name: &str, path: &str, recursive: bool) -> bool {
    let prefix = path.trim_end_matches('/');
    let Some(rest) = name.strip_prefix(prefix) else {
        return false;
    };
    let Some(relative) = rest.strip_prefix('/') else {
        return false;
    };
    !relative.is_empty() && (recursive || !relative.contains('/'))
}

/// Slices `items` into the page addressed by `token`.
fn paginate<T>(items: Vec<T>, token: Option<&str>, page_size: usize) -> Result<Page<T>, StoreError> {
    let start = match token {
        None => 0,
        Some(token) => token
            .parse::<usize>()
            .map_err(|_| StoreError::Backend(format!("invalid continuation token: {token}")))?,
    };
    let end = start.saturating_add(page_size).min(items.len());
    let next_token = (end < items.len()).then(|| end.to_string());
    let page = items.into_iter().skip(start).take(end.saturating_sub(start)).collect();
    Ok(Page {
        items: page,
        next_token,
    })
}
