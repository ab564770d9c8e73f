// crates/aws-env-core/src/interfaces.rs
// ============================================================================
// Module: Parameter Store Interfaces
// Description: Backend-agnostic data model and store contract.
// Purpose: Define the surface the export pipeline consumes from a parameter store.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The export pipeline talks to a hierarchical parameter store only through
//! [`ParameterStore`]. Both operations are paginated with opaque continuation
//! tokens and return read-only snapshots; nothing here writes back.
//!
//! Every failure reported by a store is a [`StoreError`]. The pipeline does not
//! distinguish transient from permanent failures: all of them end the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Data Model
// ============================================================================

/// A single parameter returned by a path listing.
///
/// # Invariants
/// - `name` is the fully-qualified `/`-delimited path.
/// - `value` is already decrypted when the listing requested decryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Fully-qualified parameter path.
    pub name: String,
    /// Current parameter value (may span multiple lines).
    pub value: String,
}

impl Parameter {
    /// Creates a parameter snapshot.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One entry from a parameter's change history.
///
/// Entries carry no explicit ordinal; their position in the store's page
/// sequence is their version order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Description recorded with this version, if any.
    pub description: Option<String>,
}

impl HistoryEntry {
    /// Creates a history entry with a description.
    #[must_use]
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
        }
    }

    /// Creates a history entry without a description.
    #[must_use]
    pub const fn undescribed() -> Self {
        Self {
            description: None,
        }
    }
}

/// One page of a paginated store response.
///
/// # Invariants
/// - `next_token` is `None` on the final page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items returned on this page, in store order.
    pub items: Vec<T>,
    /// Continuation token for the next page.
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Creates a page that ends the sequence.
    #[must_use]
    pub const fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    /// Creates a page followed by another page.
    #[must_use]
    pub fn more(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: Some(next_token.into()),
        }
    }

    /// Returns the continuation token, treating an empty token as absent.
    #[must_use]
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|token| !token.is_empty())
    }
}

/// Request parameters for a path listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    /// Hierarchical path prefix to list.
    pub path: String,
    /// Descend into sub-paths instead of listing immediate children only.
    pub recursive: bool,
    /// Ask the store to decrypt secure values.
    pub with_decryption: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Parameter store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Every variant is fatal for an export run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The caller is not authorized for the request.
    #[error("parameter store access denied: {0}")]
    AccessDenied(String),
    /// The requested path or parameter does not exist.
    #[error("parameter store path not found: {0}")]
    NotFound(String),
    /// The store rejected the request due to rate limiting.
    #[error("parameter store throttled the request: {0}")]
    Throttled(String),
    /// Any other backend or transport failure.
    #[error("parameter store error: {0}")]
    Backend(String),
}

// ============================================================================
// SECTION: Parameter Store
// ============================================================================

/// Read-only hierarchical parameter store.
///
/// Calls block until the store answers. Implementations must not retry beyond
/// what their underlying client already does.
pub trait ParameterStore {
    /// Lists one page of parameters under `query.path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store rejects or fails the request.
    fn list_parameters_by_path(
        &self,
        query: &PathQuery,
        next_token: Option<&str>,
    ) -> Result<Page<Parameter>, StoreError>;

    /// Lists one page of change history for the parameter `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store rejects or fails the request.
    fn list_parameter_history(
        &self,
        name: &str,
        next_token: Option<&str>,
    ) -> Result<Page<HistoryEntry>, StoreError>;
}

impl<S: ParameterStore + ?Sized> ParameterStore for &S {
    fn list_parameters_by_path(
        &self,
        query: &PathQuery,
        next_token: Option<&str>,
    ) -> Result<Page<Parameter>, StoreError> {
        (**self).list_parameters_by_path(query, next_token)
    }

    fn list_parameter_history(
        &self,
        name: &str,
        next_token: Option<&str>,
    ) -> Result<Page<HistoryEntry>, StoreError> {
        (**self).list_parameter_history(name, next_token)
    }
}
