// crates/aws-env-core/tests/export_pipeline.rs
// ============================================================================
// Module: Export Pipeline Tests
// Description: End-to-end traversal, formatting, and failure behavior.
// Purpose: Validate pagination termination, ordering, and fail-fast output.
// Dependencies: aws-env-core
// ============================================================================

//! ## Overview
//! Drives [`export_parameters`](aws_env_core::export_parameters) against the
//! in-memory store:
//! - Exact request counts across paginated listings.
//! - Output order and line shapes for every format.
//! - Recursive versus immediate-child listings.
//! - First-error termination with partial output retained.

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

mod common;

use std::cell::Cell;

use aws_env_core::ExportError;
use aws_env_core::HistoryEntry;
use aws_env_core::InMemoryParameterStore;
use aws_env_core::OutputFormat;
use aws_env_core::Page;
use aws_env_core::Parameter;
use aws_env_core::ParameterStore;
use aws_env_core::ParameterTraverser;
use aws_env_core::PathQuery;
use aws_env_core::StoreError;
use aws_env_core::export_parameters;

use crate::common::FailingWriter;
use crate::common::export_lines;
use crate::common::export_to_string;
use crate::common::request;

// ============================================================================
// SECTION: Scripted Store
// ============================================================================

/// Store that serves a fixed page script and ignores the query path.
struct ScriptedStore {
    /// Pages returned in order; the token is the index of the next page.
    pages: Vec<Vec<Parameter>>,
}

impl ParameterStore for ScriptedStore {
    fn list_parameters_by_path(
        &self,
        _query: &PathQuery,
        next_token: Option<&str>,
    ) -> Result<Page<Parameter>, StoreError> {
        let index = next_token.map_or(0, |token| token.parse::<usize>().unwrap());
        let items = self.pages[index].clone();
        if index + 1 < self.pages.len() {
            Ok(Page::more(items, (index + 1).to_string()))
        } else {
            Ok(Page::last(items))
        }
    }

    fn list_parameter_history(
        &self,
        _name: &str,
        _next_token: Option<&str>,
    ) -> Result<Page<HistoryEntry>, StoreError> {
        Ok(Page::last(Vec::new()))
    }
}

/// Store whose only listing page carries an empty continuation token.
struct EmptyTokenStore {
    /// Listing requests received.
    listing_calls: Cell<usize>,
}

impl ParameterStore for EmptyTokenStore {
    fn list_parameters_by_path(
        &self,
        _query: &PathQuery,
        next_token: Option<&str>,
    ) -> Result<Page<Parameter>, StoreError> {
        self.listing_calls.set(self.listing_calls.get() + 1);
        assert_eq!(next_token, None, "an empty token must not be sent back");
        Ok(Page::more(vec![Parameter::new("/r/a/b", "x\ny")], ""))
    }

    fn list_parameter_history(
        &self,
        _name: &str,
        next_token: Option<&str>,
    ) -> Result<Page<HistoryEntry>, StoreError> {
        match next_token {
            None => Ok(Page::more(vec![HistoryEntry::described("d0")], "p2")),
            Some("p2") => Ok(Page::more(vec![HistoryEntry::described("d1")], "")),
            Some(other) => panic!("unexpected history token {other:?}"),
        }
    }
}

// ============================================================================
// SECTION: Scenarios
// ============================================================================

#[test]
fn exports_single_parameter_without_history() {
    let store = InMemoryParameterStore::new().with_parameter("/app/prod/DB_HOST", "localhost");
    let lines = export_lines(&store, &request("/app/prod", false, OutputFormat::Exports));
    assert_eq!(lines, vec!["export DB_HOST=$'localhost'".to_string()]);
}

#[test]
fn dotenv_flattens_nested_path_and_escapes_newline() {
    let store = InMemoryParameterStore::new().with_parameter("/app/prod/db/password", "s3cr3t\n");
    let (result, output) =
        export_to_string(&store, &request("/app/prod", true, OutputFormat::Dotenv));
    result.unwrap();
    assert_eq!(output, "db_password=\"s3cr3t\\n\"\n");
}

#[test]
fn prop_emits_latest_description_before_value() {
    let store = InMemoryParameterStore::new()
        .with_parameter("/cfg/x.y", "42")
        .with_history("/cfg/x.y", HistoryEntry::described("initial"))
        .with_history("/cfg/x.y", HistoryEntry::described("rotated 2024"));
    let lines = export_lines(&store, &request("/cfg", false, OutputFormat::Prop));
    assert_eq!(lines, vec!["# rotated 2024".to_string(), "x.y = 42".to_string()]);
}

#[test]
fn prop_uses_dot_separator_for_nested_keys() {
    let store = InMemoryParameterStore::new().with_parameter("/cfg/db/pool/size", "8");
    let lines = export_lines(&store, &request("/cfg", true, OutputFormat::Prop));
    assert_eq!(lines, vec!["db.pool.size = 8".to_string()]);
}

#[test]
fn empty_root_produces_no_output() {
    let store = InMemoryParameterStore::new().with_parameter("/elsewhere/KEY", "v");
    let (result, output) =
        export_to_string(&store, &request("/app/prod", true, OutputFormat::Exports));
    let summary = result.unwrap();
    assert!(output.is_empty());
    assert_eq!(summary.parameters, 0);
    assert_eq!(store.listing_calls(), 1);
    assert_eq!(store.history_calls(), 0);
}

#[test]
fn issues_one_request_per_page_and_keeps_page_order() {
    let pages = vec![
        vec![Parameter::new("/r/c", "3"), Parameter::new("/r/a", "1")],
        vec![Parameter::new("/r/b", "2")],
        vec![],
        vec![Parameter::new("/r/d", "4")],
    ];
    let store = ScriptedStore {
        pages,
    };
    let lines = export_lines(&store, &request("/r", false, OutputFormat::Dotenv));
    assert_eq!(lines, vec!["c=\"3\"", "a=\"1\"", "b=\"2\"", "d=\"4\""]);

    let mut parameters = ParameterTraverser::new(&store, "/r", false).parameters();
    let names: Vec<String> = parameters.by_ref().map(|item| item.unwrap().name).collect();
    assert_eq!(names.len(), 4);
    assert_eq!(parameters.requests(), 4);
}

#[test]
fn in_memory_pagination_requests_every_page() {
    let mut store = InMemoryParameterStore::new().with_page_size(2);
    for index in 0 .. 5 {
        store = store.with_parameter(format!("/app/K{index}"), index.to_string());
    }
    let lines = export_lines(&store, &request("/app", false, OutputFormat::Exports));
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "export K0=$'0'");
    assert_eq!(lines[4], "export K4=$'4'");
    assert_eq!(store.listing_calls(), 3);
    let tokens: Vec<Option<String>> =
        store.listing_requests().into_iter().map(|(_, token)| token).collect();
    assert_eq!(tokens, vec![None, Some("2".to_string()), Some("4".to_string())]);
}

#[test]
fn listing_requests_always_ask_for_decryption() {
    let store = InMemoryParameterStore::new().with_parameter("/app/A", "1");
    export_lines(&store, &request("/app", true, OutputFormat::Exports));
    let (query, token) = store.listing_requests().remove(0);
    assert!(query.with_decryption);
    assert!(query.recursive);
    assert_eq!(query.path, "/app");
    assert_eq!(token, None);
}

#[test]
fn non_recursive_lists_immediate_children_only() {
    let store = InMemoryParameterStore::new()
        .with_parameter("/app/TOP", "t")
        .with_parameter("/app/nested/INNER", "i");
    let flat = export_lines(&store, &request("/app", false, OutputFormat::Exports));
    assert_eq!(flat, vec!["export TOP=$'t'"]);
    let deep = export_lines(&store, &request("/app", true, OutputFormat::Exports));
    assert_eq!(deep, vec!["export TOP=$'t'", "export nested_INNER=$'i'"]);
}

#[test]
fn quotes_and_dollars_pass_through_unescaped() {
    let store = InMemoryParameterStore::new().with_parameter("/app/TOKEN", "a'b\"c$d\\e");
    let lines = export_lines(&store, &request("/app", false, OutputFormat::Exports));
    assert_eq!(lines, vec!["export TOKEN=$'a'b\"c$d\\e'"]);
}

// ============================================================================
// SECTION: Failures
// ============================================================================

#[test]
fn listing_error_after_first_page_keeps_partial_output() {
    let store = InMemoryParameterStore::new()
        .with_page_size(1)
        .with_parameter("/app/A", "1")
        .with_parameter("/app/B", "2")
        .failing_listing_after(1, StoreError::Throttled("rate exceeded".to_string()));
    let (result, output) = export_to_string(&store, &request("/app", false, OutputFormat::Dotenv));
    assert_eq!(output, "A=\"1\"\n");
    match result {
        Err(ExportError::Store(StoreError::Throttled(message))) => {
            assert_eq!(message, "rate exceeded");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(store.listing_calls(), 2);
}

#[test]
fn listing_error_on_first_page_writes_nothing() {
    let store = InMemoryParameterStore::new()
        .with_parameter("/app/A", "1")
        .failing_listing_after(0, StoreError::AccessDenied("no ssm:GetParametersByPath".into()));
    let (result, output) = export_to_string(&store, &request("/app", false, OutputFormat::Exports));
    assert!(output.is_empty());
    assert!(matches!(result, Err(ExportError::Store(StoreError::AccessDenied(_)))));
}

#[test]
fn history_error_halts_before_the_failing_parameter() {
    let store = InMemoryParameterStore::new()
        .with_parameter("/app/A", "1")
        .with_parameter("/app/B", "2")
        .with_parameter("/app/C", "3")
        .failing_history_for("/app/B", StoreError::NotFound("/app/B".to_string()));
    let (result, output) = export_to_string(&store, &request("/app", false, OutputFormat::Exports));
    assert_eq!(output, "export A=$'1'\n");
    assert!(matches!(result, Err(ExportError::Store(StoreError::NotFound(_)))));
    assert_eq!(store.history_calls(), 2);
}

#[test]
fn records_iterator_is_fused_after_an_error() {
    let store = InMemoryParameterStore::new()
        .with_parameter("/app/A", "1")
        .failing_listing_after(0, StoreError::Backend("connection reset".to_string()));
    let mut records = ParameterTraverser::new(&store, "/app", false).records();
    assert!(matches!(records.next(), Some(Err(StoreError::Backend(_)))));
    assert!(records.next().is_none());
    assert!(records.next().is_none());
    assert_eq!(store.listing_calls(), 1);
}

#[test]
fn write_failure_surfaces_as_output_error() {
    let store = InMemoryParameterStore::new()
        .with_parameter("/app/A", "1")
        .with_parameter("/app/B", "2");
    let mut writer = FailingWriter {
        remaining: 1,
        written: Vec::new(),
    };
    let result = export_parameters(&store, &request("/app", false, OutputFormat::Dotenv), &mut writer);
    assert!(matches!(result, Err(ExportError::Output(_))));
    assert_eq!(writer.written, b"A=\"1\"\n");
}

#[test]
fn summary_counts_parameters_and_lines() {
    let store = InMemoryParameterStore::new()
        .with_parameter("/cfg/a", "1")
        .with_parameter("/cfg/b", "2")
        .with_history("/cfg/a", HistoryEntry::described("first key"));
    let (result, _) = export_to_string(&store, &request("/cfg", false, OutputFormat::Prop));
    let summary = result.unwrap();
    assert_eq!(summary.parameters, 2);
    assert_eq!(summary.lines, 3);
}

#[test]
fn empty_continuation_token_ends_listing() {
    let store = EmptyTokenStore {
        listing_calls: Cell::new(0),
    };
    let (result, output) = export_to_string(&store, &request("/r", true, OutputFormat::Prop));
    let summary = result.unwrap();
    assert_eq!(output, "# d1\na.b = x\\ny\n");
    assert_eq!(summary.parameters, 1);
    assert_eq!(store.listing_calls.get(), 1);
}
