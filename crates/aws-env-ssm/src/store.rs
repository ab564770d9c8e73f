// crates/aws-env-ssm/src/store.rs
// ============================================================================
// Module: SSM Parameter Store
// Description: ParameterStore backed by AWS Systems Manager Parameter Store.
// Purpose: Serve path listings and parameter history from SSM.
// Dependencies: aws-config, aws-sdk-ssm, aws-env-core, serde, tokio, tracing
// ============================================================================

//! ## Overview
//! [`SsmParameterStore`] implements the blocking [`ParameterStore`] contract on
//! top of the async AWS SDK by driving every request on an owned
//! single-threaded tokio runtime. Credentials and region come from the
//! standard AWS provider chain unless the config overrides them.
//!
//! Service errors are classified by their error code into the
//! [`StoreError`] taxonomy. Nothing is retried here beyond the SDK's own
//! retry policy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;

use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_env_core::HistoryEntry;
use aws_env_core::Page;
use aws_env_core::Parameter;
use aws_env_core::ParameterStore;
use aws_env_core::PathQuery;
use aws_env_core::StoreError;
use aws_sdk_ssm::Client;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::error::ProvideErrorMetadata;
use aws_sdk_ssm::error::SdkError;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::runtime::Runtime;
use tracing::debug;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Service maximum for `GetParametersByPath` page size.
pub const MAX_PATH_PAGE_SIZE: i32 = 10;
/// Service maximum for `GetParameterHistory` page size.
pub const MAX_HISTORY_PAGE_SIZE: i32 = 50;
/// Message used when a blocking call is attempted inside an async runtime.
const NESTED_RUNTIME_MESSAGE: &str = "ssm store cannot block inside an async runtime";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the SSM-backed parameter store.
///
/// # Invariants
/// - Page sizes, when set, are within the service limits.
/// - `None` fields defer to the AWS provider chain or service defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SsmStoreConfig {
    /// AWS region (falls back to environment configuration).
    #[serde(default)]
    pub region: Option<String>,
    /// Custom endpoint URL (for local SSM emulators).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Parameters per `GetParametersByPath` page.
    #[serde(default)]
    pub page_size: Option<i32>,
    /// Entries per `GetParameterHistory` page.
    #[serde(default)]
    pub history_page_size: Option<i32>,
}

impl SsmStoreConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SsmStoreError::Invalid`] when a field is out of range.
    pub fn validate(&self) -> Result<(), SsmStoreError> {
        if let Some(region) = &self.region
            && region.trim().is_empty()
        {
            return Err(SsmStoreError::Invalid("region must be non-empty".to_string()));
        }
        if let Some(endpoint) = &self.endpoint
            && !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(SsmStoreError::Invalid(format!(
                "endpoint must be an http or https url: {endpoint}"
            )));
        }
        validate_page_size("page_size", self.page_size, MAX_PATH_PAGE_SIZE)?;
        validate_page_size("history_page_size", self.history_page_size, MAX_HISTORY_PAGE_SIZE)?;
        Ok(())
    }
}

/// Checks an optional page size against `1..=max`.
fn validate_page_size(field: &str, value: Option<i32>, max: i32) -> Result<(), SsmStoreError> {
    match value {
        Some(size) if !(1 ..= max).contains(&size) => {
            Err(SsmStoreError::Invalid(format!("{field} must be between 1 and {max}, got {size}")))
        }
        _ => Ok(()),
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building an SSM store.
#[derive(Debug, Error)]
pub enum SsmStoreError {
    /// Invalid configuration.
    #[error("ssm store invalid: {0}")]
    Invalid(String),
    /// Runtime or client initialization failure.
    #[error("ssm store io error: {0}")]
    Io(String),
}

/// Maps an SSM service error code to a [`StoreError`].
#[must_use]
pub fn classify_error_code(code: Option<&str>, message: String) -> StoreError {
    match code {
        Some(
            "AccessDeniedException"
            | "AccessDenied"
            | "UnrecognizedClientException"
            | "InvalidClientTokenId"
            | "ExpiredTokenException"
            | "ExpiredToken",
        ) => StoreError::AccessDenied(message),
        Some(
            "ThrottlingException"
            | "Throttling"
            | "TooManyRequestsException"
            | "TooManyUpdates"
            | "RequestLimitExceeded",
        ) => StoreError::Throttled(message),
        Some(code) if code.contains("NotFound") => StoreError::NotFound(message),
        _ => StoreError::Backend(message),
    }
}

/// Classifies an SDK error, keeping its full context in the message.
fn classify_sdk_error<E, R>(err: &SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let code = err.as_service_error().and_then(|service| service.code());
    classify_error_code(code, DisplayErrorContext(err).to_string())
}

// ============================================================================
// SECTION: Runtime Helpers
// ============================================================================

/// Drives `future` to completion, refusing to nest inside another runtime.
fn block_on<F: Future>(runtime: &Runtime, future: F) -> Option<F::Output> {
    if Handle::try_current().is_ok() {
        return None;
    }
    Some(runtime.block_on(future))
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// SSM-backed parameter store.
pub struct SsmParameterStore {
    /// SSM client handle.
    client: Client,
    /// Store configuration.
    config: SsmStoreConfig,
    /// Runtime used to drive SDK futures.
    runtime: Runtime,
}

impl SsmParameterStore {
    /// Creates a store from the AWS provider chain and `config` overrides.
    ///
    /// # Errors
    ///
    /// Returns [`SsmStoreError`] when the config is invalid or the runtime
    /// cannot be created.
    pub fn new(config: SsmStoreConfig) -> Result<Self, SsmStoreError> {
        config.validate()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| SsmStoreError::Io(err.to_string()))?;
        let region = config.region.clone();
        let endpoint = config.endpoint.clone();
        let shared_config = block_on(&runtime, async move {
            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if let Some(region) = region {
                loader = loader.region(Region::new(region));
            }
            if let Some(endpoint) = endpoint {
                loader = loader.endpoint_url(endpoint);
            }
            loader.load().await
        })
        .ok_or_else(|| SsmStoreError::Io(NESTED_RUNTIME_MESSAGE.to_string()))?;
        let resolved_region = shared_config.region().map_or("<unset>", |region| region.as_ref());
        debug!(
            region = resolved_region,
            custom_endpoint = config.endpoint.is_some(),
            "ssm client configured"
        );
        Ok(Self {
            client: Client::new(&shared_config),
            config,
            runtime,
        })
    }

    /// Runs an SDK future on the store runtime.
    fn run<F: Future>(&self, future: F) -> Result<F::Output, StoreError> {
        block_on(&self.runtime, future)
            .ok_or_else(|| StoreError::Backend(NESTED_RUNTIME_MESSAGE.to_string()))
    }
}

impl ParameterStore for SsmParameterStore {
    fn list_parameters_by_path(
        &self,
        query: &PathQuery,
        next_token: Option<&str>,
    ) -> Result<Page<Parameter>, StoreError> {
        let request = self
            .client
            .get_parameters_by_path()
            .path(&query.path)
            .recursive(query.recursive)
            .with_decryption(query.with_decryption)
            .set_next_token(next_token.map(str::to_string))
            .set_max_results(self.config.page_size);
        let output = self.run(request.send())?.map_err(|err| classify_sdk_error(&err))?;
        let mut items = Vec::with_capacity(output.parameters().len());
        for parameter in output.parameters() {
            let name = parameter.name().ok_or_else(|| {
                StoreError::Backend("ssm returned a parameter without a name".to_string())
            })?;
            let value = parameter
                .value()
                .ok_or_else(|| StoreError::Backend(format!("ssm returned no value for {name}")))?;
            items.push(Parameter::new(name, value));
        }
        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_string),
        })
    }

    fn list_parameter_history(
        &self,
        name: &str,
        next_token: Option<&str>,
    ) -> Result<Page<HistoryEntry>, StoreError> {
        let request = self
            .client
            .get_parameter_history()
            .name(name)
            .with_decryption(true)
            .set_next_token(next_token.map(str::to_string))
            .set_max_results(self.config.history_page_size);
        let output = self.run(request.send())?.map_err(|err| classify_sdk_error(&err))?;
        let items = output
            .parameters()
            .iter()
            .map(|entry| HistoryEntry {
                description: entry.description().map(str::to_string),
            })
            .collect();
        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_string),
        })
    }
}
