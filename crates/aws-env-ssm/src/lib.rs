// crates/aws-env-ssm/src/lib.rs
// ============================================================================
// Module: aws-env SSM Store
// Description: AWS Systems Manager Parameter Store backend.
// Purpose: Provide the production ParameterStore used by the aws-env CLI.
// Dependencies: aws-env-core, aws-sdk-ssm
// ============================================================================

//! ## Overview
//! This crate adapts AWS Systems Manager Parameter Store to the
//! [`aws_env_core::ParameterStore`] contract. Listings always request
//! decryption so secure string values are exported in plain text.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::MAX_HISTORY_PAGE_SIZE;
pub use store::MAX_PATH_PAGE_SIZE;
pub use store::SsmParameterStore;
pub use store::SsmStoreConfig;
pub use store::SsmStoreError;
pub use store::classify_error_code;
