//! Error types for the access-control core
//!
//! Denials are never errors. Everything here is either misuse of the API
//! surface or a failure in the ambient plumbing (config, auth, services).

use thiserror::Error;

/// Result type for access-control operations
pub type Result<T> = std::result::Result<T, AccessError>;

/// Errors that can occur in the access-control core
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("{accessor} was called outside of an AccessProvider scope")]
    ProviderMissing { accessor: &'static str },

    #[error("Unknown {kind} identifier: {value}")]
    UnknownIdentifier { kind: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Auth collaborator error: {0}")]
    Auth(String),

    #[error("Service resolution failed: {0}")]
    Service(#[from] bizadmin_common::DiError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
