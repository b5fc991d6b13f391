//! Error types for RBAC operations
//!
//! Authorization decisions themselves never fail: unknown entities and
//! non-matching statements resolve to a deny. These errors cover the edges
//! around the decision path, such as shaping transport input into a
//! statement and loading configuration.

use thiserror::Error;
use warden_cache::ConfigError;

/// RBAC error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RbacError {
    /// Transport method that has no endpoint resource counterpart
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// Cache configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for RBAC operations.
pub type RbacResult<T> = Result<T, RbacError>;

impl RbacError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            RbacError::UnknownMethod(_) => "UNKNOWN_METHOD",
            RbacError::Config(_) => "CONFIG_ERROR",
        }
    }
}
