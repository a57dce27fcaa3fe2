//! Unified error types for all layers of the security master cache.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the security master cache.
///
/// Lookups never surface these to callers; they are produced by the
/// collaborators and the cache store and are folded into load reports
/// or log lines by the service layer.
#[derive(Error, Debug)]
pub enum SecMasterError {
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SecMasterError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is retriable.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Cache(_) | Self::Timeout(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for SecMasterError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::PoolTimedOut => Self::Timeout(err.to_string()),
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for SecMasterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SecMasterError::not_found("Table", "X").error_code(), "NOT_FOUND");
        assert_eq!(SecMasterError::validation("bad").error_code(), "VALIDATION_ERROR");
        assert_eq!(SecMasterError::Database("db".to_string()).error_code(), "DATABASE_ERROR");
        assert_eq!(SecMasterError::cache("down").error_code(), "CACHE_ERROR");
        assert_eq!(SecMasterError::Timeout("t".to_string()).error_code(), "TIMEOUT");
        assert_eq!(SecMasterError::internal("oops").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_retriable_errors() {
        assert!(SecMasterError::Database("connection lost".to_string()).is_retriable());
        assert!(SecMasterError::cache("connection refused").is_retriable());
        assert!(SecMasterError::Timeout("query".to_string()).is_retriable());
        assert!(!SecMasterError::validation("bad identifier").is_retriable());
        assert!(!SecMasterError::not_found("Table", "X").is_retriable());
    }

    #[test]
    fn test_error_display() {
        let err = SecMasterError::not_found("BusinessDate", "latest");
        assert_eq!(err.to_string(), "Resource not found: BusinessDate with id latest");

        let err = SecMasterError::cache("pool exhausted");
        assert!(err.to_string().contains("pool exhausted"));
    }

    #[test]
    fn test_from_anyhow() {
        let err: SecMasterError = anyhow::anyhow!("boom").into();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert_eq!(err.to_string(), "boom");
    }
}
