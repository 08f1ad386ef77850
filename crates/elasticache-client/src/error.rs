//! ElastiCache client errors

use aws_sdk_elasticache::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Error code returned when a named cache subnet group does not exist
pub const CACHE_SUBNET_GROUP_NOT_FOUND: &str = "CacheSubnetGroupNotFoundFault";

/// Error code returned when creating a cache subnet group whose name is taken
pub const CACHE_SUBNET_GROUP_ALREADY_EXISTS: &str = "CacheSubnetGroupAlreadyExists";

/// Error code returned when a required request parameter is absent
pub const MISSING_PARAMETER: &str = "MissingParameter";

/// Errors that can occur when interacting with the ElastiCache API
///
/// SDK errors are flattened into owned values at the client boundary, so
/// errors can be cloned, compared and passed through the controller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElastiCacheError {
    /// ElastiCache rejected the request with a service error code
    #[error("ElastiCache service error {code}: {message}")]
    Service {
        /// Stable error code (e.g., "CacheSubnetGroupNotFoundFault")
        code: String,
        /// Human-readable message from the service
        message: String,
    },

    /// The request never produced a service response (network, credentials, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service responded, but without the fields the operation requires
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid request (e.g., missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ElastiCacheError {
    /// Build a service error from a code and message
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Convert an SDK error, keeping the service error code when there is one
    pub fn from_sdk<E, R>(err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        match err.as_service_error() {
            Some(service_err) => Self::Service {
                code: service_err.code().unwrap_or("Unknown").to_string(),
                message: service_err.message().unwrap_or_default().to_string(),
            },
            None => Self::Transport(DisplayErrorContext(&err).to_string()),
        }
    }

    /// Service error code, if the error came from ElastiCache itself
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Whether this is the "cache subnet group not found" fault
    pub fn is_not_found(&self) -> bool {
        self.code() == Some(CACHE_SUBNET_GROUP_NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_matches_on_code_only() {
        let err = ElastiCacheError::service(CACHE_SUBNET_GROUP_NOT_FOUND, "something else entirely");
        assert!(err.is_not_found());

        let err = ElastiCacheError::service("InvalidParameterValue", "CacheSubnetGroupNotFoundFault");
        assert!(!err.is_not_found());

        let err = ElastiCacheError::Transport(CACHE_SUBNET_GROUP_NOT_FOUND.to_string());
        assert!(!err.is_not_found());
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_display_includes_code() {
        let err = ElastiCacheError::service("SubnetInUse", "subnet-1 is in use");
        assert_eq!(err.to_string(), "ElastiCache service error SubnetInUse: subnet-1 is in use");
    }
}
