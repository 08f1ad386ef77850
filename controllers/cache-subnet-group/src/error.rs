//! Controller-specific error types.
//!
//! This module defines error types specific to the CacheSubnetGroup controller
//! that are not covered by upstream library errors.

use elasticache_client::ElastiCacheError;
use kube::Error as KubeError;
use kube_runtime::finalizer::Error as FinalizerError;
use thiserror::Error;

/// Errors that can occur in the CacheSubnetGroup controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The cache subnet group does not exist in ElastiCache
    #[error("Cache subnet group not found: {0}")]
    NotFound(String),

    /// ElastiCache API error, passed through exactly as the client returned it
    #[error(transparent)]
    ElastiCache(#[from] ElastiCacheError),

    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// A request could not be built from the resource spec
    #[error("Invalid request: {0}")]
    #[allow(dead_code)] // Reserved for request validation
    InvalidRequest(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Adding, removing or running under the finalizer failed
    #[error("Finalizer error: {0}")]
    Finalizer(#[source] Box<FinalizerError<ControllerError>>),

    /// Resource watch failed
    #[error("Resource watch failed: {0}")]
    Watch(String),
}

impl ControllerError {
    /// Whether this is the distinguished not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Short machine-readable reason, used on status conditions
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::ElastiCache(ElastiCacheError::Service { .. }) => "ServiceError",
            Self::ElastiCache(_) => "TransportError",
            Self::Kube(_) => "KubernetesError",
            Self::InvalidRequest(_) => "InvalidRequest",
            Self::InvalidConfig(_) => "InvalidConfig",
            Self::Finalizer(_) => "FinalizerError",
            Self::Watch(_) => "WatchError",
        }
    }
}
