//! ElastiCacheClient trait for mocking
//!
//! This trait abstracts the ElastiCache client to enable mocking in unit tests.
//! The concrete `ElastiCacheClient` implements this trait, and tests can use mock implementations.

use crate::error::ElastiCacheError;
use crate::models::*;

/// Trait for ElastiCache cache subnet group operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait ElastiCacheClientTrait: Send + Sync {
    /// AWS region the client talks to
    fn region(&self) -> &str;

    async fn describe_cache_subnet_groups(&self, input: DescribeCacheSubnetGroupsInput) -> Result<DescribeCacheSubnetGroupsOutput, ElastiCacheError>;
    async fn create_cache_subnet_group(&self, input: CreateCacheSubnetGroupInput) -> Result<CreateCacheSubnetGroupOutput, ElastiCacheError>;
    async fn modify_cache_subnet_group(&self, input: ModifyCacheSubnetGroupInput) -> Result<ModifyCacheSubnetGroupOutput, ElastiCacheError>;
    async fn delete_cache_subnet_group(&self, input: DeleteCacheSubnetGroupInput) -> Result<(), ElastiCacheError>;
}
