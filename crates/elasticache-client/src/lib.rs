//! ElastiCache API Client
//!
//! A thin client over the ElastiCache cache subnet group API.
//! Requests and responses are expressed as owned models so the controller
//! never depends on SDK builder types, and the client can be mocked.
//!
//! # Example
//!
//! ```no_run
//! use elasticache_client::{
//!     CreateCacheSubnetGroupInput, ElastiCacheClient, ElastiCacheClientTrait,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ElastiCacheClient::from_env(Some("us-west-2".to_string())).await;
//!
//! let output = client
//!     .create_cache_subnet_group(CreateCacheSubnetGroupInput {
//!         cache_subnet_group_name: Some("my-group".to_string()),
//!         cache_subnet_group_description: Some("cache subnets".to_string()),
//!         subnet_ids: Some(vec!["subnet-0abc".to_string()]),
//!     })
//!     .await?;
//! println!("VPC: {:?}", output.cache_subnet_group.and_then(|g| g.vpc_id));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod elasticache_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::ElastiCacheClient;
pub use error::{
    ElastiCacheError, CACHE_SUBNET_GROUP_ALREADY_EXISTS, CACHE_SUBNET_GROUP_NOT_FOUND, MISSING_PARAMETER,
};
pub use models::*;
pub use elasticache_trait::ElastiCacheClientTrait;
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockElastiCacheClient, MockOperation};
