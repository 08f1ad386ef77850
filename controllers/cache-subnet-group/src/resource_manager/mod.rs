//! Resource manager for CacheSubnetGroup resources.
//!
//! Translates between the `CacheSubnetGroup` custom resource and the
//! ElastiCache cache subnet group API:
//! - `sdk`: find/create/update/delete and their request builders
//! - `delta`: desired vs latest comparison used to decide on updates
//! - `merge`: overlay helpers shared by the response mappings

pub mod delta;
mod merge;
mod sdk;


use elasticache_client::ElastiCacheClientTrait;

/// Maps CacheSubnetGroup records onto ElastiCache API calls.
///
/// Holds only read-only configuration; every operation takes the record by
/// reference and returns a new one.
pub struct ResourceManager {
    pub(crate) client: Box<dyn ElastiCacheClientTrait>,
    /// Account recorded as owner of resources this manager creates
    pub(crate) account_id: String,
}

impl ResourceManager {
    pub fn new(client: impl ElastiCacheClientTrait + 'static, account_id: impl Into<String>) -> Self {
        Self {
            client: Box::new(client),
            account_id: account_id.into(),
        }
    }
}
