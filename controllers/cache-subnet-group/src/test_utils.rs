//! Test utilities for unit testing the resource manager and reconciler
//!
//! This module provides helpers for creating test data and setting up test scenarios.

#[cfg(test)]
use crate::resource_manager::ResourceManager;
#[cfg(test)]
use crds::*;
#[cfg(test)]
use elasticache_client::MockElastiCacheClient;
#[cfg(test)]
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

#[cfg(test)]
pub const TEST_ACCOUNT_ID: &str = "111122223333";

#[cfg(test)]
pub const TEST_REGION: &str = "us-west-2";

/// Helper to create a test CacheSubnetGroup CRD without status
#[cfg(test)]
pub fn create_test_cache_subnet_group(
    name: &str,
    description: Option<&str>,
    subnet_ids: &[&str],
) -> CacheSubnetGroup {
    CacheSubnetGroup {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some("default".to_string()),
            ..Default::default()
        },
        spec: CacheSubnetGroupSpec {
            cache_subnet_group_description: description.map(|s| s.to_string()),
            cache_subnet_group_name: name.to_string(),
            subnet_ids: Some(subnet_ids.iter().map(|s| s.to_string()).collect()),
        },
        status: None,
    }
}

/// Helper to give a CacheSubnetGroup a status reporting the given subnets
#[cfg(test)]
pub fn with_observed_subnets(mut record: CacheSubnetGroup, subnet_ids: &[&str]) -> CacheSubnetGroup {
    let status = record.status.get_or_insert_with(CacheSubnetGroupStatus::default);
    status.subnets = Some(
        subnet_ids
            .iter()
            .map(|id| Subnet {
                subnet_identifier: Some(id.to_string()),
                subnet_availability_zone: None,
            })
            .collect(),
    );
    record
}

/// Helper to create a mock ElastiCache client with a few known subnets
#[cfg(test)]
pub fn create_test_mock_client() -> MockElastiCacheClient {
    let mock = MockElastiCacheClient::new(TEST_REGION).with_account_id(TEST_ACCOUNT_ID);
    mock.add_subnet("subnet-1", "us-west-2a");
    mock.add_subnet("subnet-2", "us-west-2b");
    mock.add_subnet("subnet-3", "us-west-2c");
    mock
}

/// Helper to create a resource manager backed by a clone of `mock`.
/// The clone shares state, so the caller can still inspect recorded requests.
#[cfg(test)]
pub fn create_test_resource_manager(mock: &MockElastiCacheClient) -> ResourceManager {
    ResourceManager::new(mock.clone(), TEST_ACCOUNT_ID)
}
