//! Mock ElastiCacheClient for unit testing
//!
//! This module provides a mock implementation of `ElastiCacheClientTrait` that can be used
//! in unit tests without AWS credentials. It keeps cache subnet groups in memory,
//! behaves like ElastiCache for the common faults, records every request it
//! receives, and can be told to fail the next call of an operation.

use crate::elasticache_trait::ElastiCacheClientTrait;
use crate::error::{
    ElastiCacheError, CACHE_SUBNET_GROUP_ALREADY_EXISTS, CACHE_SUBNET_GROUP_NOT_FOUND, MISSING_PARAMETER,
};
use crate::models::*;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// Account ID used in mock ARNs unless overridden
pub const MOCK_ACCOUNT_ID: &str = "111122223333";

/// VPC ID reported for every group unless overridden
pub const MOCK_VPC_ID: &str = "vpc-0mock";

/// Operations that can have failures injected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    Describe,
    Create,
    Modify,
    Delete,
}

/// Requests received by the mock, in arrival order
#[derive(Debug, Default)]
struct RecordedRequests {
    describe: Vec<DescribeCacheSubnetGroupsInput>,
    create: Vec<CreateCacheSubnetGroupInput>,
    modify: Vec<ModifyCacheSubnetGroupInput>,
    delete: Vec<DeleteCacheSubnetGroupInput>,
}

/// Mock ElastiCacheClient for testing
///
/// Clones share the same in-memory state, so a test can hand one clone to the
/// code under test and inspect the other.
#[derive(Debug, Clone)]
pub struct MockElastiCacheClient {
    region: String,
    account_id: String,
    vpc_id: String,
    subnet_zones: Arc<Mutex<HashMap<String, String>>>,
    groups: Arc<Mutex<BTreeMap<String, CacheSubnetGroup>>>,
    describe_override: Arc<Mutex<Option<Vec<CacheSubnetGroup>>>>,
    failures: Arc<Mutex<HashMap<MockOperation, ElastiCacheError>>>,
    requests: Arc<Mutex<RecordedRequests>>,
}

impl MockElastiCacheClient {
    /// Create a new mock client for a region
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            account_id: MOCK_ACCOUNT_ID.to_string(),
            vpc_id: MOCK_VPC_ID.to_string(),
            subnet_zones: Arc::new(Mutex::new(HashMap::new())),
            groups: Arc::new(Mutex::new(BTreeMap::new())),
            describe_override: Arc::new(Mutex::new(None)),
            failures: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(RecordedRequests::default())),
        }
    }

    /// Use a different account ID in generated ARNs
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = account_id.into();
        self
    }

    /// Report a different VPC ID for created groups
    pub fn with_vpc_id(mut self, vpc_id: impl Into<String>) -> Self {
        self.vpc_id = vpc_id.into();
        self
    }

    /// Register the availability zone a subnet lives in (for test setup)
    pub fn add_subnet(&self, subnet_id: impl Into<String>, availability_zone: impl Into<String>) {
        self.subnet_zones
            .lock()
            .unwrap()
            .insert(subnet_id.into(), availability_zone.into());
    }

    /// Add a cache subnet group to the mock store (for test setup)
    pub fn add_cache_subnet_group(&self, group: CacheSubnetGroup) {
        let name = group.cache_subnet_group_name.clone().unwrap_or_default();
        self.groups.lock().unwrap().insert(name, group);
    }

    /// Get a stored cache subnet group by name
    pub fn cache_subnet_group(&self, name: &str) -> Option<CacheSubnetGroup> {
        self.groups.lock().unwrap().get(name).cloned()
    }

    /// Return exactly these groups from every describe call, ignoring the store
    pub fn set_describe_response(&self, groups: Vec<CacheSubnetGroup>) {
        *self.describe_override.lock().unwrap() = Some(groups);
    }

    /// Fail the next call of `operation` with `error`
    pub fn fail_next(&self, operation: MockOperation, error: ElastiCacheError) {
        self.failures.lock().unwrap().insert(operation, error);
    }

    /// Describe requests received so far
    pub fn describe_requests(&self) -> Vec<DescribeCacheSubnetGroupsInput> {
        self.requests.lock().unwrap().describe.clone()
    }

    /// Create requests received so far
    pub fn create_requests(&self) -> Vec<CreateCacheSubnetGroupInput> {
        self.requests.lock().unwrap().create.clone()
    }

    /// Modify requests received so far
    pub fn modify_requests(&self) -> Vec<ModifyCacheSubnetGroupInput> {
        self.requests.lock().unwrap().modify.clone()
    }

    /// Delete requests received so far
    pub fn delete_requests(&self) -> Vec<DeleteCacheSubnetGroupInput> {
        self.requests.lock().unwrap().delete.clone()
    }

    fn take_failure(&self, operation: MockOperation) -> Result<(), ElastiCacheError> {
        match self.failures.lock().unwrap().remove(&operation) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn arn(&self, name: &str) -> String {
        format!("arn:aws:elasticache:{}:{}:subnetgroup:{}", self.region, self.account_id, name)
    }

    fn resolve_subnets(&self, subnet_ids: &[String]) -> Vec<Subnet> {
        let zones = self.subnet_zones.lock().unwrap();
        subnet_ids
            .iter()
            .map(|id| Subnet {
                subnet_identifier: Some(id.clone()),
                subnet_availability_zone: zones.get(id).map(|zone| AvailabilityZone {
                    name: Some(zone.clone()),
                }),
            })
            .collect()
    }

    fn not_found(name: &str) -> ElastiCacheError {
        ElastiCacheError::service(
            CACHE_SUBNET_GROUP_NOT_FOUND,
            format!("CacheSubnetGroup {} not found.", name),
        )
    }

    fn missing_parameter(parameter: &str) -> ElastiCacheError {
        ElastiCacheError::service(
            MISSING_PARAMETER,
            format!("The request must contain the parameter {}.", parameter),
        )
    }

    fn required_name(name: Option<&String>) -> Result<String, ElastiCacheError> {
        name.cloned().ok_or_else(|| {
            ElastiCacheError::service(
                "InvalidParameterValue",
                "The parameter CacheSubnetGroupName must be provided.",
            )
        })
    }
}

#[async_trait::async_trait]
impl ElastiCacheClientTrait for MockElastiCacheClient {
    fn region(&self) -> &str {
        &self.region
    }

    async fn describe_cache_subnet_groups(
        &self,
        input: DescribeCacheSubnetGroupsInput,
    ) -> Result<DescribeCacheSubnetGroupsOutput, ElastiCacheError> {
        self.requests.lock().unwrap().describe.push(input.clone());
        self.take_failure(MockOperation::Describe)?;

        if let Some(groups) = self.describe_override.lock().unwrap().clone() {
            return Ok(DescribeCacheSubnetGroupsOutput {
                cache_subnet_groups: groups,
                marker: None,
            });
        }

        let groups = self.groups.lock().unwrap();
        let cache_subnet_groups = match input.cache_subnet_group_name.as_deref() {
            Some(name) => vec![groups.get(name).cloned().ok_or_else(|| Self::not_found(name))?],
            None => groups.values().cloned().collect(),
        };

        Ok(DescribeCacheSubnetGroupsOutput {
            cache_subnet_groups,
            marker: None,
        })
    }

    async fn create_cache_subnet_group(
        &self,
        input: CreateCacheSubnetGroupInput,
    ) -> Result<CreateCacheSubnetGroupOutput, ElastiCacheError> {
        self.requests.lock().unwrap().create.push(input.clone());
        self.take_failure(MockOperation::Create)?;

        let name = Self::required_name(input.cache_subnet_group_name.as_ref())?;
        let description = input
            .cache_subnet_group_description
            .ok_or_else(|| Self::missing_parameter("CacheSubnetGroupDescription"))?;
        let subnet_ids = input
            .subnet_ids
            .ok_or_else(|| Self::missing_parameter("SubnetIds"))?;
        if self.groups.lock().unwrap().contains_key(&name) {
            return Err(ElastiCacheError::service(
                CACHE_SUBNET_GROUP_ALREADY_EXISTS,
                format!("Cache subnet group {} already exists.", name),
            ));
        }

        let group = CacheSubnetGroup {
            arn: Some(self.arn(&name)),
            cache_subnet_group_description: Some(description),
            cache_subnet_group_name: Some(name.clone()),
            subnets: Some(self.resolve_subnets(&subnet_ids)),
            vpc_id: Some(self.vpc_id.clone()),
        };
        self.groups.lock().unwrap().insert(name, group.clone());

        Ok(CreateCacheSubnetGroupOutput {
            cache_subnet_group: Some(group),
        })
    }

    async fn modify_cache_subnet_group(
        &self,
        input: ModifyCacheSubnetGroupInput,
    ) -> Result<ModifyCacheSubnetGroupOutput, ElastiCacheError> {
        self.requests.lock().unwrap().modify.push(input.clone());
        self.take_failure(MockOperation::Modify)?;

        let name = Self::required_name(input.cache_subnet_group_name.as_ref())?;
        let subnets = input.subnet_ids.as_deref().map(|ids| self.resolve_subnets(ids));

        let mut groups = self.groups.lock().unwrap();
        let group = groups.get_mut(&name).ok_or_else(|| Self::not_found(&name))?;
        if let Some(description) = input.cache_subnet_group_description {
            group.cache_subnet_group_description = Some(description);
        }
        if let Some(subnets) = subnets {
            group.subnets = Some(subnets);
        }

        Ok(ModifyCacheSubnetGroupOutput {
            cache_subnet_group: Some(group.clone()),
        })
    }

    async fn delete_cache_subnet_group(
        &self,
        input: DeleteCacheSubnetGroupInput,
    ) -> Result<(), ElastiCacheError> {
        self.requests.lock().unwrap().delete.push(input.clone());
        self.take_failure(MockOperation::Delete)?;

        let name = Self::required_name(input.cache_subnet_group_name.as_ref())?;
        self.groups
            .lock()
            .unwrap()
            .remove(&name)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(&name))
    }
}
