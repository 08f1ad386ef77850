//! ElastiCache API models
//!
//! These models mirror the ElastiCache cache subnet group API shapes.
//! See: https://docs.aws.amazon.com/AmazonElastiCache/latest/APIReference/API_CacheSubnetGroup.html

use aws_sdk_elasticache::types;
use serde::{Deserialize, Serialize};

/// Cache subnet group as returned by ElastiCache
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CacheSubnetGroup {
    #[serde(rename = "ARN")]
    pub arn: Option<String>,
    pub cache_subnet_group_description: Option<String>,
    pub cache_subnet_group_name: Option<String>,
    pub subnets: Option<Vec<Subnet>>,
    pub vpc_id: Option<String>,
}

/// Subnet entry within a cache subnet group
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Subnet {
    pub subnet_availability_zone: Option<AvailabilityZone>,
    pub subnet_identifier: Option<String>,
}

/// Availability zone of a subnet
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct AvailabilityZone {
    pub name: Option<String>,
}

/// DescribeCacheSubnetGroups request. An empty name lists every group.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeCacheSubnetGroupsInput {
    pub cache_subnet_group_name: Option<String>,
    pub marker: Option<String>,
    pub max_records: Option<i32>,
}

/// DescribeCacheSubnetGroups response
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeCacheSubnetGroupsOutput {
    pub cache_subnet_groups: Vec<CacheSubnetGroup>,
    pub marker: Option<String>,
}

/// CreateCacheSubnetGroup request
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCacheSubnetGroupInput {
    pub cache_subnet_group_description: Option<String>,
    pub cache_subnet_group_name: Option<String>,
    pub subnet_ids: Option<Vec<String>>,
}

/// CreateCacheSubnetGroup response
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCacheSubnetGroupOutput {
    pub cache_subnet_group: Option<CacheSubnetGroup>,
}

/// ModifyCacheSubnetGroup request
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyCacheSubnetGroupInput {
    pub cache_subnet_group_description: Option<String>,
    pub cache_subnet_group_name: Option<String>,
    pub subnet_ids: Option<Vec<String>>,
}

/// ModifyCacheSubnetGroup response
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyCacheSubnetGroupOutput {
    pub cache_subnet_group: Option<CacheSubnetGroup>,
}

/// DeleteCacheSubnetGroup request
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteCacheSubnetGroupInput {
    pub cache_subnet_group_name: Option<String>,
}

impl From<types::CacheSubnetGroup> for CacheSubnetGroup {
    fn from(item: types::CacheSubnetGroup) -> Self {
        CacheSubnetGroup {
            arn: item.arn,
            cache_subnet_group_description: item.cache_subnet_group_description,
            cache_subnet_group_name: item.cache_subnet_group_name,
            subnets: item
                .subnets
                .map(|vec| vec.into_iter().map(Subnet::from).collect()),
            vpc_id: item.vpc_id,
        }
    }
}

impl From<types::Subnet> for Subnet {
    fn from(item: types::Subnet) -> Self {
        Subnet {
            subnet_availability_zone: item.subnet_availability_zone.map(AvailabilityZone::from),
            subnet_identifier: item.subnet_identifier,
        }
    }
}

impl From<types::AvailabilityZone> for AvailabilityZone {
    fn from(item: types::AvailabilityZone) -> Self {
        AvailabilityZone { name: item.name }
    }
}
