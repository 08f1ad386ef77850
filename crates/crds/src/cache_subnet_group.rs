//! CacheSubnetGroup Custom Resource Definition
//!
//! Defines a Kubernetes CRD for managing ElastiCache cache subnet groups.
//! A cache subnet group is a collection of VPC subnets that cache clusters
//! can be placed into.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use crate::ack::{Condition, ResourceMetadata};

/// CacheSubnetGroupSpec defines the desired state of an ElastiCache cache subnet group
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "elasticache.services.k8s.aws",
    version = "v1alpha1",
    kind = "CacheSubnetGroup",
    namespaced,
    status = "CacheSubnetGroupStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct CacheSubnetGroupSpec {
    /// A description for the cache subnet group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_subnet_group_description: Option<String>,

    /// A name for the cache subnet group (stored as lowercase by ElastiCache).
    /// Identifies the group in AWS and cannot be changed after creation.
    pub cache_subnet_group_name: String,

    /// EC2 subnet IDs for the cache subnet group
    #[serde(rename = "subnetIDs", default, skip_serializing_if = "Option::is_none")]
    pub subnet_ids: Option<Vec<String>>,
}

/// CacheSubnetGroupStatus defines the observed state of a cache subnet group
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CacheSubnetGroupStatus {
    /// AWS identifiers for the backing resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack_resource_metadata: Option<ResourceMetadata>,

    /// Observations of the resource's state
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// Subnets associated with the group, as resolved by ElastiCache
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<Subnet>>,

    /// Identifier of the VPC the group's subnets belong to
    #[serde(rename = "vpcID", default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<String>,
}

/// A subnet within a cache subnet group, as reported by ElastiCache
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subnet {
    /// Availability zone the subnet lives in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_availability_zone: Option<AvailabilityZone>,

    /// EC2 subnet ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_identifier: Option<String>,
}

/// Availability zone in which a cache subnet lives
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
pub struct AvailabilityZone {
    /// Name of the availability zone (e.g., "us-west-2a")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CacheSubnetGroupStatus {
    /// Subnet identifiers observed in the status, in the order ElastiCache reported them
    pub fn subnet_identifiers(&self) -> Option<Vec<String>> {
        self.subnets.as_ref().map(|subnets| {
            subnets
                .iter()
                .filter_map(|s| s.subnet_identifier.clone())
                .collect()
        })
    }
}
