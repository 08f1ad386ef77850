//! Desired vs latest comparison for CacheSubnetGroup records

use crds::CacheSubnetGroup;
use serde_json::{Value, json};
use std::collections::BTreeSet;

pub const PATH_DESCRIPTION: &str = "Spec.CacheSubnetGroupDescription";
pub const PATH_NAME: &str = "Spec.CacheSubnetGroupName";
pub const PATH_SUBNET_IDS: &str = "Spec.SubnetIDs";

/// A single field that differs between two records
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub path: String,
    /// Value on the desired record
    pub a: Value,
    /// Value on the latest record
    pub b: Value,
}

/// Set of differences between a desired and a latest record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    pub differences: Vec<Difference>,
}

impl Delta {
    fn add(&mut self, path: &str, a: Value, b: Value) {
        self.differences.push(Difference {
            path: path.to_string(),
            a,
            b,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Whether any difference is at `path` or below it
    pub fn different_at(&self, path: &str) -> bool {
        self.differences.iter().any(|d| {
            d.path == path
                || d.path
                    .strip_prefix(path)
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    /// Paths of all differences, in the order they were found
    pub fn paths(&self) -> Vec<&str> {
        self.differences.iter().map(|d| d.path.as_str()).collect()
    }
}

/// Compare the desired record against the latest record read from ElastiCache.
///
/// Subnet IDs are compared as sets against the subnets ElastiCache reports in
/// the latest status, since ElastiCache does not preserve request order.
/// Optional fields left unset on the desired record are not compared: the
/// modify request omits them, so ElastiCache keeps its current values.
pub fn new_resource_delta(desired: &CacheSubnetGroup, latest: &CacheSubnetGroup) -> Delta {
    let mut delta = Delta::default();

    if desired.spec.cache_subnet_group_description.is_some()
        && desired.spec.cache_subnet_group_description != latest.spec.cache_subnet_group_description
    {
        delta.add(
            PATH_DESCRIPTION,
            json!(desired.spec.cache_subnet_group_description),
            json!(latest.spec.cache_subnet_group_description),
        );
    }

    // ElastiCache stores names lowercased
    if !desired
        .spec
        .cache_subnet_group_name
        .eq_ignore_ascii_case(&latest.spec.cache_subnet_group_name)
    {
        delta.add(
            PATH_NAME,
            json!(desired.spec.cache_subnet_group_name),
            json!(latest.spec.cache_subnet_group_name),
        );
    }

    if let Some(subnet_ids) = &desired.spec.subnet_ids {
        add_subnet_difference(&mut delta, subnet_ids, latest);
    }

    delta
}

fn add_subnet_difference(delta: &mut Delta, subnet_ids: &[String], latest: &CacheSubnetGroup) {
    let desired_subnets: BTreeSet<&str> = subnet_ids.iter().map(String::as_str).collect();
    let latest_subnet_ids = latest
        .status
        .as_ref()
        .and_then(|status| status.subnet_identifiers())
        .unwrap_or_default();
    let latest_subnets: BTreeSet<&str> = latest_subnet_ids.iter().map(String::as_str).collect();
    if desired_subnets != latest_subnets {
        delta.add(PATH_SUBNET_IDS, json!(desired_subnets), json!(latest_subnets));
    }
}
