//! ElastiCache API mapping for CacheSubnetGroup
//!
//! Each operation builds a request from the record's spec, makes one API call
//! and overlays the response onto a clone of the record. The input record is
//! never modified.

use super::ResourceManager;
use super::delta::Delta;
use super::merge::{overlay, overlay_group_status, status_mut, subnets_from_remote};
use crate::error::ControllerError;
use crds::{CacheSubnetGroup, ResourceMetadata};
use elasticache_client::models::{
    CreateCacheSubnetGroupInput, DeleteCacheSubnetGroupInput, DescribeCacheSubnetGroupsInput,
    ModifyCacheSubnetGroupInput,
};
use tracing::{debug, warn};

impl ResourceManager {
    /// Read the remote cache subnet group backing `record`.
    ///
    /// Returns `ControllerError::NotFound` when ElastiCache reports the group
    /// missing or the describe call comes back empty. Fields the response leaves
    /// out keep whatever value the record already had.
    pub async fn find(&self, record: &CacheSubnetGroup) -> Result<CacheSubnetGroup, ControllerError> {
        let input = self.new_list_request(record)?;
        let name = record.spec.cache_subnet_group_name.clone();

        let output = match self.client.describe_cache_subnet_groups(input).await {
            Ok(output) => output,
            Err(e) if e.is_not_found() => {
                debug!("Cache subnet group {} not found: {}", name, e);
                return Err(ControllerError::NotFound(name));
            }
            Err(e) => return Err(e.into()),
        };

        let matches = output.cache_subnet_groups.len();
        let Some(group) = output.cache_subnet_groups.into_iter().next() else {
            return Err(ControllerError::NotFound(name));
        };
        if matches > 1 {
            warn!("Describe for cache subnet group {} returned {} groups, using the first", name, matches);
        }

        let mut latest = record.clone();
        overlay(&mut latest.spec.cache_subnet_group_description, group.cache_subnet_group_description);
        if let Some(group_name) = group.cache_subnet_group_name {
            latest.spec.cache_subnet_group_name = group_name;
        }

        let status = status_mut(&mut latest);
        if let Some(arn) = group.arn {
            status
                .ack_resource_metadata
                .get_or_insert_with(ResourceMetadata::default)
                .arn = Some(arn);
        }
        overlay(&mut status.subnets, subnets_from_remote(group.subnets));
        overlay(&mut status.vpc_id, group.vpc_id);

        Ok(latest)
    }

    /// Build the describe request for `record`. An empty name lists every group.
    pub(crate) fn new_list_request(
        &self,
        record: &CacheSubnetGroup,
    ) -> Result<DescribeCacheSubnetGroupsInput, ControllerError> {
        let name = &record.spec.cache_subnet_group_name;
        Ok(DescribeCacheSubnetGroupsInput {
            cache_subnet_group_name: (!name.is_empty()).then(|| name.clone()),
            ..Default::default()
        })
    }

    /// Create the cache subnet group described by `record`.
    ///
    /// The returned record carries the subnets and VPC ElastiCache resolved,
    /// this manager's account as owner and no conditions. The ARN is filled in
    /// by the next `find`.
    pub async fn create(&self, record: &CacheSubnetGroup) -> Result<CacheSubnetGroup, ControllerError> {
        let input = self.new_create_request(record)?;
        let output = self.client.create_cache_subnet_group(input).await?;

        let mut created = record.clone();
        overlay_group_status(&mut created, output.cache_subnet_group);

        let status = status_mut(&mut created);
        status.ack_resource_metadata = Some(ResourceMetadata {
            arn: None,
            owner_account_id: Some(self.account_id.clone()),
        });
        status.conditions = Vec::new();

        Ok(created)
    }

    /// Build the create request for `record`
    pub(crate) fn new_create_request(
        &self,
        record: &CacheSubnetGroup,
    ) -> Result<CreateCacheSubnetGroupInput, ControllerError> {
        Ok(CreateCacheSubnetGroupInput {
            cache_subnet_group_description: record.spec.cache_subnet_group_description.clone(),
            cache_subnet_group_name: Some(record.spec.cache_subnet_group_name.clone()),
            subnet_ids: record.spec.subnet_ids.clone(),
        })
    }

    /// Modify the cache subnet group to match `record`.
    ///
    /// Always issues the modify call; deciding whether an update is needed is
    /// up to the caller, which passes the delta it computed.
    pub async fn update(
        &self,
        record: &CacheSubnetGroup,
        delta: &Delta,
    ) -> Result<CacheSubnetGroup, ControllerError> {
        debug!(
            "Updating cache subnet group {} (changed: {})",
            record.spec.cache_subnet_group_name,
            delta.paths().join(", ")
        );

        let input = self.new_update_request(record)?;
        let output = self.client.modify_cache_subnet_group(input).await?;

        let mut updated = record.clone();
        overlay_group_status(&mut updated, output.cache_subnet_group);

        Ok(updated)
    }

    /// Build the modify request for `record`
    pub(crate) fn new_update_request(
        &self,
        record: &CacheSubnetGroup,
    ) -> Result<ModifyCacheSubnetGroupInput, ControllerError> {
        Ok(ModifyCacheSubnetGroupInput {
            cache_subnet_group_description: record.spec.cache_subnet_group_description.clone(),
            cache_subnet_group_name: Some(record.spec.cache_subnet_group_name.clone()),
            subnet_ids: record.spec.subnet_ids.clone(),
        })
    }

    /// Delete the cache subnet group backing `record`.
    /// Errors from ElastiCache are returned as-is, including not-found faults.
    pub async fn delete(&self, record: &CacheSubnetGroup) -> Result<(), ControllerError> {
        let input = self.new_delete_request(record)?;
        self.client.delete_cache_subnet_group(input).await?;
        Ok(())
    }

    /// Build the delete request for `record`
    pub(crate) fn new_delete_request(
        &self,
        record: &CacheSubnetGroup,
    ) -> Result<DeleteCacheSubnetGroupInput, ControllerError> {
        Ok(DeleteCacheSubnetGroupInput {
            cache_subnet_group_name: Some(record.spec.cache_subnet_group_name.clone()),
        })
    }
}
