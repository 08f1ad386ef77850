//! ElastiCache API client
//!
//! Implements the cache subnet group operations on top of `aws-sdk-elasticache`.
//! SDK builders and error types stay inside this module; callers only see the
//! owned models and `ElastiCacheError`.

use crate::elasticache_trait::ElastiCacheClientTrait;
use crate::error::ElastiCacheError;
use crate::models::*;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::debug;

/// ElastiCache API client
#[derive(Debug, Clone)]
pub struct ElastiCacheClient {
    client: aws_sdk_elasticache::Client,
    sts_client: aws_sdk_sts::Client,
    region: String,
}

impl ElastiCacheClient {
    /// Create a client from an already-loaded AWS configuration
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_elasticache::Client::new(config),
            sts_client: aws_sdk_sts::Client::new(config),
            region: config.region().map(ToString::to_string).unwrap_or_default(),
        }
    }

    /// Create a client using the default AWS credential and region provider chain
    ///
    /// # Arguments
    /// * `region` - Region override; when `None` the provider chain decides (AWS_REGION, profile, IMDS)
    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;
        Self::new(&config)
    }

    /// Resolve the AWS account ID of the credentials in use via STS GetCallerIdentity
    pub async fn caller_account_id(&self) -> Result<String, ElastiCacheError> {
        debug!("Resolving caller account ID via STS");
        let identity = self
            .sts_client
            .get_caller_identity()
            .send()
            .await
            .map_err(ElastiCacheError::from_sdk)?;

        identity.account.ok_or_else(|| {
            ElastiCacheError::UnexpectedResponse("GetCallerIdentity returned no account".to_string())
        })
    }
}

#[async_trait::async_trait]
impl ElastiCacheClientTrait for ElastiCacheClient {
    fn region(&self) -> &str {
        &self.region
    }

    async fn describe_cache_subnet_groups(
        &self,
        input: DescribeCacheSubnetGroupsInput,
    ) -> Result<DescribeCacheSubnetGroupsOutput, ElastiCacheError> {
        debug!(
            "Describing cache subnet groups (name: {})",
            input.cache_subnet_group_name.as_deref().unwrap_or("<all>")
        );

        let output = self
            .client
            .describe_cache_subnet_groups()
            .set_cache_subnet_group_name(input.cache_subnet_group_name)
            .set_marker(input.marker)
            .set_max_records(input.max_records)
            .send()
            .await
            .map_err(ElastiCacheError::from_sdk)?;

        Ok(DescribeCacheSubnetGroupsOutput {
            cache_subnet_groups: output
                .cache_subnet_groups
                .unwrap_or_default()
                .into_iter()
                .map(CacheSubnetGroup::from)
                .collect(),
            marker: output.marker,
        })
    }

    async fn create_cache_subnet_group(
        &self,
        input: CreateCacheSubnetGroupInput,
    ) -> Result<CreateCacheSubnetGroupOutput, ElastiCacheError> {
        debug!(
            "Creating cache subnet group {}",
            input.cache_subnet_group_name.as_deref().unwrap_or_default()
        );

        let output = self
            .client
            .create_cache_subnet_group()
            .set_cache_subnet_group_name(input.cache_subnet_group_name)
            .set_cache_subnet_group_description(input.cache_subnet_group_description)
            .set_subnet_ids(input.subnet_ids)
            .send()
            .await
            .map_err(ElastiCacheError::from_sdk)?;

        Ok(CreateCacheSubnetGroupOutput {
            cache_subnet_group: output.cache_subnet_group.map(CacheSubnetGroup::from),
        })
    }

    async fn modify_cache_subnet_group(
        &self,
        input: ModifyCacheSubnetGroupInput,
    ) -> Result<ModifyCacheSubnetGroupOutput, ElastiCacheError> {
        debug!(
            "Modifying cache subnet group {}",
            input.cache_subnet_group_name.as_deref().unwrap_or_default()
        );

        let output = self
            .client
            .modify_cache_subnet_group()
            .set_cache_subnet_group_name(input.cache_subnet_group_name)
            .set_cache_subnet_group_description(input.cache_subnet_group_description)
            .set_subnet_ids(input.subnet_ids)
            .send()
            .await
            .map_err(ElastiCacheError::from_sdk)?;

        Ok(ModifyCacheSubnetGroupOutput {
            cache_subnet_group: output.cache_subnet_group.map(CacheSubnetGroup::from),
        })
    }

    async fn delete_cache_subnet_group(
        &self,
        input: DeleteCacheSubnetGroupInput,
    ) -> Result<(), ElastiCacheError> {
        debug!(
            "Deleting cache subnet group {}",
            input.cache_subnet_group_name.as_deref().unwrap_or_default()
        );

        self.client
            .delete_cache_subnet_group()
            .set_cache_subnet_group_name(input.cache_subnet_group_name)
            .send()
            .await
            .map_err(ElastiCacheError::from_sdk)?;

        Ok(())
    }
}
