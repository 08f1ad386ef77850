//! Main controller implementation.
//!
//! This module contains the `Controller` struct that wires the ElastiCache
//! client, resource manager, reconciler and watcher together.

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::reconciler::Reconciler;
use crate::resource_manager::ResourceManager;
use crate::watcher::Watcher;
use crds::CacheSubnetGroup;
use elasticache_client::{ElastiCacheClient, ElastiCacheClientTrait};
use kube::{Api, Client};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Main controller for CacheSubnetGroup management.
pub struct Controller {
    cache_subnet_group_watcher: JoinHandle<Result<(), ControllerError>>,
}

impl Controller {
    /// Creates a new controller instance and starts watching.
    pub async fn new(config: ControllerConfig) -> Result<Self, ControllerError> {
        info!("Initializing CacheSubnetGroup Controller");

        let kube_client = Client::try_default().await?;

        let elasticache_client = ElastiCacheClient::from_env(config.region.clone()).await;
        info!("Using ElastiCache in region {}", elasticache_client.region());

        let account_id = match config.account_id.clone() {
            Some(account_id) => account_id,
            None => {
                info!("AWS_ACCOUNT_ID not set, resolving account from caller identity...");
                elasticache_client.caller_account_id().await.map_err(|e| {
                    error!("Failed to resolve AWS account ID: {}", e);
                    error!("Set AWS_ACCOUNT_ID or make sure credentials allow sts:GetCallerIdentity");
                    ControllerError::ElastiCache(e)
                })?
            }
        };
        info!("Resources will be owned by account {}", account_id);

        let resource_manager = ResourceManager::new(elasticache_client, account_id);

        let cache_subnet_group_api: Api<CacheSubnetGroup> = match config.namespace.as_deref() {
            Some(ns) => Api::namespaced(kube_client.clone(), ns),
            None => Api::all(kube_client.clone()),
        };

        let reconciler = Arc::new(Reconciler::new(resource_manager, kube_client, config.resync_period));
        let watcher = Watcher::new(reconciler, cache_subnet_group_api, config.error_requeue);

        let cache_subnet_group_watcher = tokio::spawn(async move {
            watcher.watch_cache_subnet_groups().await
        });

        Ok(Self {
            cache_subnet_group_watcher,
        })
    }

    /// Runs the controller until shutdown.
    pub async fn run(self) -> Result<(), ControllerError> {
        info!("CacheSubnetGroup Controller running");

        self.cache_subnet_group_watcher
            .await
            .map_err(|e| ControllerError::Watch(format!("CacheSubnetGroup watcher panicked: {}", e)))?
            .map_err(|e| ControllerError::Watch(format!("CacheSubnetGroup watcher error: {}", e)))?;

        Ok(())
    }
}
