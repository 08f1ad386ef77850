//! Kubernetes resource watchers.
//!
//! This module handles watching CacheSubnetGroup resources for changes
//! and triggering reconciliation using kube_runtime::Controller.

use crate::error::ControllerError;
use crate::reconciler::Reconciler;
use crds::CacheSubnetGroup;
use futures::StreamExt;
use kube::Api;
use kube_runtime::{Controller, watcher, controller::{Action, Config as ControllerConfig}};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Watches CacheSubnetGroup resources for changes.
pub struct Watcher {
    reconciler: Arc<Reconciler>,
    cache_subnet_group_api: Api<CacheSubnetGroup>,
    error_requeue: Duration,
}

impl Watcher {
    /// Creates a new watcher instance.
    pub fn new(
        reconciler: Arc<Reconciler>,
        cache_subnet_group_api: Api<CacheSubnetGroup>,
        error_requeue: Duration,
    ) -> Self {
        Self {
            reconciler,
            cache_subnet_group_api,
            error_requeue,
        }
    }

    /// Watches CacheSubnetGroup resources until the watch stream ends.
    ///
    /// Failed reconciliations are requeued after `error_requeue`; there is no
    /// other retry logic.
    pub async fn watch_cache_subnet_groups(&self) -> Result<(), ControllerError> {
        info!("Starting CacheSubnetGroup watcher");

        let error_requeue = self.error_requeue;
        let error_policy = move |obj: Arc<CacheSubnetGroup>, error: &ControllerError, _ctx: Arc<Reconciler>| {
            error!(
                "Reconciliation error for CacheSubnetGroup {}: {} (requeue in {:?})",
                obj.metadata.name.as_deref().unwrap_or("<unnamed>"),
                error,
                error_requeue
            );
            Action::requeue(error_requeue)
        };

        let reconcile = |obj: Arc<CacheSubnetGroup>, ctx: Arc<Reconciler>| async move {
            debug!("Reconciling CacheSubnetGroup {:?}", obj.metadata.name);
            ctx.reconcile_cache_subnet_group(obj).await
        };

        // Debounce batches bursts of events (including our own status patches)
        let controller_config = ControllerConfig::default()
            .debounce(Duration::from_secs(5))
            .concurrency(3);

        Controller::new(self.cache_subnet_group_api.clone(), watcher::Config::default())
            .with_config(controller_config)
            .run(reconcile, error_policy, self.reconciler.clone())
            .for_each(|res| async move {
                match res {
                    Ok((obj, _action)) => debug!("Reconciled CacheSubnetGroup {}", obj.name),
                    Err(e) => error!("Controller error for CacheSubnetGroup: {}", e),
                }
            })
            .await;

        Ok(())
    }
}
