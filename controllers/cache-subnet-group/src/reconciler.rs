//! Reconciliation logic for CacheSubnetGroup resources.
//!
//! Drives the resource manager from Kubernetes events: the finalizer helper
//! routes live objects to `apply` and deleted objects to `cleanup`. Status is
//! only patched when it actually changed, so a resource that is in sync does not
//! generate writes on every resync.

use crate::error::ControllerError;
use crate::resource_manager::ResourceManager;
use crate::resource_manager::delta::{PATH_NAME, new_resource_delta};
use crds::{
    CacheSubnetGroup, CacheSubnetGroupStatus, ConditionStatus, ConditionType, remove_condition,
    set_condition,
};
use elasticache_client::ElastiCacheError;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client, ResourceExt};
use kube_runtime::controller::Action;
use kube_runtime::finalizer::{Event as FinalizerEvent, finalizer};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Finalizer that keeps a CacheSubnetGroup around until its ElastiCache group is deleted
pub const FINALIZER: &str = "finalizers.elasticache.services.k8s.aws/CacheSubnetGroup";

/// ElastiCache error codes that will not go away without a spec change
const TERMINAL_CODES: &[&str] = &[
    "MissingParameter",
    "CacheSubnetGroupQuotaExceeded",
    "CacheSubnetQuotaExceededFault",
    "SubnetInUse",
    "InvalidSubnet",
    "InvalidParameterValue",
    "InvalidParameterCombination",
];

/// Reconciles CacheSubnetGroup resources.
pub struct Reconciler {
    pub(crate) resource_manager: ResourceManager,
    kube_client: Client,
    resync_period: Duration,
}

impl Reconciler {
    /// Creates a new reconciler instance.
    pub fn new(resource_manager: ResourceManager, kube_client: Client, resync_period: Duration) -> Self {
        Self {
            resource_manager,
            kube_client,
            resync_period,
        }
    }

    /// Reconciles a CacheSubnetGroup resource.
    pub async fn reconcile_cache_subnet_group(
        &self,
        resource: Arc<CacheSubnetGroup>,
    ) -> Result<Action, ControllerError> {
        let namespace = resource.namespace().unwrap_or_else(|| "default".to_string());
        let api: Api<CacheSubnetGroup> = Api::namespaced(self.kube_client.clone(), &namespace);

        let api_ref = &api;
        finalizer(&api, FINALIZER, resource, |event| async move {
            match event {
                FinalizerEvent::Apply(resource) => self.apply(api_ref, &resource).await,
                FinalizerEvent::Cleanup(resource) => self.cleanup(&resource).await,
            }
        })
        .await
        .map_err(|e| ControllerError::Finalizer(Box::new(e)))
    }

    /// Brings ElastiCache in line with the resource and records the outcome in status
    async fn apply(
        &self,
        api: &Api<CacheSubnetGroup>,
        desired: &CacheSubnetGroup,
    ) -> Result<Action, ControllerError> {
        let name = desired.name_any();
        let namespace = desired.namespace().unwrap_or_else(|| "default".to_string());
        info!("Reconciling CacheSubnetGroup {}/{}", namespace, name);

        match sync(&self.resource_manager, desired).await {
            Ok(latest) => {
                let status = synced_status(latest.status.unwrap_or_default());
                self.patch_status_if_changed(api, desired, status).await?;
                Ok(Action::requeue(self.resync_period))
            }
            Err(e) => {
                error!("Failed to reconcile CacheSubnetGroup {}/{}: {}", namespace, name, e);
                let terminal = is_terminal(&e);
                let status = failed_status(desired.status.clone().unwrap_or_default(), &e, terminal);
                if let Err(patch_err) = self.patch_status_if_changed(api, desired, status).await {
                    warn!("Failed to record error on CacheSubnetGroup {}/{} status: {}", namespace, name, patch_err);
                }
                if terminal {
                    // Retrying cannot help; wait for the spec to change
                    return Ok(Action::await_change());
                }
                Err(e)
            }
        }
    }

    /// Deletes the ElastiCache group before the finalizer is released
    async fn cleanup(&self, resource: &CacheSubnetGroup) -> Result<Action, ControllerError> {
        let name = resource.name_any();
        info!("Deleting cache subnet group {} for CacheSubnetGroup {}", resource.spec.cache_subnet_group_name, name);

        match self.resource_manager.delete(resource).await {
            Ok(()) => info!("Deleted cache subnet group {}", resource.spec.cache_subnet_group_name),
            Err(ControllerError::ElastiCache(e)) if e.is_not_found() => {
                info!("Cache subnet group {} already deleted", resource.spec.cache_subnet_group_name);
            }
            Err(e) => return Err(e),
        }

        Ok(Action::await_change())
    }

    async fn patch_status_if_changed(
        &self,
        api: &Api<CacheSubnetGroup>,
        resource: &CacheSubnetGroup,
        status: CacheSubnetGroupStatus,
    ) -> Result<(), ControllerError> {
        let name = resource.name_any();
        if resource.status.as_ref() == Some(&status) {
            debug!("CacheSubnetGroup {} status unchanged, skipping update", name);
            return Ok(());
        }

        let pp = PatchParams::default();
        api.patch_status(&name, &pp, &Patch::Merge(&status_patch(&status)))
            .await?;
        debug!("Updated CacheSubnetGroup {} status", name);
        Ok(())
    }
}

/// Reads the remote group and creates or updates it as needed.
///
/// Returns the latest record: created when ElastiCache has no such group,
/// updated when the spec differs from what ElastiCache reports, as found otherwise.
pub(crate) async fn sync(
    manager: &ResourceManager,
    desired: &CacheSubnetGroup,
) -> Result<CacheSubnetGroup, ControllerError> {
    let group_name = &desired.spec.cache_subnet_group_name;

    let latest = match manager.find(desired).await {
        Ok(latest) => latest,
        Err(e) if e.is_not_found() => {
            info!("Cache subnet group {} does not exist, creating", group_name);
            return manager.create(desired).await;
        }
        Err(e) => return Err(e),
    };

    let delta = new_resource_delta(desired, &latest);
    if delta.is_empty() {
        debug!("Cache subnet group {} is in sync", group_name);
        return Ok(latest);
    }

    info!("Cache subnet group {} differs at {}, updating", group_name, delta.paths().join(", "));
    for difference in &delta.differences {
        debug!("  {}: {} -> {}", difference.path, difference.b, difference.a);
    }
    if delta.different_at(PATH_NAME) {
        warn!(
            "Cache subnet group name cannot be changed after creation; ElastiCache reports {}",
            latest.spec.cache_subnet_group_name
        );
    }
    let mut record = desired.clone();
    record.status = latest.status;
    manager.update(&record, &delta).await
}

/// Whether an error needs a spec change before reconciliation can succeed
pub(crate) fn is_terminal(err: &ControllerError) -> bool {
    match err {
        ControllerError::ElastiCache(ElastiCacheError::Service { code, .. }) => {
            TERMINAL_CODES.contains(&code.as_str())
        }
        _ => false,
    }
}

/// Status after a successful sync
pub(crate) fn synced_status(mut status: CacheSubnetGroupStatus) -> CacheSubnetGroupStatus {
    set_condition(&mut status.conditions, ConditionType::ResourceSynced, ConditionStatus::True, None, None);
    remove_condition(&mut status.conditions, ConditionType::Recoverable);
    remove_condition(&mut status.conditions, ConditionType::Terminal);
    status
}

/// Status after a failed sync, carrying the error on a Recoverable or Terminal condition
pub(crate) fn failed_status(
    mut status: CacheSubnetGroupStatus,
    err: &ControllerError,
    terminal: bool,
) -> CacheSubnetGroupStatus {
    let (set, cleared) = if terminal {
        (ConditionType::Terminal, ConditionType::Recoverable)
    } else {
        (ConditionType::Recoverable, ConditionType::Terminal)
    };
    set_condition(
        &mut status.conditions,
        set,
        ConditionStatus::True,
        Some(err.reason().to_string()),
        Some(err.to_string()),
    );
    remove_condition(&mut status.conditions, cleared);
    set_condition(&mut status.conditions, ConditionType::ResourceSynced, ConditionStatus::False, None, None);
    status
}

/// Merge patch body replacing the resource status
pub(crate) fn status_patch(status: &CacheSubnetGroupStatus) -> serde_json::Value {
    json!({ "status": status })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crds::find_condition;
    use elasticache_client::MockOperation;

    #[tokio::test]
    async fn test_sync_creates_missing_group() {
        let mock = create_test_mock_client();
        let manager = create_test_resource_manager(&mock);
        let desired = create_test_cache_subnet_group("group-a", Some("d"), &["subnet-1"]);

        let latest = sync(&manager, &desired).await.unwrap();
        assert_eq!(mock.create_requests().len(), 1);
        assert!(mock.modify_requests().is_empty());
        assert_eq!(
            latest.status.unwrap().ack_resource_metadata.unwrap().owner_account_id.as_deref(),
            Some(TEST_ACCOUNT_ID)
        );
    }

    #[tokio::test]
    async fn test_sync_in_sync_group_makes_no_changes() {
        let mock = create_test_mock_client();
        let manager = create_test_resource_manager(&mock);
        let desired = create_test_cache_subnet_group("group-a", Some("d"), &["subnet-1", "subnet-2"]);
        manager.create(&desired).await.unwrap();

        let latest = sync(&manager, &desired).await.unwrap();
        assert_eq!(mock.create_requests().len(), 1);
        assert!(mock.modify_requests().is_empty());
        assert!(latest.status.unwrap().ack_resource_metadata.unwrap().arn.is_some());
    }

    #[tokio::test]
    async fn test_sync_updates_drifted_group() {
        let mock = create_test_mock_client();
        let manager = create_test_resource_manager(&mock);
        let original = create_test_cache_subnet_group("group-a", Some("d"), &["subnet-1"]);
        manager.create(&original).await.unwrap();

        let desired = create_test_cache_subnet_group("group-a", Some("d"), &["subnet-1", "subnet-3"]);
        let latest = sync(&manager, &desired).await.unwrap();

        let requests = mock.modify_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].subnet_ids,
            Some(vec!["subnet-1".to_string(), "subnet-3".to_string()])
        );
        let status = latest.status.unwrap();
        assert_eq!(
            status.subnet_identifiers(),
            Some(vec!["subnet-1".to_string(), "subnet-3".to_string()])
        );
        assert!(status.ack_resource_metadata.unwrap().arn.is_some());
    }

    #[tokio::test]
    async fn test_sync_unset_subnets_settles() {
        let mock = create_test_mock_client();
        let manager = create_test_resource_manager(&mock);
        let original = create_test_cache_subnet_group("group-a", Some("d"), &["subnet-1"]);
        manager.create(&original).await.unwrap();

        let mut desired = original.clone();
        desired.spec.subnet_ids = None;
        for _ in 0..3 {
            let latest = sync(&manager, &desired).await.unwrap();
            assert_eq!(
                latest.status.unwrap().subnet_identifiers(),
                Some(vec!["subnet-1".to_string()])
            );
        }
        assert!(mock.modify_requests().is_empty());
    }

    #[tokio::test]
    async fn test_sync_missing_description_is_terminal() {
        let mock = create_test_mock_client();
        let manager = create_test_resource_manager(&mock);
        let desired = create_test_cache_subnet_group("group-a", None, &["subnet-1"]);

        let err = sync(&manager, &desired).await.unwrap_err();
        assert!(is_terminal(&err), "expected a terminal error, got {:?}", err);
        assert!(mock.cache_subnet_group("group-a").is_none());
    }

    #[tokio::test]
    async fn test_sync_propagates_describe_errors() {
        let mock = create_test_mock_client();
        mock.fail_next(MockOperation::Describe, ElastiCacheError::Transport("timeout".to_string()));
        let manager = create_test_resource_manager(&mock);
        let desired = create_test_cache_subnet_group("group-a", None, &["subnet-1"]);

        let err = sync(&manager, &desired).await.unwrap_err();
        assert!(matches!(err, ControllerError::ElastiCache(ElastiCacheError::Transport(_))));
        assert!(mock.create_requests().is_empty());
    }

    #[test]
    fn test_synced_status_clears_error_conditions() {
        let err = ControllerError::ElastiCache(ElastiCacheError::Transport("timeout".to_string()));
        let failed = failed_status(CacheSubnetGroupStatus::default(), &err, false);
        let recoverable = find_condition(&failed.conditions, ConditionType::Recoverable).unwrap();
        assert_eq!(recoverable.reason.as_deref(), Some("TransportError"));
        assert_eq!(recoverable.message.as_deref(), Some("Transport error: timeout"));

        let synced = synced_status(failed);
        assert_eq!(synced.conditions.len(), 1);
        assert_eq!(
            find_condition(&synced.conditions, ConditionType::ResourceSynced).unwrap().status,
            ConditionStatus::True
        );
    }

    #[test]
    fn test_synced_status_is_stable() {
        let once = synced_status(CacheSubnetGroupStatus::default());
        let twice = synced_status(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_terminal_errors() {
        let invalid = ControllerError::ElastiCache(ElastiCacheError::service("InvalidSubnet", "bad subnet"));
        let throttled = ControllerError::ElastiCache(ElastiCacheError::service("Throttling", "slow down"));
        assert!(is_terminal(&invalid));
        assert!(!is_terminal(&throttled));
        assert!(!is_terminal(&ControllerError::NotFound("group-a".to_string())));

        let status = failed_status(CacheSubnetGroupStatus::default(), &invalid, true);
        assert!(find_condition(&status.conditions, ConditionType::Terminal).is_some());
        assert!(find_condition(&status.conditions, ConditionType::Recoverable).is_none());
    }

    #[test]
    fn test_status_patch_uses_crd_field_names() {
        let status = with_observed_subnets(
            create_test_cache_subnet_group("group-a", None, &["subnet-1"]),
            &["subnet-1"],
        )
        .status
        .unwrap();
        let patch = status_patch(&synced_status(status));

        assert_eq!(patch["status"]["subnets"][0]["subnetIdentifier"], "subnet-1");
        assert_eq!(patch["status"]["conditions"][0]["type"], "ACK.ResourceSynced");
        assert_eq!(patch["status"]["conditions"][0]["status"], "True");
    }
}
