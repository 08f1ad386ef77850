//! Overlay helpers for merging ElastiCache responses into CacheSubnetGroup records

use crds::{AvailabilityZone, CacheSubnetGroup, CacheSubnetGroupStatus, Subnet};
use elasticache_client::models;

/// Replace `target` with `source` only when the source carries a value.
pub(super) fn overlay<T>(target: &mut Option<T>, source: Option<T>) {
    if source.is_some() {
        *target = source;
    }
}

/// Status of a record, created empty if the record has none yet
pub(super) fn status_mut(record: &mut CacheSubnetGroup) -> &mut CacheSubnetGroupStatus {
    record.status.get_or_insert_with(CacheSubnetGroupStatus::default)
}

/// Convert the subnets reported by ElastiCache into their status form
pub(super) fn subnets_from_remote(subnets: Option<Vec<models::Subnet>>) -> Option<Vec<Subnet>> {
    subnets.map(|subnets| {
        subnets
            .into_iter()
            .map(|subnet| Subnet {
                subnet_availability_zone: subnet
                    .subnet_availability_zone
                    .map(|az| AvailabilityZone { name: az.name }),
                subnet_identifier: subnet.subnet_identifier,
            })
            .collect()
    })
}

/// Overlay the subnets and VPC reported for a group onto a record's status.
/// Shared by the create and modify responses, which carry the same group shape.
pub(super) fn overlay_group_status(record: &mut CacheSubnetGroup, group: Option<models::CacheSubnetGroup>) {
    let status = status_mut(record);
    if let Some(group) = group {
        overlay(&mut status.subnets, subnets_from_remote(group.subnets));
        overlay(&mut status.vpc_id, group.vpc_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_keeps_target_when_source_absent() {
        let mut target = Some("kept".to_string());
        overlay(&mut target, None);
        assert_eq!(target.as_deref(), Some("kept"));

        overlay(&mut target, Some("replaced".to_string()));
        assert_eq!(target.as_deref(), Some("replaced"));
    }

    #[test]
    fn test_subnets_from_remote_keeps_order_and_missing_zone() {
        let subnets = subnets_from_remote(Some(vec![
            models::Subnet {
                subnet_identifier: Some("subnet-b".to_string()),
                subnet_availability_zone: Some(models::AvailabilityZone {
                    name: Some("us-west-2b".to_string()),
                }),
            },
            models::Subnet {
                subnet_identifier: Some("subnet-a".to_string()),
                subnet_availability_zone: None,
            },
        ]))
        .unwrap();

        assert_eq!(subnets[0].subnet_identifier.as_deref(), Some("subnet-b"));
        assert_eq!(
            subnets[0].subnet_availability_zone.as_ref().and_then(|az| az.name.as_deref()),
            Some("us-west-2b")
        );
        assert_eq!(subnets[1].subnet_identifier.as_deref(), Some("subnet-a"));
        assert!(subnets[1].subnet_availability_zone.is_none());
    }

    #[test]
    fn test_subnets_from_remote_none() {
        assert!(subnets_from_remote(None).is_none());
    }
}
