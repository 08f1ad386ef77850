//! Shared status types for AWS-backed resources
//!
//! Resource metadata and conditions follow the AWS Controllers for Kubernetes
//! conventions so that tooling reading `ackResourceMetadata` and `ACK.*`
//! conditions keeps working against these CRDs.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata identifying the AWS resource backing a Kubernetes object
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    /// Amazon Resource Name of the backing resource.
    /// Empty until the resource has been read back from AWS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,

    /// AWS account that owns the backing resource
    #[serde(rename = "ownerAccountID", default, skip_serializing_if = "Option::is_none")]
    pub owner_account_id: Option<String>,
}

/// Condition types reported on the resource status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum ConditionType {
    /// The desired state matches the latest observed state in AWS
    #[serde(rename = "ACK.ResourceSynced")]
    ResourceSynced,
    /// Reconciliation failed and will not succeed without a spec change
    #[serde(rename = "ACK.Terminal")]
    Terminal,
    /// Reconciliation failed with an error that may resolve on retry
    #[serde(rename = "ACK.Recoverable")]
    Recoverable,
}

/// Condition status, mirroring Kubernetes `ConditionStatus`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

/// A single observation about the resource
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition
    #[serde(rename = "type")]
    pub condition_type: ConditionType,

    /// Status of the condition (True, False, Unknown)
    pub status: ConditionStatus,

    /// Last time the condition transitioned from one status to another
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,

    /// Machine-readable reason for the last transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable details about the last transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Condition {
    /// Create a condition stamped with the current time
    pub fn new(
        condition_type: ConditionType,
        status: ConditionStatus,
        reason: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            condition_type,
            status,
            last_transition_time: Some(Utc::now()),
            reason,
            message,
        }
    }
}

/// Look up a condition by type
pub fn find_condition(conditions: &[Condition], condition_type: ConditionType) -> Option<&Condition> {
    conditions.iter().find(|c| c.condition_type == condition_type)
}

/// Insert or update a condition in place.
///
/// `lastTransitionTime` only moves when the status actually changes, so
/// re-asserting an unchanged condition leaves the status byte-for-byte equal.
pub fn set_condition(
    conditions: &mut Vec<Condition>,
    condition_type: ConditionType,
    status: ConditionStatus,
    reason: Option<String>,
    message: Option<String>,
) {
    match conditions.iter_mut().find(|c| c.condition_type == condition_type) {
        Some(existing) => {
            if existing.status != status {
                existing.status = status;
                existing.last_transition_time = Some(Utc::now());
            }
            existing.reason = reason;
            existing.message = message;
        }
        None => conditions.push(Condition::new(condition_type, status, reason, message)),
    }
}

/// Remove every condition of the given type
pub fn remove_condition(conditions: &mut Vec<Condition>, condition_type: ConditionType) {
    conditions.retain(|c| c.condition_type != condition_type);
}
