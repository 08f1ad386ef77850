//! Controller configuration loaded from environment variables.

use crate::error::ControllerError;
use std::time::Duration;

/// Default periodic resync, matching the AWS controllers' 10 hour default
const DEFAULT_RESYNC_PERIOD_SECONDS: u64 = 36_000;

/// Default requeue delay after a failed reconciliation
const DEFAULT_ERROR_REQUEUE_SECONDS: u64 = 60;

/// Runtime configuration for the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// AWS region override (`AWS_REGION`); the SDK provider chain decides when unset
    pub region: Option<String>,
    /// Account that owns created resources (`AWS_ACCOUNT_ID`); resolved via STS when unset
    pub account_id: Option<String>,
    /// Namespace to watch (`WATCH_NAMESPACE`); all namespaces when unset
    pub namespace: Option<String>,
    /// How often a synced resource is re-read from AWS (`RESYNC_PERIOD_SECONDS`)
    pub resync_period: Duration,
    /// Requeue delay after a failed reconciliation (`ERROR_REQUEUE_SECONDS`)
    pub error_requeue: Duration,
}

impl ControllerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup function.
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            region: get("AWS_REGION"),
            account_id: get("AWS_ACCOUNT_ID"),
            namespace: get("WATCH_NAMESPACE"),
            resync_period: parse_seconds("RESYNC_PERIOD_SECONDS", get("RESYNC_PERIOD_SECONDS"), DEFAULT_RESYNC_PERIOD_SECONDS)?,
            error_requeue: parse_seconds("ERROR_REQUEUE_SECONDS", get("ERROR_REQUEUE_SECONDS"), DEFAULT_ERROR_REQUEUE_SECONDS)?,
        })
    }
}

fn parse_seconds(key: &str, value: Option<String>, default: u64) -> Result<Duration, ControllerError> {
    let seconds = match value {
        Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
            ControllerError::InvalidConfig(format!("{} must be a whole number of seconds, got '{}': {}", key, raw, e))
        })?,
        None => default,
    };
    Ok(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ControllerConfig, ControllerError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ControllerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.region, None);
        assert_eq!(config.account_id, None);
        assert_eq!(config.namespace, None);
        assert_eq!(config.resync_period, Duration::from_secs(36_000));
        assert_eq!(config.error_requeue, Duration::from_secs(60));
    }

    #[test]
    fn test_reads_all_variables() {
        let config = config_from(&[
            ("AWS_REGION", "eu-west-1"),
            ("AWS_ACCOUNT_ID", "111122223333"),
            ("WATCH_NAMESPACE", "caches"),
            ("RESYNC_PERIOD_SECONDS", "300"),
            ("ERROR_REQUEUE_SECONDS", " 15 "),
        ])
        .unwrap();
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.account_id.as_deref(), Some("111122223333"));
        assert_eq!(config.namespace.as_deref(), Some("caches"));
        assert_eq!(config.resync_period, Duration::from_secs(300));
        assert_eq!(config.error_requeue, Duration::from_secs(15));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = config_from(&[("AWS_ACCOUNT_ID", ""), ("WATCH_NAMESPACE", "  ")]).unwrap();
        assert_eq!(config.account_id, None);
        assert_eq!(config.namespace, None);
    }

    #[test]
    fn test_invalid_resync_period() {
        let err = config_from(&[("RESYNC_PERIOD_SECONDS", "ten hours")]).unwrap_err();
        assert!(matches!(err, ControllerError::InvalidConfig(_)));
    }
}
