//! CacheSubnetGroup Controller
//!
//! Reconciles `CacheSubnetGroup` CRDs against ElastiCache cache subnet groups:
//! creates missing groups, modifies groups whose description or subnets drifted,
//! and deletes the group when the resource is deleted.

mod config;
mod controller;
mod error;
mod reconciler;
mod resource_manager;
mod watcher;
#[cfg(test)]
mod test_utils;

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use controller::Controller;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    tracing_subscriber::fmt::init();

    info!("Starting CacheSubnetGroup Controller");

    let config = ControllerConfig::from_env()?;

    info!("Configuration:");
    info!("  Region: {}", config.region.as_deref().unwrap_or("from AWS provider chain"));
    info!("  Namespace: {}", config.namespace.as_deref().unwrap_or("all namespaces"));
    info!("  Resync period: {:?}", config.resync_period);

    let controller = Controller::new(config).await?;
    controller.run().await?;

    Ok(())
}
