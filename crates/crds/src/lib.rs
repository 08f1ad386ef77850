//! ElastiCache Controller CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the ElastiCache controller.

pub mod ack;
pub mod cache_subnet_group;

pub use ack::*;
pub use cache_subnet_group::*;
