//! Integration tests for the ElastiCache client
//!
//! These tests require AWS credentials and create real resources.
//! Set AWS_REGION and ELASTICACHE_TEST_SUBNET_IDS (comma-separated) to run.

use elasticache_client::{
    CreateCacheSubnetGroupInput, DeleteCacheSubnetGroupInput, DescribeCacheSubnetGroupsInput,
    ElastiCacheClient, ElastiCacheClientTrait,
};

#[tokio::test]
#[ignore] // Requires AWS credentials
async fn test_describe_all_groups() {
    let client = ElastiCacheClient::from_env(std::env::var("AWS_REGION").ok()).await;

    let output = client
        .describe_cache_subnet_groups(DescribeCacheSubnetGroupsInput::default())
        .await
        .expect("Failed to describe cache subnet groups");

    println!("Found {} cache subnet groups", output.cache_subnet_groups.len());
}

#[tokio::test]
#[ignore]
async fn test_caller_account_id() {
    let client = ElastiCacheClient::from_env(std::env::var("AWS_REGION").ok()).await;

    let account_id = client
        .caller_account_id()
        .await
        .expect("Failed to resolve caller account ID");

    assert_eq!(account_id.len(), 12, "Unexpected account ID: {}", account_id);
    assert!(account_id.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
#[ignore]
async fn test_describe_missing_group_is_not_found() {
    let client = ElastiCacheClient::from_env(std::env::var("AWS_REGION").ok()).await;

    let err = client
        .describe_cache_subnet_groups(DescribeCacheSubnetGroupsInput {
            cache_subnet_group_name: Some("elasticache-client-does-not-exist".to_string()),
            ..Default::default()
        })
        .await
        .expect_err("Describing a missing group should fail");

    assert!(err.is_not_found(), "Unexpected error: {}", err);
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_group() {
    let client = ElastiCacheClient::from_env(std::env::var("AWS_REGION").ok()).await;
    let subnet_ids: Vec<String> = std::env::var("ELASTICACHE_TEST_SUBNET_IDS")
        .expect("ELASTICACHE_TEST_SUBNET_IDS environment variable must be set")
        .split(',')
        .map(|s| s.trim().to_string())
        .collect();
    let name = "elasticache-client-it".to_string();

    let created = client
        .create_cache_subnet_group(CreateCacheSubnetGroupInput {
            cache_subnet_group_description: Some("integration test".to_string()),
            cache_subnet_group_name: Some(name.clone()),
            subnet_ids: Some(subnet_ids.clone()),
        })
        .await
        .expect("Failed to create cache subnet group");

    let group = created.cache_subnet_group.expect("Create returned no group");
    assert_eq!(group.subnets.map(|s| s.len()), Some(subnet_ids.len()));

    client
        .delete_cache_subnet_group(DeleteCacheSubnetGroupInput {
            cache_subnet_group_name: Some(name),
        })
        .await
        .expect("Failed to delete cache subnet group");
}
