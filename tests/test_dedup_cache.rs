use std::time::Duration;

use asset_payments::domain::cache::DedupCache;
use asset_payments::infrastructure::cache::redis_dedup_cache::RedisDedupCache;

mod support;

use crate::support::redis_container::setup_redis_container;

const TTL: Duration = Duration::from_secs(60);

#[tokio::test]
async fn test_ping_succeeds_against_live_redis() {
	let redis = setup_redis_container().await;
	let cache = RedisDedupCache::new(redis.client.clone());

	cache.ping(Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_marks_round_trip() {
	let redis = setup_redis_container().await;
	let cache = RedisDedupCache::new(redis.client.clone());

	assert!(!cache.is_duplicate("R1").await.unwrap());

	cache.mark_duplicate("R1", TTL).await.unwrap();

	assert!(cache.is_duplicate("R1").await.unwrap());
	assert!(!cache.is_duplicate("R2").await.unwrap());
}

#[tokio::test]
async fn test_balance_cache_round_trips_with_two_decimals() {
	let redis = setup_redis_container().await;
	let cache = RedisDedupCache::new(redis.client.clone());

	assert_eq!(cache.get_cached_balance("GIG00001").await.unwrap(), None);

	cache.cache_balance("GIG00001", 990_000.25, TTL).await.unwrap();
	assert_eq!(
		cache.get_cached_balance("GIG00001").await.unwrap(),
		Some(990_000.25)
	);

	// Values are rendered to two fractional digits on write.
	cache.cache_balance("GIG00002", 100.0, TTL).await.unwrap();
	assert_eq!(
		cache.get_cached_balance("GIG00002").await.unwrap(),
		Some(100.0)
	);
}
