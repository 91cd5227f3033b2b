use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("cache error: {0}")]
pub struct CacheError(pub String);

/// Advisory dedup marks and balance hints. A miss or an error here only
/// sends work down the authoritative path; correctness never rests on it.
#[async_trait]
pub trait DedupCache: Send + Sync + 'static {
	async fn is_duplicate(&self, reference: &str) -> Result<bool, CacheError>;

	async fn mark_duplicate(
		&self,
		reference: &str,
		ttl: Duration,
	) -> Result<(), CacheError>;

	async fn get_cached_balance(
		&self,
		customer_id: &str,
	) -> Result<Option<f64>, CacheError>;

	async fn cache_balance(
		&self,
		customer_id: &str,
		balance: f64,
		ttl: Duration,
	) -> Result<(), CacheError>;
}
