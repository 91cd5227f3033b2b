use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use tokio::time::timeout;

use crate::domain::cache::{CacheError, DedupCache};
use crate::infrastructure::config::redis::{
	BALANCE_KEY_PREFIX, TXN_KEY_PREFIX,
};

#[derive(Clone)]
pub struct RedisDedupCache {
	client: Client,
}

impl RedisDedupCache {
	pub fn new(client: Client) -> Self {
		Self { client }
	}

	async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
		self.client
			.get_multiplexed_async_connection()
			.await
			.map_err(|e| CacheError(e.to_string()))
	}

	/// Startup connectivity check, bounded by `deadline`.
	pub async fn ping(&self, deadline: Duration) -> Result<(), CacheError> {
		let check = async {
			let mut con = self.connection().await?;
			redis::cmd("PING")
				.query_async::<String>(&mut con)
				.await
				.map_err(|e| CacheError(e.to_string()))?;
			Ok(())
		};

		timeout(deadline, check).await.map_err(|_| {
			CacheError(format!("redis ping timed out after {deadline:?}"))
		})?
	}
}

#[async_trait]
impl DedupCache for RedisDedupCache {
	async fn is_duplicate(&self, reference: &str) -> Result<bool, CacheError> {
		let mut con = self.connection().await?;
		let exists: bool = con
			.exists(format!("{TXN_KEY_PREFIX}{reference}"))
			.await
			.map_err(|e| CacheError(e.to_string()))?;
		Ok(exists)
	}

	async fn mark_duplicate(
		&self,
		reference: &str,
		ttl: Duration,
	) -> Result<(), CacheError> {
		let mut con = self.connection().await?;
		let _: () = con
			.set_ex(format!("{TXN_KEY_PREFIX}{reference}"), "1", ttl.as_secs())
			.await
			.map_err(|e| CacheError(e.to_string()))?;
		Ok(())
	}

	async fn get_cached_balance(
		&self,
		customer_id: &str,
	) -> Result<Option<f64>, CacheError> {
		let mut con = self.connection().await?;
		let value: Option<String> = con
			.get(format!("{BALANCE_KEY_PREFIX}{customer_id}"))
			.await
			.map_err(|e| CacheError(e.to_string()))?;

		let Some(raw) = value else {
			return Ok(None);
		};
		let balance = raw.parse::<f64>().map_err(|_| {
			CacheError(format!("invalid cached balance: {raw:?}"))
		})?;
		Ok(Some(balance))
	}

	async fn cache_balance(
		&self,
		customer_id: &str,
		balance: f64,
		ttl: Duration,
	) -> Result<(), CacheError> {
		let mut con = self.connection().await?;
		let _: () = con
			.set_ex(
				format!("{BALANCE_KEY_PREFIX}{customer_id}"),
				format!("{balance:.2}"),
				ttl.as_secs(),
			)
			.await
			.map_err(|e| CacheError(e.to_string()))?;
		Ok(())
	}
}
