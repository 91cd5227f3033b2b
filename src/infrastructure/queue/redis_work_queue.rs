use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};

use crate::domain::payment::PaymentPayload;
use crate::domain::queue::{QueueError, WorkQueue};
use crate::infrastructure::config::redis::PAYMENT_QUEUE_KEY;

/// Work queue backed by a single Redis list. Tail-insert, head-pop; FIFO
/// within the list.
#[derive(Clone)]
pub struct RedisWorkQueue {
	client: Client,
}

impl RedisWorkQueue {
	pub fn new(client: Client) -> Self {
		Self { client }
	}

	async fn connection(&self) -> Result<MultiplexedConnection, QueueError> {
		self.client
			.get_multiplexed_async_connection()
			.await
			.map_err(|e| QueueError::Transport(e.to_string()))
	}

	/// Current number of queued items. Admin-only; not part of the queue
	/// contract.
	pub async fn queue_depth(&self) -> Result<i64, QueueError> {
		let mut con = self.connection().await?;
		let depth: i64 = con
			.llen(PAYMENT_QUEUE_KEY)
			.await
			.map_err(|e| QueueError::Transport(e.to_string()))?;
		Ok(depth)
	}
}

#[async_trait]
impl WorkQueue for RedisWorkQueue {
	async fn enqueue(&self, payload: &PaymentPayload) -> Result<(), QueueError> {
		let mut con = self.connection().await?;

		let body = serde_json::to_string(payload)
			.map_err(|e| QueueError::Codec(e.to_string()))?;

		let _: () = con
			.rpush(PAYMENT_QUEUE_KEY, body)
			.await
			.map_err(|e| QueueError::Transport(e.to_string()))?;
		Ok(())
	}

	async fn dequeue(
		&self,
		timeout: Duration,
	) -> Result<Option<PaymentPayload>, QueueError> {
		let mut con = self.connection().await?;

		let popped: Option<(String, String)> = con
			.blpop(PAYMENT_QUEUE_KEY, timeout.as_secs_f64())
			.await
			.map_err(|e| QueueError::Transport(e.to_string()))?;

		let Some((_queue_name, body)) = popped else {
			return Ok(None);
		};

		let payload = serde_json::from_str(&body)
			.map_err(|e| QueueError::Codec(e.to_string()))?;

		Ok(Some(payload))
	}
}
