use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::payment::PaymentPayload;

#[derive(Debug, Error)]
pub enum QueueError {
	#[error("queue transport error: {0}")]
	Transport(String),
	#[error("queue codec error: {0}")]
	Codec(String),
}

/// Durable FIFO queue of accepted payment payloads. Delivery is
/// at-least-once; exact-once is the idempotency layers' job.
#[async_trait]
pub trait WorkQueue: Send + Sync + 'static {
	async fn enqueue(&self, payload: &PaymentPayload) -> Result<(), QueueError>;

	/// Blocks up to `timeout` waiting for an item; `None` on timeout.
	async fn dequeue(
		&self,
		timeout: Duration,
	) -> Result<Option<PaymentPayload>, QueueError>;
}
