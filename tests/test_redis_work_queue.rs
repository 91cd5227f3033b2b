use std::time::Duration;

use asset_payments::domain::payment::{PaymentPayload, PaymentStatus};
use asset_payments::domain::queue::{QueueError, WorkQueue};
use asset_payments::infrastructure::config::redis::PAYMENT_QUEUE_KEY;
use asset_payments::infrastructure::queue::redis_work_queue::RedisWorkQueue;
use redis::AsyncCommands;

mod support;

use crate::support::redis_container::setup_redis_container;

fn payload(reference: &str, amount: &str) -> PaymentPayload {
	PaymentPayload {
		customer_id:           "GIG00001".to_string(),
		payment_status:        PaymentStatus::Complete,
		transaction_amount:    amount.to_string(),
		transaction_date:      "2025-11-07 14:54:16".to_string(),
		transaction_reference: reference.to_string(),
	}
}

#[tokio::test]
async fn test_queue_preserves_fifo_order() {
	let redis = setup_redis_container().await;
	let queue = RedisWorkQueue::new(redis.client.clone());

	queue.enqueue(&payload("R1", "100")).await.unwrap();
	queue.enqueue(&payload("R2", "200")).await.unwrap();

	let first = queue
		.dequeue(Duration::from_secs(1))
		.await
		.unwrap()
		.unwrap();
	let second = queue
		.dequeue(Duration::from_secs(1))
		.await
		.unwrap()
		.unwrap();

	assert_eq!(first.transaction_reference, "R1");
	assert_eq!(second.transaction_reference, "R2");
}

#[tokio::test]
async fn test_dequeue_times_out_on_empty_queue() {
	let redis = setup_redis_container().await;
	let queue = RedisWorkQueue::new(redis.client.clone());

	let popped = queue.dequeue(Duration::from_secs(1)).await.unwrap();
	assert!(popped.is_none());
}

#[tokio::test]
async fn test_payload_round_trips_through_the_queue() {
	let redis = setup_redis_container().await;
	let queue = RedisWorkQueue::new(redis.client.clone());

	let original = payload("R1", "10000.50");
	queue.enqueue(&original).await.unwrap();

	let popped = queue
		.dequeue(Duration::from_secs(1))
		.await
		.unwrap()
		.unwrap();
	assert_eq!(popped, original);
}

#[tokio::test]
async fn test_malformed_item_is_a_codec_error() {
	let redis = setup_redis_container().await;
	let queue = RedisWorkQueue::new(redis.client.clone());

	let mut con = redis
		.client
		.get_multiplexed_async_connection()
		.await
		.unwrap();
	let _: () = con
		.rpush(PAYMENT_QUEUE_KEY, "this is not a valid payload")
		.await
		.unwrap();

	let err = queue.dequeue(Duration::from_secs(1)).await.unwrap_err();
	assert!(matches!(err, QueueError::Codec(_)));
}

#[tokio::test]
async fn test_queue_depth_tracks_enqueued_items() {
	let redis = setup_redis_container().await;
	let queue = RedisWorkQueue::new(redis.client.clone());

	assert_eq!(queue.queue_depth().await.unwrap(), 0);

	queue.enqueue(&payload("R1", "100")).await.unwrap();
	queue.enqueue(&payload("R2", "100")).await.unwrap();
	assert_eq!(queue.queue_depth().await.unwrap(), 2);

	queue.dequeue(Duration::from_secs(1)).await.unwrap();
	assert_eq!(queue.queue_depth().await.unwrap(), 1);
}
