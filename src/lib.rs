pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod use_cases;

use std::time::Duration;

use actix_web::{web, App, HttpServer};
use log::info;

use crate::adapters::web::admin_handler::{seed_customers, stats};
use crate::adapters::web::customers_handler::{
	customer_balance, list_customers,
};
use crate::adapters::web::health_handler::{health, service_info};
use crate::adapters::web::payments_handler::payments;
use crate::infrastructure::cache::redis_dedup_cache::RedisDedupCache;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::persistence::postgres_account_store::PgAccountStore;
use crate::infrastructure::queue::redis_work_queue::RedisWorkQueue;
use crate::infrastructure::workers::payment_worker::WorkerPool;
use crate::use_cases::apply_payment::ApplyPaymentUseCase;
use crate::use_cases::submit_payment::SubmitPaymentUseCase;

/// Deadline for the Redis connectivity check at startup.
const STARTUP_PING_DEADLINE: Duration = Duration::from_secs(5);

pub async fn run(config: Config) -> std::io::Result<()> {
	env_logger::init();

	let store = PgAccountStore::connect(&config.database_url)
		.await
		.map_err(|e| {
			std::io::Error::other(format!("Failed to connect to database: {e}"))
		})?;
	info!("Database connected successfully");

	let redis_client =
		redis::Client::open(config.redis_url.clone()).map_err(|e| {
			std::io::Error::other(format!("Invalid Redis URL: {e}"))
		})?;
	let cache = RedisDedupCache::new(redis_client.clone());
	cache.ping(STARTUP_PING_DEADLINE).await.map_err(|e| {
		std::io::Error::other(format!("Failed to connect to Redis: {e}"))
	})?;
	info!("Redis connected successfully");

	let queue = RedisWorkQueue::new(redis_client);

	let workers = WorkerPool::spawn(
		config.worker_count,
		queue.clone(),
		ApplyPaymentUseCase::new(store.clone(), cache.clone()),
	);

	let submit_payment =
		SubmitPaymentUseCase::new(store.clone(), queue.clone(), cache);

	let port = config.port;
	let config_data = web::Data::new(config);
	let store_data = web::Data::new(store.clone());
	let queue_data = web::Data::new(queue);
	let submit_data = web::Data::new(submit_payment);

	info!("Server starting on port {port}");
	HttpServer::new(move || {
		App::new()
			.app_data(config_data.clone())
			.app_data(store_data.clone())
			.app_data(queue_data.clone())
			.app_data(submit_data.clone())
			.service(service_info)
			.service(
				web::scope("/api/v1")
					.service(health)
					.service(payments)
					.service(customer_balance)
					.service(list_customers)
					.service(seed_customers)
					.service(stats),
			)
	})
	.bind(("0.0.0.0", port))?
	.run()
	.await?;

	// The HTTP server has observed SIGINT/SIGTERM; drain the workers before
	// releasing the store.
	workers.shutdown().await;
	store.close().await;
	info!("Shutdown complete");
	Ok(())
}
