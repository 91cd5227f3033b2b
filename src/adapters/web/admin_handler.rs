use actix_web::{get, post, web, HttpResponse, Responder, ResponseError};
use log::error;

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{
	QueueInfo, SeedCustomersRequest, SeedCustomersResponse, StatsResponse,
	WorkerInfo,
};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::persistence::postgres_account_store::PgAccountStore;
use crate::infrastructure::queue::redis_work_queue::RedisWorkQueue;

const MAX_SEED_COUNT: i64 = 10_000;

#[post("/admin/seed-customers")]
pub async fn seed_customers(
	request: web::Json<SeedCustomersRequest>,
	store: web::Data<PgAccountStore>,
) -> impl Responder {
	let count = request.count;
	if !(1..=MAX_SEED_COUNT).contains(&count) {
		return ApiError::BadRequest {
			message: format!("count must be between 1 and {MAX_SEED_COUNT}"),
		}
		.error_response();
	}

	if let Err(e) = store.seed_customers(count).await {
		error!("Failed to seed customers: {e}");
		return ApiError::Internal.error_response();
	}

	let total_customers = store.customer_count().await.unwrap_or(0);

	HttpResponse::Ok().json(SeedCustomersResponse {
		message:         "Customers seeded successfully".to_string(),
		requested:       count,
		total_customers,
	})
}

#[get("/admin/stats")]
pub async fn stats(
	store: web::Data<PgAccountStore>,
	queue: web::Data<RedisWorkQueue>,
	config: web::Data<Config>,
) -> impl Responder {
	let database = match store.stats().await {
		Ok(stats) => stats,
		Err(e) => {
			error!("Failed to fetch store statistics: {e}");
			return ApiError::Internal.error_response();
		}
	};

	// Queue depth is best-effort here; the stats page must not fail on it.
	let size = queue.queue_depth().await.unwrap_or(0);

	HttpResponse::Ok().json(StatsResponse {
		database,
		queue: QueueInfo { size },
		workers: WorkerInfo {
			count: config.worker_count,
		},
	})
}
