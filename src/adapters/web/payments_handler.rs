use actix_web::{post, web, HttpResponse, Responder, ResponseError};
use log::{info, warn};

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::PaymentRequest;
use crate::domain::payment::PaymentPayload;
use crate::infrastructure::cache::redis_dedup_cache::RedisDedupCache;
use crate::infrastructure::persistence::postgres_account_store::PgAccountStore;
use crate::infrastructure::queue::redis_work_queue::RedisWorkQueue;
use crate::use_cases::submit_payment::SubmitPaymentUseCase;

#[post("/payments")]
pub async fn payments(
	payload: web::Json<PaymentRequest>,
	submit_payment_use_case: web::Data<
		SubmitPaymentUseCase<PgAccountStore, RedisWorkQueue, RedisDedupCache>,
	>,
) -> impl Responder {
	let payload: PaymentPayload = payload.into_inner().into();
	let reference = payload.transaction_reference.clone();

	match submit_payment_use_case.execute(payload).await {
		Ok(ack) => {
			info!("Payment {} {}", reference, ack.status);
			HttpResponse::Ok().json(ack)
		}
		Err(e) => {
			warn!("Payment {reference} rejected: {e}");
			ApiError::from(e).error_response()
		}
	}
}
