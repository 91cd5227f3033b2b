use actix_web::{get, web, HttpResponse, Responder, ResponseError};
use log::error;

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{
	BalanceResponse, CustomerListResponse, ListCustomersQuery,
};
use crate::domain::store::{AccountStore, StoreError};
use crate::infrastructure::persistence::postgres_account_store::PgAccountStore;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[get("/customers/{customer_id}/balance")]
pub async fn customer_balance(
	path: web::Path<String>,
	store: web::Data<PgAccountStore>,
) -> impl Responder {
	let customer_id = path.into_inner();

	match store.get_customer(&customer_id).await {
		Ok(customer) => {
			HttpResponse::Ok().json(BalanceResponse::from(customer))
		}
		Err(StoreError::NotFound) => {
			ApiError::CustomerNotFound.error_response()
		}
		Err(e) => {
			error!("Failed to fetch customer {customer_id}: {e}");
			ApiError::Internal.error_response()
		}
	}
}

#[get("/customers")]
pub async fn list_customers(
	query: web::Query<ListCustomersQuery>,
	store: web::Data<PgAccountStore>,
) -> impl Responder {
	let limit = query
		.limit
		.unwrap_or(DEFAULT_PAGE_SIZE)
		.clamp(1, MAX_PAGE_SIZE);
	let offset = query.offset.unwrap_or(0).max(0);

	let customers = match store.list_customers(limit, offset).await {
		Ok(customers) => customers,
		Err(e) => {
			error!("Failed to list customers: {e}");
			return ApiError::Internal.error_response();
		}
	};

	let total = match store.customer_count().await {
		Ok(total) => total,
		Err(e) => {
			error!("Failed to count customers: {e}");
			return ApiError::Internal.error_response();
		}
	};

	HttpResponse::Ok().json(CustomerListResponse {
		customers: customers.into_iter().map(Into::into).collect(),
		total,
		limit,
		offset,
	})
}
