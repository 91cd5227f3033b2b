use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;

use crate::adapters::web::schema::{HealthResponse, ServiceInfoResponse};

#[get("/")]
pub async fn service_info() -> impl Responder {
	HttpResponse::Ok().json(ServiceInfoResponse {
		service: "Asset Payment Processing API",
		version: env!("CARGO_PKG_VERSION"),
		docs:    "/api/v1/health",
	})
}

#[get("/health")]
pub async fn health() -> impl Responder {
	HttpResponse::Ok().json(HealthResponse {
		status:    "healthy",
		timestamp: Utc::now().to_rfc3339(),
	})
}
