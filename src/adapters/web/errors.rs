use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{error, HttpResponse};
use derive_more::derive::{Display, Error};
use serde::Serialize;

use crate::use_cases::submit_payment::SubmitError;

#[derive(Serialize)]
struct ErrorResponse {
	#[serde(rename = "statusCode")]
	status_code: u16,
	error:       String,
	message:     String,
}

#[derive(Debug, Display, Error)]
pub enum ApiError {
	#[display("{message}")]
	BadRequest { message: String },
	#[display("Customer not found")]
	CustomerNotFound,
	#[display("Failed to queue payment")]
	QueueUnavailable,
	#[display("Internal server error.")]
	Internal,
}

impl ApiError {
	pub fn name(&self) -> String {
		match self {
			ApiError::BadRequest { .. } => "Bad Request".to_string(),
			ApiError::CustomerNotFound => "Not Found".to_string(),
			ApiError::QueueUnavailable | ApiError::Internal => {
				"Internal Server Error".to_string()
			}
		}
	}
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				status_code: self.status_code().as_u16(),
				error:       self.to_string(),
				message:     self.name(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
			ApiError::CustomerNotFound => StatusCode::NOT_FOUND,
			ApiError::QueueUnavailable | ApiError::Internal => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}
}

impl From<SubmitError> for ApiError {
	fn from(err: SubmitError) -> Self {
		match err {
			SubmitError::InvalidPayload(message) => {
				ApiError::BadRequest { message }
			}
			SubmitError::UnsupportedStatus(_) => ApiError::BadRequest {
				message: err.to_string(),
			},
			SubmitError::UnknownCustomer(_) => ApiError::CustomerNotFound,
			SubmitError::Queue(_) => ApiError::QueueUnavailable,
			SubmitError::Store(_) => ApiError::Internal,
		}
	}
}

#[cfg(test)]
mod tests {
	use actix_web::error::ResponseError;

	use super::*;
	use crate::domain::payment::PaymentStatus;

	#[test]
	fn test_bad_request_maps_to_400() {
		let error = ApiError::BadRequest {
			message: "customer_id must begin with GIG".to_string(),
		};
		assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
		assert_eq!(error.name(), "Bad Request");

		let resp = error.error_response();
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[test]
	fn test_customer_not_found_maps_to_404() {
		let error = ApiError::CustomerNotFound;
		assert_eq!(error.status_code(), StatusCode::NOT_FOUND);

		let resp = error.error_response();
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	}

	#[test]
	fn test_queue_unavailable_maps_to_500() {
		let error = ApiError::QueueUnavailable;
		assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[test]
	fn test_unsupported_status_message_names_the_status() {
		let api_error: ApiError =
			SubmitError::UnsupportedStatus(PaymentStatus::Pending).into();
		assert!(api_error.to_string().contains("PENDING"));
		assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
	}
}
