use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerAccount;
use crate::domain::payment::{PaymentPayload, PaymentStatus};
use crate::infrastructure::persistence::postgres_account_store::StoreStats;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentRequest {
	pub customer_id:           String,
	pub payment_status:        PaymentStatus,
	pub transaction_amount:    String,
	pub transaction_date:      String,
	pub transaction_reference: String,
}

impl From<PaymentRequest> for PaymentPayload {
	fn from(request: PaymentRequest) -> Self {
		PaymentPayload {
			customer_id:           request.customer_id,
			payment_status:        request.payment_status,
			transaction_amount:    request.transaction_amount,
			transaction_date:      request.transaction_date,
			transaction_reference: request.transaction_reference,
		}
	}
}

#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
	pub service: &'static str,
	pub version: &'static str,
	pub docs:    &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status:    &'static str,
	pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
	pub customer_id:           String,
	pub asset_value:           f64,
	pub total_paid:            f64,
	pub outstanding_balance:   f64,
	pub payment_count:         i32,
	pub completion_percentage: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_payment_date:     Option<DateTime<Utc>>,
}

impl From<CustomerAccount> for BalanceResponse {
	fn from(customer: CustomerAccount) -> Self {
		let completion_percentage =
			format!("{:.2}", customer.completion_percentage());
		BalanceResponse {
			customer_id: customer.customer_id,
			asset_value: customer.asset_value,
			total_paid: customer.total_paid,
			outstanding_balance: customer.outstanding_balance,
			payment_count: customer.payment_count,
			completion_percentage,
			last_payment_date: customer.last_payment_date,
		}
	}
}

#[derive(Debug, Serialize)]
pub struct CustomerSummary {
	pub customer_id:           String,
	pub asset_value:           f64,
	pub total_paid:            f64,
	pub outstanding_balance:   f64,
	pub payment_count:         i32,
	pub completion_percentage: String,
}

impl From<CustomerAccount> for CustomerSummary {
	fn from(customer: CustomerAccount) -> Self {
		let completion_percentage =
			format!("{:.2}", customer.completion_percentage());
		CustomerSummary {
			customer_id: customer.customer_id,
			asset_value: customer.asset_value,
			total_paid: customer.total_paid,
			outstanding_balance: customer.outstanding_balance,
			payment_count: customer.payment_count,
			completion_percentage,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct ListCustomersQuery {
	pub limit:  Option<i64>,
	pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
	pub customers: Vec<CustomerSummary>,
	pub total:     i64,
	pub limit:     i64,
	pub offset:    i64,
}

#[derive(Debug, Deserialize)]
pub struct SeedCustomersRequest {
	pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct SeedCustomersResponse {
	pub message:         String,
	pub requested:       i64,
	pub total_customers: i64,
}

#[derive(Debug, Serialize)]
pub struct QueueInfo {
	pub size: i64,
}

#[derive(Debug, Serialize)]
pub struct WorkerInfo {
	pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
	pub database: StoreStats,
	pub queue:    QueueInfo,
	pub workers:  WorkerInfo,
}
