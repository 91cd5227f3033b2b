use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Authoritative account row. `version` is the optimistic-concurrency token;
/// every committed update increments it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CustomerAccount {
	pub customer_id:         String,
	pub asset_value:         f64,
	pub term_weeks:          i32,
	pub total_paid:          f64,
	pub outstanding_balance: f64,
	pub deployment_date:     DateTime<Utc>,
	pub last_payment_date:   Option<DateTime<Utc>>,
	pub payment_count:       i32,
	pub version:             i32,
	pub created_at:          DateTime<Utc>,
	pub updated_at:          DateTime<Utc>,
}

impl CustomerAccount {
	pub fn completion_percentage(&self) -> f64 {
		if self.asset_value > 0.0 {
			self.total_paid / self.asset_value * 100.0
		} else {
			0.0
		}
	}
}
