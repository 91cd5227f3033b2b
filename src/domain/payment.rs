use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CUSTOMER_ID_PREFIX: &str = "GIG";

const TRANSACTION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
	Complete,
	Pending,
	Failed,
}

impl fmt::Display for PaymentStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			PaymentStatus::Complete => "COMPLETE",
			PaymentStatus::Pending => "PENDING",
			PaymentStatus::Failed => "FAILED",
		};
		f.write_str(name)
	}
}

/// A customer payment notification. `transaction_reference` is the
/// idempotency key for the whole pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPayload {
	pub customer_id:           String,
	pub payment_status:        PaymentStatus,
	pub transaction_amount:    String,
	pub transaction_date:      String,
	pub transaction_reference: String,
}

impl PaymentPayload {
	pub fn validate(&self) -> Result<(), String> {
		if !self.customer_id.starts_with(CUSTOMER_ID_PREFIX) {
			return Err(format!(
				"customer_id must begin with {CUSTOMER_ID_PREFIX}"
			));
		}
		if self.transaction_reference.trim().is_empty() {
			return Err("transaction_reference must not be empty".to_string());
		}
		if self.transaction_amount.trim().is_empty() {
			return Err("transaction_amount must not be empty".to_string());
		}
		if self.transaction_date.trim().is_empty() {
			return Err("transaction_date must not be empty".to_string());
		}
		Ok(())
	}

	/// Strict decimal parse. Non-finite and negative amounts are permanent
	/// payload errors, never retried.
	pub fn parsed_amount(&self) -> Result<f64, String> {
		let raw = self.transaction_amount.trim();
		let amount: f64 = raw
			.parse()
			.map_err(|_| format!("invalid transaction_amount: {raw:?}"))?;
		if !amount.is_finite() || amount < 0.0 {
			return Err(format!("invalid transaction_amount: {raw:?}"));
		}
		Ok(amount)
	}

	/// Accepts `YYYY-MM-DD HH:MM:SS` (the upstream notification format) or
	/// RFC 3339.
	pub fn parsed_date(&self) -> Result<DateTime<Utc>, String> {
		let raw = self.transaction_date.trim();
		if let Ok(naive) =
			NaiveDateTime::parse_from_str(raw, TRANSACTION_DATE_FORMAT)
		{
			return Ok(naive.and_utc());
		}
		DateTime::parse_from_rfc3339(raw)
			.map(|date| date.with_timezone(&Utc))
			.map_err(|_| format!("invalid transaction_date: {raw:?}"))
	}
}
