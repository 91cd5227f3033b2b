use serde::Serialize;

/// Synchronous acknowledgement returned to the submitting client. The
/// reported balance is advisory; it may trail in-flight payments.
#[derive(Debug, Serialize, Clone)]
pub struct PaymentAck {
	pub status:                String,
	pub message:               String,
	pub transaction_reference: String,
	pub customer_id:           String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub remaining_balance:     Option<f64>,
}
