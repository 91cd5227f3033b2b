use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::customer::CustomerAccount;

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("customer not found")]
	NotFound,
	#[error("storage error: {0}")]
	Storage(String),
}

/// Outcome of the versioned balance update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceUpdate {
	Applied { new_balance: f64 },
	VersionMismatch,
}

#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
	async fn get_customer(
		&self,
		customer_id: &str,
	) -> Result<CustomerAccount, StoreError>;

	/// Applies `total_paid += amount`, recomputes the outstanding balance,
	/// stamps the payment date and bumps `payment_count` and `version`, all
	/// in one atomic statement conditional on the current row version
	/// equalling `expected_version`.
	async fn update_balance(
		&self,
		customer_id: &str,
		amount: f64,
		txn_date: DateTime<Utc>,
		expected_version: i32,
	) -> Result<BalanceUpdate, StoreError>;

	async fn is_transaction_processed(
		&self,
		reference: &str,
	) -> Result<bool, StoreError>;

	/// Records the payment in the processed-transactions ledger. A duplicate
	/// reference is absorbed, not an error; the uniqueness constraint is the
	/// final idempotency gate.
	async fn mark_transaction_processed(
		&self,
		reference: &str,
		customer_id: &str,
		amount: f64,
	) -> Result<(), StoreError>;
}
