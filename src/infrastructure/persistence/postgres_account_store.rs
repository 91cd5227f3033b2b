use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};

use crate::domain::customer::CustomerAccount;
use crate::domain::store::{AccountStore, BalanceUpdate, StoreError};

const MAX_CONNECTIONS: u32 = 50;
const MIN_CONNECTIONS: u32 = 10;
const MAX_CONN_LIFETIME: Duration = Duration::from_secs(60 * 60);
const MAX_CONN_IDLE: Duration = Duration::from_secs(30 * 60);

const SELECT_CUSTOMER: &str = r#"
	SELECT customer_id, asset_value, term_weeks, total_paid,
	       outstanding_balance, deployment_date, last_payment_date,
	       payment_count, version, created_at, updated_at
	FROM customer_accounts
	WHERE customer_id = $1
"#;

/// Aggregate figures for the admin stats endpoint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StoreStats {
	pub total_customers:      i64,
	pub active_customers:     i64,
	pub completed_customers:  i64,
	pub total_deployed_value: f64,
	pub total_paid_amount:    f64,
	pub total_outstanding:    f64,
	pub avg_completion_rate:  f64,
}

#[derive(Clone)]
pub struct PgAccountStore {
	pool: PgPool,
}

impl PgAccountStore {
	pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
		let pool = PgPoolOptions::new()
			.max_connections(MAX_CONNECTIONS)
			.min_connections(MIN_CONNECTIONS)
			.max_lifetime(MAX_CONN_LIFETIME)
			.idle_timeout(MAX_CONN_IDLE)
			.connect(database_url)
			.await
			.map_err(|e| StoreError::Storage(e.to_string()))?;

		let store = Self { pool };
		store.ping().await?;
		Ok(store)
	}

	pub async fn ping(&self) -> Result<(), StoreError> {
		sqlx::query("SELECT 1")
			.execute(&self.pool)
			.await
			.map_err(|e| StoreError::Storage(e.to_string()))?;
		Ok(())
	}

	pub async fn close(&self) {
		self.pool.close().await;
	}

	/// Seeds `GIGnnnnn` accounts. Admin-only; existing ids are left alone.
	pub async fn seed_customers(&self, count: i64) -> Result<u64, StoreError> {
		let result = sqlx::query(
			r#"
			INSERT INTO customer_accounts (
				customer_id,
				asset_value,
				term_weeks,
				outstanding_balance,
				deployment_date
			)
			SELECT
				'GIG' || LPAD(gs::TEXT, 5, '0'),
				1000000.00,
				50,
				1000000.00,
				NOW() - (random() * INTERVAL '180 days')
			FROM generate_series(1, $1) AS gs
			ON CONFLICT (customer_id) DO NOTHING
			"#,
		)
		.bind(count)
		.execute(&self.pool)
		.await
		.map_err(|e| StoreError::Storage(e.to_string()))?;

		Ok(result.rows_affected())
	}

	pub async fn customer_count(&self) -> Result<i64, StoreError> {
		sqlx::query_scalar("SELECT COUNT(*) FROM customer_accounts")
			.fetch_one(&self.pool)
			.await
			.map_err(|e| StoreError::Storage(e.to_string()))
	}

	pub async fn list_customers(
		&self,
		limit: i64,
		offset: i64,
	) -> Result<Vec<CustomerAccount>, StoreError> {
		sqlx::query_as::<_, CustomerAccount>(
			r#"
			SELECT customer_id, asset_value, term_weeks, total_paid,
			       outstanding_balance, deployment_date, last_payment_date,
			       payment_count, version, created_at, updated_at
			FROM customer_accounts
			ORDER BY customer_id
			LIMIT $1 OFFSET $2
			"#,
		)
		.bind(limit)
		.bind(offset)
		.fetch_all(&self.pool)
		.await
		.map_err(|e| StoreError::Storage(e.to_string()))
	}

	pub async fn stats(&self) -> Result<StoreStats, StoreError> {
		sqlx::query_as::<_, StoreStats>(
			r#"
			SELECT
				COUNT(*)::BIGINT AS total_customers,
				(COUNT(*) FILTER (WHERE total_paid > 0))::BIGINT
					AS active_customers,
				(COUNT(*) FILTER (WHERE outstanding_balance = 0))::BIGINT
					AS completed_customers,
				COALESCE(SUM(asset_value), 0)::DOUBLE PRECISION
					AS total_deployed_value,
				COALESCE(SUM(total_paid), 0)::DOUBLE PRECISION
					AS total_paid_amount,
				COALESCE(SUM(outstanding_balance), 0)::DOUBLE PRECISION
					AS total_outstanding,
				COALESCE(AVG(total_paid / NULLIF(asset_value, 0) * 100), 0)
					::DOUBLE PRECISION AS avg_completion_rate
			FROM customer_accounts
			"#,
		)
		.fetch_one(&self.pool)
		.await
		.map_err(|e| StoreError::Storage(e.to_string()))
	}
}

#[async_trait]
impl AccountStore for PgAccountStore {
	async fn get_customer(
		&self,
		customer_id: &str,
	) -> Result<CustomerAccount, StoreError> {
		sqlx::query_as::<_, CustomerAccount>(SELECT_CUSTOMER)
			.bind(customer_id)
			.fetch_optional(&self.pool)
			.await
			.map_err(|e| StoreError::Storage(e.to_string()))?
			.ok_or(StoreError::NotFound)
	}

	async fn update_balance(
		&self,
		customer_id: &str,
		amount: f64,
		txn_date: DateTime<Utc>,
		expected_version: i32,
	) -> Result<BalanceUpdate, StoreError> {
		// The whole read-modify-write is one statement; the version predicate
		// is the compare-and-swap.
		let row: Option<(f64,)> = sqlx::query_as(
			r#"
			UPDATE customer_accounts
			SET total_paid = total_paid + $2,
			    outstanding_balance =
			        GREATEST(0, asset_value - (total_paid + $2)),
			    last_payment_date = $3,
			    payment_count = payment_count + 1,
			    version = version + 1,
			    updated_at = NOW()
			WHERE customer_id = $1 AND version = $4
			RETURNING outstanding_balance
			"#,
		)
		.bind(customer_id)
		.bind(amount)
		.bind(txn_date)
		.bind(expected_version)
		.fetch_optional(&self.pool)
		.await
		.map_err(|e| StoreError::Storage(e.to_string()))?;

		match row {
			Some((new_balance,)) => Ok(BalanceUpdate::Applied { new_balance }),
			None => Ok(BalanceUpdate::VersionMismatch),
		}
	}

	async fn is_transaction_processed(
		&self,
		reference: &str,
	) -> Result<bool, StoreError> {
		sqlx::query_scalar(
			r#"
			SELECT EXISTS(
				SELECT 1 FROM processed_transactions
				WHERE transaction_reference = $1
			)
			"#,
		)
		.bind(reference)
		.fetch_one(&self.pool)
		.await
		.map_err(|e| StoreError::Storage(e.to_string()))
	}

	async fn mark_transaction_processed(
		&self,
		reference: &str,
		customer_id: &str,
		amount: f64,
	) -> Result<(), StoreError> {
		sqlx::query(
			r#"
			INSERT INTO processed_transactions
				(transaction_reference, customer_id, amount, processed_at)
			VALUES ($1, $2, $3, NOW())
			ON CONFLICT (transaction_reference) DO NOTHING
			"#,
		)
		.bind(reference)
		.bind(customer_id)
		.bind(amount)
		.execute(&self.pool)
		.await
		.map_err(|e| StoreError::Storage(e.to_string()))?;
		Ok(())
	}
}
