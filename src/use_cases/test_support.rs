//! In-memory fakes for the store, queue and cache seams, used by the
//! use-case and worker unit tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::cache::{CacheError, DedupCache};
use crate::domain::customer::CustomerAccount;
use crate::domain::payment::{PaymentPayload, PaymentStatus};
use crate::domain::queue::{QueueError, WorkQueue};
use crate::domain::store::{AccountStore, BalanceUpdate, StoreError};

pub fn payload(
	customer_id: &str,
	amount: &str,
	reference: &str,
) -> PaymentPayload {
	PaymentPayload {
		customer_id:           customer_id.to_string(),
		payment_status:        PaymentStatus::Complete,
		transaction_amount:    amount.to_string(),
		transaction_date:      "2025-11-07 14:54:16".to_string(),
		transaction_reference: reference.to_string(),
	}
}

pub fn account(customer_id: &str, asset_value: f64) -> CustomerAccount {
	let now = Utc::now();
	CustomerAccount {
		customer_id: customer_id.to_string(),
		asset_value,
		term_weeks: 50,
		total_paid: 0.0,
		outstanding_balance: asset_value,
		deployment_date: now,
		last_payment_date: None,
		payment_count: 0,
		version: 0,
		created_at: now,
		updated_at: now,
	}
}

#[derive(Clone, Default)]
pub struct FakeAccountStore {
	inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
	customers:         Mutex<HashMap<String, CustomerAccount>>,
	ledger:            Mutex<HashSet<String>>,
	forced_conflicts:  AtomicU32,
	fail_storage:      AtomicBool,
	fail_ledger_write: AtomicBool,
}

impl FakeAccountStore {
	pub fn with_account(account: CustomerAccount) -> Self {
		let store = Self::default();
		store
			.inner
			.customers
			.lock()
			.unwrap()
			.insert(account.customer_id.clone(), account);
		store
	}

	pub fn customer(&self, customer_id: &str) -> Option<CustomerAccount> {
		self.inner
			.customers
			.lock()
			.unwrap()
			.get(customer_id)
			.cloned()
	}

	pub fn ledger_contains(&self, reference: &str) -> bool {
		self.inner.ledger.lock().unwrap().contains(reference)
	}

	pub fn record_processed(&self, reference: &str) {
		self.inner
			.ledger
			.lock()
			.unwrap()
			.insert(reference.to_string());
	}

	/// The next `count` balance updates report a version mismatch.
	pub fn force_conflicts(&self, count: u32) {
		self.inner.forced_conflicts.store(count, Ordering::SeqCst);
	}

	pub fn remaining_forced_conflicts(&self) -> u32 {
		self.inner.forced_conflicts.load(Ordering::SeqCst)
	}

	pub fn fail_storage(&self) {
		self.inner.fail_storage.store(true, Ordering::SeqCst);
	}

	pub fn fail_ledger_writes(&self) {
		self.inner.fail_ledger_write.store(true, Ordering::SeqCst);
	}

	fn check_storage(&self) -> Result<(), StoreError> {
		if self.inner.fail_storage.load(Ordering::SeqCst) {
			return Err(StoreError::Storage(
				"injected storage failure".to_string(),
			));
		}
		Ok(())
	}
}

#[async_trait]
impl AccountStore for FakeAccountStore {
	async fn get_customer(
		&self,
		customer_id: &str,
	) -> Result<CustomerAccount, StoreError> {
		self.check_storage()?;
		self.customer(customer_id).ok_or(StoreError::NotFound)
	}

	async fn update_balance(
		&self,
		customer_id: &str,
		amount: f64,
		txn_date: DateTime<Utc>,
		expected_version: i32,
	) -> Result<BalanceUpdate, StoreError> {
		self.check_storage()?;

		let remaining = self.inner.forced_conflicts.load(Ordering::SeqCst);
		if remaining > 0 {
			self.inner
				.forced_conflicts
				.store(remaining - 1, Ordering::SeqCst);
			return Ok(BalanceUpdate::VersionMismatch);
		}

		let mut customers = self.inner.customers.lock().unwrap();
		let Some(customer) = customers.get_mut(customer_id) else {
			return Ok(BalanceUpdate::VersionMismatch);
		};
		if customer.version != expected_version {
			return Ok(BalanceUpdate::VersionMismatch);
		}

		customer.total_paid += amount;
		customer.outstanding_balance =
			(customer.asset_value - customer.total_paid).max(0.0);
		customer.last_payment_date = Some(txn_date);
		customer.payment_count += 1;
		customer.version += 1;
		customer.updated_at = Utc::now();

		Ok(BalanceUpdate::Applied {
			new_balance: customer.outstanding_balance,
		})
	}

	async fn is_transaction_processed(
		&self,
		reference: &str,
	) -> Result<bool, StoreError> {
		self.check_storage()?;
		Ok(self.ledger_contains(reference))
	}

	async fn mark_transaction_processed(
		&self,
		reference: &str,
		_customer_id: &str,
		_amount: f64,
	) -> Result<(), StoreError> {
		if self.inner.fail_ledger_write.load(Ordering::SeqCst) {
			return Err(StoreError::Storage(
				"injected ledger failure".to_string(),
			));
		}
		self.record_processed(reference);
		Ok(())
	}
}

#[derive(Clone, Default)]
pub struct FakeWorkQueue {
	inner: Arc<QueueInner>,
}

#[derive(Default)]
struct QueueInner {
	items: Mutex<VecDeque<PaymentPayload>>,
	fail:  AtomicBool,
}

impl FakeWorkQueue {
	pub fn fail(&self) {
		self.inner.fail.store(true, Ordering::SeqCst);
	}

	pub fn len(&self) -> usize {
		self.inner.items.lock().unwrap().len()
	}

	fn pop(&self) -> Option<PaymentPayload> {
		self.inner.items.lock().unwrap().pop_front()
	}
}

#[async_trait]
impl WorkQueue for FakeWorkQueue {
	async fn enqueue(&self, payload: &PaymentPayload) -> Result<(), QueueError> {
		if self.inner.fail.load(Ordering::SeqCst) {
			return Err(QueueError::Transport(
				"injected queue failure".to_string(),
			));
		}
		self.inner
			.items
			.lock()
			.unwrap()
			.push_back(payload.clone());
		Ok(())
	}

	async fn dequeue(
		&self,
		timeout: Duration,
	) -> Result<Option<PaymentPayload>, QueueError> {
		if self.inner.fail.load(Ordering::SeqCst) {
			return Err(QueueError::Transport(
				"injected queue failure".to_string(),
			));
		}
		if let Some(payload) = self.pop() {
			return Ok(Some(payload));
		}
		// Mimic a blocking pop so worker loops yield on an empty queue.
		tokio::time::sleep(timeout).await;
		Ok(self.pop())
	}
}

#[derive(Clone, Default)]
pub struct FakeDedupCache {
	inner: Arc<CacheInner>,
}

#[derive(Default)]
struct CacheInner {
	marks:    Mutex<HashSet<String>>,
	balances: Mutex<HashMap<String, f64>>,
	fail:     AtomicBool,
}

impl FakeDedupCache {
	pub fn fail(&self) {
		self.inner.fail.store(true, Ordering::SeqCst);
	}

	pub fn mark(&self, reference: &str) {
		self.inner
			.marks
			.lock()
			.unwrap()
			.insert(reference.to_string());
	}

	pub fn has_mark(&self, reference: &str) -> bool {
		self.inner.marks.lock().unwrap().contains(reference)
	}

	pub fn set_balance(&self, customer_id: &str, balance: f64) {
		self.inner
			.balances
			.lock()
			.unwrap()
			.insert(customer_id.to_string(), balance);
	}

	pub fn balance(&self, customer_id: &str) -> Option<f64> {
		self.inner.balances.lock().unwrap().get(customer_id).copied()
	}

	fn check(&self) -> Result<(), CacheError> {
		if self.inner.fail.load(Ordering::SeqCst) {
			return Err(CacheError("injected cache failure".to_string()));
		}
		Ok(())
	}
}

#[async_trait]
impl DedupCache for FakeDedupCache {
	async fn is_duplicate(&self, reference: &str) -> Result<bool, CacheError> {
		self.check()?;
		Ok(self.has_mark(reference))
	}

	async fn mark_duplicate(
		&self,
		reference: &str,
		_ttl: Duration,
	) -> Result<(), CacheError> {
		self.check()?;
		self.mark(reference);
		Ok(())
	}

	async fn get_cached_balance(
		&self,
		customer_id: &str,
	) -> Result<Option<f64>, CacheError> {
		self.check()?;
		Ok(self.balance(customer_id))
	}

	async fn cache_balance(
		&self,
		customer_id: &str,
		balance: f64,
		_ttl: Duration,
	) -> Result<(), CacheError> {
		self.check()?;
		self.set_balance(customer_id, balance);
		Ok(())
	}
}
