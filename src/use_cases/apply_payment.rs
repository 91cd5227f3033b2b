use std::time::Duration;

use log::warn;
use thiserror::Error;
use tokio::time::sleep;

use crate::domain::cache::DedupCache;
use crate::domain::payment::PaymentPayload;
use crate::domain::store::{AccountStore, BalanceUpdate, StoreError};

/// Attempts of the optimistic update loop before giving up on an item.
const MAX_UPDATE_ATTEMPTS: u32 = 3;
/// Base backoff after a version conflict; grows linearly with the attempt.
const CONFLICT_BACKOFF: Duration = Duration::from_millis(10);

const DEDUP_MARK_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const BALANCE_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Error)]
pub enum ApplyError {
	#[error("permanent payload error: {0}")]
	InvalidPayload(String),
	#[error(transparent)]
	Store(#[from] StoreError),
	#[error("version conflict persisted after {attempts} attempts for {customer_id}")]
	RetriesExhausted { customer_id: String, attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApplyOutcome {
	Applied { new_balance: f64 },
	AlreadyProcessed,
}

/// Applies a dequeued payment to the authoritative store: ledger dedup,
/// versioned balance update with bounded retry, then cache maintenance.
#[derive(Clone)]
pub struct ApplyPaymentUseCase<S, C>
where
	S: AccountStore,
	C: DedupCache,
{
	store: S,
	cache: C,
}

impl<S, C> ApplyPaymentUseCase<S, C>
where
	S: AccountStore,
	C: DedupCache,
{
	pub fn new(store: S, cache: C) -> Self {
		Self { store, cache }
	}

	pub async fn execute(
		&self,
		payload: &PaymentPayload,
	) -> Result<ApplyOutcome, ApplyError> {
		// Authoritative dedup; the normal completion path for replays.
		if self
			.store
			.is_transaction_processed(&payload.transaction_reference)
			.await?
		{
			return Ok(ApplyOutcome::AlreadyProcessed);
		}

		let amount =
			payload.parsed_amount().map_err(ApplyError::InvalidPayload)?;
		let txn_date =
			payload.parsed_date().map_err(ApplyError::InvalidPayload)?;

		for attempt in 0..MAX_UPDATE_ATTEMPTS {
			let customer =
				self.store.get_customer(&payload.customer_id).await?;

			let update = self
				.store
				.update_balance(
					&payload.customer_id,
					amount,
					txn_date,
					customer.version,
				)
				.await?;

			match update {
				BalanceUpdate::Applied { new_balance } => {
					// The authoritative commit already happened; everything
					// below is logged on failure but never fails the item.
					if let Err(e) = self
						.store
						.mark_transaction_processed(
							&payload.transaction_reference,
							&payload.customer_id,
							amount,
						)
						.await
					{
						warn!(
							"Failed to record ledger entry for {}: {e}",
							payload.transaction_reference
						);
					}

					if let Err(e) = self
						.cache
						.mark_duplicate(
							&payload.transaction_reference,
							DEDUP_MARK_TTL,
						)
						.await
					{
						warn!(
							"Failed to cache duplicate mark for {}: {e}",
							payload.transaction_reference
						);
					}

					if let Err(e) = self
						.cache
						.cache_balance(
							&payload.customer_id,
							new_balance,
							BALANCE_CACHE_TTL,
						)
						.await
					{
						warn!(
							"Failed to cache balance for {}: {e}",
							payload.customer_id
						);
					}

					return Ok(ApplyOutcome::Applied { new_balance });
				}
				BalanceUpdate::VersionMismatch => {
					warn!(
						"Version conflict for {}, retry {}",
						payload.customer_id,
						attempt + 1
					);
					sleep(CONFLICT_BACKOFF * (attempt + 1)).await;
				}
			}
		}

		Err(ApplyError::RetriesExhausted {
			customer_id: payload.customer_id.clone(),
			attempts:    MAX_UPDATE_ATTEMPTS,
		})
	}
}
