use log::warn;
use thiserror::Error;

use crate::domain::cache::DedupCache;
use crate::domain::payment::{PaymentPayload, PaymentStatus};
use crate::domain::queue::{QueueError, WorkQueue};
use crate::domain::store::{AccountStore, StoreError};
use crate::use_cases::dto::PaymentAck;

#[derive(Debug, Error)]
pub enum SubmitError {
	#[error("{0}")]
	InvalidPayload(String),
	#[error("Only COMPLETE payments accepted. Received: {0}")]
	UnsupportedStatus(PaymentStatus),
	#[error("customer not found: {0}")]
	UnknownCustomer(String),
	#[error(transparent)]
	Queue(QueueError),
	#[error(transparent)]
	Store(StoreError),
}

/// Admission control for incoming payments: validate, duplicate-check,
/// verify the customer exists, enqueue, acknowledge.
#[derive(Clone)]
pub struct SubmitPaymentUseCase<S, Q, C>
where
	S: AccountStore,
	Q: WorkQueue,
	C: DedupCache,
{
	store: S,
	queue: Q,
	cache: C,
}

impl<S, Q, C> SubmitPaymentUseCase<S, Q, C>
where
	S: AccountStore,
	Q: WorkQueue,
	C: DedupCache,
{
	pub fn new(store: S, queue: Q, cache: C) -> Self {
		Self {
			store,
			queue,
			cache,
		}
	}

	pub async fn execute(
		&self,
		payload: PaymentPayload,
	) -> Result<PaymentAck, SubmitError> {
		payload.validate().map_err(SubmitError::InvalidPayload)?;

		if payload.payment_status != PaymentStatus::Complete {
			return Err(SubmitError::UnsupportedStatus(payload.payment_status));
		}

		// Advisory check only; an error here must not block admission.
		let is_duplicate = match self
			.cache
			.is_duplicate(&payload.transaction_reference)
			.await
		{
			Ok(is_duplicate) => is_duplicate,
			Err(e) => {
				warn!(
					"Duplicate check failed for {}: {e}",
					payload.transaction_reference
				);
				false
			}
		};

		if is_duplicate {
			let remaining_balance =
				match self.store.get_customer(&payload.customer_id).await {
					Ok(customer) => Some(customer.outstanding_balance),
					Err(_) => None,
				};
			return Ok(PaymentAck {
				status:                "duplicate".to_string(),
				message:               "Transaction already processed"
					.to_string(),
				transaction_reference: payload.transaction_reference,
				customer_id:           payload.customer_id,
				remaining_balance,
			});
		}

		let customer = match self.store.get_customer(&payload.customer_id).await
		{
			Ok(customer) => customer,
			Err(StoreError::NotFound) => {
				return Err(SubmitError::UnknownCustomer(payload.customer_id));
			}
			Err(e) => return Err(SubmitError::Store(e)),
		};

		self.queue
			.enqueue(&payload)
			.await
			.map_err(SubmitError::Queue)?;

		let remaining_balance = match self
			.cache
			.get_cached_balance(&payload.customer_id)
			.await
		{
			Ok(Some(balance)) => balance,
			Ok(None) => customer.outstanding_balance,
			Err(e) => {
				warn!(
					"Balance cache read failed for {}: {e}",
					payload.customer_id
				);
				customer.outstanding_balance
			}
		};

		Ok(PaymentAck {
			status:                "accepted".to_string(),
			message:               "Payment accepted for processing".to_string(),
			transaction_reference: payload.transaction_reference,
			customer_id:           payload.customer_id,
			remaining_balance:     Some(remaining_balance),
		})
	}
}
