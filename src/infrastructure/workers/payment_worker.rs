use std::time::Duration;

use log::{error, info};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::domain::cache::DedupCache;
use crate::domain::queue::WorkQueue;
use crate::domain::store::AccountStore;
use crate::use_cases::apply_payment::{ApplyOutcome, ApplyPaymentUseCase};

/// Blocking dequeue timeout; bounds how quickly a worker observes the stop
/// signal.
const DEQUEUE_TIMEOUT: Duration = Duration::from_secs(1);
/// Pause after a queue transport error before polling again.
const QUEUE_ERROR_BACKOFF: Duration = Duration::from_millis(10);

pub async fn payment_worker<Q, S, C>(
	worker_id: usize,
	queue: Q,
	apply_payment: ApplyPaymentUseCase<S, C>,
	stop: watch::Receiver<bool>,
) where
	Q: WorkQueue + Clone,
	S: AccountStore + Clone,
	C: DedupCache + Clone,
{
	info!("Worker {worker_id} started");

	while !*stop.borrow() {
		let payload = match queue.dequeue(DEQUEUE_TIMEOUT).await {
			Ok(Some(payload)) => payload,
			Ok(None) => continue,
			Err(e) => {
				error!("Worker {worker_id} failed to pop from queue: {e}");
				sleep(QUEUE_ERROR_BACKOFF).await;
				continue;
			}
		};

		let reference = payload.transaction_reference.clone();
		match apply_payment.execute(&payload).await {
			Ok(ApplyOutcome::Applied { new_balance }) => {
				info!(
					"Processed payment: {} - Reference: {reference} - \
					 Balance: {new_balance:.2}",
					payload.customer_id
				);
			}
			Ok(ApplyOutcome::AlreadyProcessed) => {
				info!("Transaction already processed: {reference}");
			}
			Err(e) => {
				error!(
					"Worker {worker_id} failed to process {reference}: {e}"
				);
			}
		}
	}

	info!("Worker {worker_id} stopped");
}

/// Fixed-size pool of payment workers sharing one queue handle, coordinated
/// by a broadcast stop signal and joined on shutdown.
pub struct WorkerPool {
	stop_tx: watch::Sender<bool>,
	handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
	pub fn spawn<Q, S, C>(
		count: usize,
		queue: Q,
		apply_payment: ApplyPaymentUseCase<S, C>,
	) -> Self
	where
		Q: WorkQueue + Clone,
		S: AccountStore + Clone,
		C: DedupCache + Clone,
	{
		let (stop_tx, stop_rx) = watch::channel(false);

		let handles = (0..count)
			.map(|worker_id| {
				tokio::spawn(payment_worker(
					worker_id,
					queue.clone(),
					apply_payment.clone(),
					stop_rx.clone(),
				))
			})
			.collect();

		info!("Started {count} payment workers");
		Self { stop_tx, handles }
	}

	pub fn worker_count(&self) -> usize {
		self.handles.len()
	}

	/// Signals every worker to stop and waits for in-flight items to finish.
	pub async fn shutdown(self) {
		info!("Stopping payment workers...");
		let _ = self.stop_tx.send(true);

		for handle in self.handles {
			if let Err(e) = handle.await {
				error!("Worker task failed to join: {e}");
			}
		}
		info!("All workers stopped");
	}
}
