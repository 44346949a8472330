//! Bounded worker pool
//!
//! A fixed number of tokio tasks pull targets from a shared queue, run the
//! worker function on each one, and send the outcome to a single collector
//! over a channel. The collector stores outcomes by enumeration index, so the
//! returned sequence follows target order whatever the completion order.

use crate::crawler::shutdown::ShutdownSignal;
use crate::model::TargetOutcome;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Shared queue of `(index, target)` pairs
type WorkQueue<T> = Arc<Mutex<VecDeque<(usize, T)>>>;

/// Fixed-size pool of fetch workers
#[derive(Debug, Clone)]
pub struct WorkerPool {
    /// Maximum number of targets in flight
    concurrency: usize,

    /// Stops workers from picking new targets and abandons in-flight ones
    shutdown: ShutdownSignal,
}

impl WorkerPool {
    /// Creates a pool running at most `concurrency` workers (minimum 1)
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
            shutdown: ShutdownSignal::never(),
        }
    }

    /// Attaches a shutdown signal
    pub fn with_shutdown(mut self, shutdown: ShutdownSignal) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Resolves every target and returns them paired with their outcome
    ///
    /// # Guarantees
    ///
    /// - At most `concurrency` worker futures run at the same time
    /// - The result has one entry per target, in input order
    /// - A failing target never stops the others
    /// - Targets not resolved before shutdown are reported as `Cancelled`;
    ///   an abandoned in-flight target yields no partial result
    pub async fn run<T, R, F, Fut>(&self, targets: Vec<T>, worker: F) -> Vec<(T, TargetOutcome<R>)>
    where
        T: Clone + Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = TargetOutcome<R>> + Send + 'static,
    {
        let total = targets.len();
        if total == 0 {
            return Vec::new();
        }

        let queue: WorkQueue<T> = Arc::new(Mutex::new(
            targets.iter().cloned().enumerate().collect(),
        ));
        let worker = Arc::new(worker);
        let (tx, mut rx) = mpsc::unbounded_channel::<(usize, TargetOutcome<R>)>();

        let worker_count = self.concurrency.min(total);
        tracing::debug!("Starting {} workers for {} targets", worker_count, total);

        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let queue = Arc::clone(&queue);
            let worker = Arc::clone(&worker);
            let tx = tx.clone();
            let mut shutdown = self.shutdown.clone();

            handles.push(tokio::spawn(async move {
                loop {
                    if shutdown.is_triggered() {
                        break;
                    }

                    let next = pop_front(&queue);
                    let Some((index, target)) = next else {
                        break;
                    };

                    tokio::select! {
                        outcome = worker(target) => {
                            if tx.send((index, outcome)).is_err() {
                                break;
                            }
                        }
                        _ = shutdown.triggered() => {
                            tracing::debug!("Worker {} abandoned target #{}", worker_id, index);
                            break;
                        }
                    }
                }
            }));
        }
        drop(tx);

        let mut slots: Vec<Option<TargetOutcome<R>>> = (0..total).map(|_| None).collect();
        while let Some((index, outcome)) = rx.recv().await {
            slots[index] = Some(outcome);
        }

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Worker task failed: {}", e);
            }
        }

        targets
            .into_iter()
            .zip(slots)
            .map(|(target, slot)| (target, slot.unwrap_or(TargetOutcome::Cancelled)))
            .collect()
    }
}

/// Pops the next target; a poisoned lock still yields its queue
fn pop_front<T>(queue: &WorkQueue<T>) -> Option<(usize, T)> {
    let mut guard = match queue.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.pop_front()
}
