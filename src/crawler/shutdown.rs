//! Cooperative shutdown signalling
//!
//! A [`ShutdownTrigger`] is held by whoever listens for termination (the binary
//! wires it to Ctrl-C); every worker holds a cloned [`ShutdownSignal`].

use tokio::sync::watch;

/// Sending half: flips the signal once
#[derive(Debug)]
pub struct ShutdownTrigger(watch::Sender<bool>);

impl ShutdownTrigger {
    /// Requests shutdown; later calls are no-ops
    pub fn trigger(&self) {
        let _ = self.0.send(true);
    }
}

/// Receiving half, cheap to clone
#[derive(Debug, Clone)]
pub struct ShutdownSignal(watch::Receiver<bool>);

impl ShutdownSignal {
    /// Creates a connected trigger/signal pair
    pub fn channel() -> (ShutdownTrigger, ShutdownSignal) {
        let (tx, rx) = watch::channel(false);
        (ShutdownTrigger(tx), ShutdownSignal(rx))
    }

    /// A signal that never fires
    pub fn never() -> Self {
        let (_, signal) = Self::channel();
        signal
    }

    /// Returns true once shutdown was requested
    pub fn is_triggered(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves when shutdown is requested
    ///
    /// If the trigger is dropped without firing, this never resolves.
    pub async fn triggered(&mut self) {
        loop {
            if *self.0.borrow_and_update() {
                return;
            }
            if self.0.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}
