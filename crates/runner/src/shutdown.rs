//! Cooperative shutdown signal
//!
//! A [`ShutdownHandle`] flips a `watch` flag; every process holds a cloned
//! [`ShutdownSignal`] and races its round delay against it, so a pending
//! sleep ends as soon as shutdown is requested.

use tokio::sync::watch;

/// Requests shutdown of every process holding a matching signal
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Ask all processes to stop starting new rounds
    pub fn cancel(&self) {
        // send_replace succeeds even when no signal is listening
        self.tx.send_replace(true);
    }

    /// New signal bound to this handle
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }
}

/// Observes a [`ShutdownHandle`]
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Returns true once shutdown has been requested
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Completes when shutdown is requested
    ///
    /// Never completes if the handle is dropped without cancelling.
    pub async fn cancelled(&mut self) {
        let closed = self.rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

/// Create a linked handle/signal pair
pub fn channel() -> (ShutdownHandle, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx }, ShutdownSignal { rx })
}
