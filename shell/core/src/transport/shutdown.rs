//! Shutdown Signal
//!
//! One-shot, level-triggered shutdown signal between the local track and the
//! accept loop, built on `tokio::sync::watch`. Because the value is sticky,
//! a listener that checks late still sees it; there is no window where the
//! signal fires between "check" and "wait" and gets lost.

use tokio::sync::watch;

/// Create a connected trigger/listener pair
#[must_use]
pub fn shutdown_channel() -> (ShutdownTrigger, ShutdownListener) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, ShutdownListener { rx })
}

/// Firing side of the shutdown signal
///
/// Dropping the trigger without firing it also wakes listeners, so a local
/// task that panics still releases the accept loop.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger {
    /// Fire the signal
    ///
    /// Returns `true` the first time, `false` if it had already fired.
    pub fn trigger(&self) -> bool {
        self.tx.send_if_modified(|stopped| {
            if *stopped {
                false
            } else {
                *stopped = true;
                true
            }
        })
    }

    /// Whether the signal has fired
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Waiting side of the shutdown signal
#[derive(Clone, Debug)]
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl ShutdownListener {
    /// Whether shutdown has been requested (or the trigger is gone)
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Wait until shutdown is requested
    ///
    /// Returns immediately if it already was. Cancel-safe.
    pub async fn wait(&mut self) {
        // Err means the trigger was dropped, which counts as shutdown.
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}
