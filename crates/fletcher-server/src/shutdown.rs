//! Shutdown signal handling.
//!
//! [`ShutdownSignal`] coordinates stopping the accept loop and open
//! connections. It can be cloned and shared; all clones observe the
//! trigger.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// A signal that can be used to trigger and await server shutdown.
///
/// # Example
///
/// ```
/// use fletcher_server::ShutdownSignal;
///
/// let shutdown = ShutdownSignal::new();
/// let observer = shutdown.clone();
/// shutdown.trigger();
/// assert!(observer.is_shutdown());
/// ```
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    triggered: Arc<AtomicBool>,
    sender: broadcast::Sender<()>,
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Creates a new, untriggered signal.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            triggered: Arc::new(AtomicBool::new(false)),
            sender,
        }
    }

    /// Triggers shutdown. Idempotent.
    pub fn trigger(&self) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            let _ = self.sender.send(());
        }
    }

    /// Whether shutdown has been triggered.
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Resolves once shutdown is triggered. Returns immediately if it
    /// already was.
    pub async fn recv(&self) {
        let mut receiver = self.sender.subscribe();
        // Re-check after subscribing: a trigger that landed before the
        // subscription would otherwise never reach this receiver.
        if self.is_shutdown() {
            return;
        }
        let _ = receiver.recv().await;
    }
}
