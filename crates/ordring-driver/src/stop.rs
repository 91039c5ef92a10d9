//! Stop signalling between the driver's caller and its loops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable flag checked by the producer and consumer loops between
/// channel operations.
///
/// Setting it is idempotent; the loops finish their current operation and
/// exit.
#[derive(Debug, Clone, Default)]
pub struct StopFlag {
    stopped: Arc<AtomicBool>,
}

impl StopFlag {
    /// Creates a flag that is not yet stopped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the loops to stop.
    pub fn stop(&self) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            tracing::debug!("stop requested");
        }
    }

    /// Returns `true` once [`stop`](Self::stop) has been called.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}
