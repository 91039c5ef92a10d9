/// Counters maintained under the channel lock when metrics are enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Elements accepted by `insert`.
    pub accepted: u64,
    /// Elements rejected by the ordering rule.
    pub rejected: u64,
    /// Elements handed out by `get`, `try_get` or `get_timeout`.
    pub received: u64,
    /// Times the producer blocked on a full buffer.
    pub producer_waits: u64,
    /// Times the consumer blocked on an empty buffer.
    pub consumer_waits: u64,
}

impl MetricsSnapshot {
    /// Creates a snapshot with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements accepted but not yet received.
    #[inline]
    pub fn in_flight(&self) -> u64 {
        self.accepted.saturating_sub(self.received)
    }
}
