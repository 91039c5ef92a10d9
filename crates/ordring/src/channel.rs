use crate::invariants::debug_assert_admitted;
use crate::ring::RingState;
use crate::sync::{Arc, Condvar, Mutex, MutexGuard};
use crate::{ChannelError, Comparator, Config, MetricsSnapshot, NaturalOrder, Rejected};
use std::sync::PoisonError;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

// =============================================================================
// LOCKING PROTOCOL
// =============================================================================
//
// One mutex guards the ring (storage, head, tail, full flag) and the metrics.
// Two condition variables hang off it:
// - `space_available`: producer waits here while the ring is full,
//   notified by every successful get.
// - `data_available`: consumer waits here while the ring is empty,
//   notified by every insert call (accepted or rejected).
//
// Every wait sits in a loop that re-checks its predicate after waking, so
// spurious wakeups and coalesced notifications are harmless.
//
// **Insert** never touches a slot before capacity is confirmed:
// 1. Check the ordering rule against the last inserted element
// 2. While full: wait on `space_available`, then go back to 1
// 3. Write into `head`, advance `head`
//
// The ordering check is repeated after each wait because the consumer may
// have drained the ring in the meantime, and an empty ring admits anything.
//
// A comparator that panics poisons the mutex. The ring is only mutated after
// the comparator returns, so the state behind a poisoned lock is still
// consistent and the guard is recovered with `PoisonError::into_inner`.
// =============================================================================

struct State<T> {
    ring: RingState<T>,
    metrics: MetricsSnapshot,
}

struct Shared<T, C> {
    state: Mutex<State<T>>,
    space_available: Condvar,
    data_available: Condvar,
    comparator: C,
    capacity: usize,
    enable_metrics: bool,
}

impl<T, C: Comparator<T>> Shared<T, C> {
    #[inline]
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert(&self, item: T) -> Result<(), Rejected<T>> {
        let mut state = self.lock();

        let admitted = loop {
            if let Some(last) = state.ring.last() {
                if !self.comparator.admits(last, &item) {
                    break false;
                }
            }
            if !state.ring.is_full() {
                break true;
            }

            debug!(capacity = self.capacity, "ring full, producer waiting for space");
            if self.enable_metrics {
                state.metrics.producer_waits += 1;
            }
            state = self
                .space_available
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        };

        let result = if admitted {
            debug_assert_admitted!(self.comparator, state.ring.last(), &item);
            state.ring.push(item);
            if self.enable_metrics {
                state.metrics.accepted += 1;
            }
            trace!(len = state.ring.len(), "element accepted");
            Ok(())
        } else {
            if self.enable_metrics {
                state.metrics.rejected += 1;
            }
            trace!("element rejected: not greater than the last inserted element");
            Err(Rejected(item))
        };

        self.data_available.notify_one();
        result
    }

    /// Pops under an already held lock, waking the producer on success.
    fn take(&self, state: &mut State<T>) -> Option<T> {
        let item = state.ring.pop()?;
        if self.enable_metrics {
            state.metrics.received += 1;
        }
        trace!(len = state.ring.len(), "element taken");
        self.space_available.notify_one();
        Some(item)
    }

    fn get(&self) -> T {
        let mut state = self.lock();
        loop {
            if let Some(item) = self.take(&mut state) {
                return item;
            }

            debug!("ring empty, consumer waiting for data");
            if self.enable_metrics {
                state.metrics.consumer_waits += 1;
            }
            state = self
                .data_available
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn try_get(&self) -> Option<T> {
        let mut state = self.lock();
        self.take(&mut state)
    }

    fn get_timeout(&self, timeout: Duration) -> Option<T> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Some(self.get());
        };
        let mut state = self.lock();
        loop {
            if let Some(item) = self.take(&mut state) {
                return Some(item);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }

            if self.enable_metrics {
                state.metrics.consumer_waits += 1;
            }
            let (guard, _timed_out) = self
                .data_available
                .wait_timeout(state, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
        }
    }
}

impl<T, C> Drop for Shared<T, C> {
    fn drop(&mut self) {
        debug!(capacity = self.capacity, "ordered channel destroyed");
    }
}

/// Bounded single-producer single-consumer channel that keeps its contents in
/// increasing order.
///
/// An element is accepted only if it is strictly greater (under the channel's
/// [`Comparator`]) than the most recently inserted element still in the
/// buffer; an empty buffer accepts anything. `insert` blocks while the buffer
/// is full and `get` blocks while it is empty.
///
/// Cloning the channel shares the same buffer. Exactly one thread should
/// insert and one thread should get; [`split`](Self::split) enforces that with
/// handles that cannot be cloned.
pub struct OrderedChannel<T, C = NaturalOrder> {
    inner: Arc<Shared<T, C>>,
}

impl<T: Ord> OrderedChannel<T, NaturalOrder> {
    /// Creates a channel ordered by `T`'s own [`Ord`].
    pub fn with_natural_order(config: Config) -> Result<Self, ChannelError> {
        Self::new(config, NaturalOrder)
    }
}

impl<T, C: Comparator<T>> OrderedChannel<T, C> {
    /// Creates a new channel with the given configuration and comparator.
    ///
    /// Fails if the capacity is zero or storage cannot be allocated.
    pub fn new(config: Config, comparator: C) -> Result<Self, ChannelError> {
        let ring = RingState::with_capacity(config.capacity())?;
        debug!(
            capacity = config.capacity(),
            element_size = std::mem::size_of::<T>(),
            metrics = config.enable_metrics,
            "ordered channel created"
        );

        Ok(Self {
            inner: Arc::new(Shared {
                state: Mutex::new(State {
                    ring,
                    metrics: MetricsSnapshot::new(),
                }),
                space_available: Condvar::new(),
                data_available: Condvar::new(),
                comparator,
                capacity: config.capacity(),
                enable_metrics: config.enable_metrics,
            }),
        })
    }

    /// Appends `item` if it is greater than the last inserted element.
    ///
    /// Blocks while the buffer is full. A rejected element is handed back in
    /// [`Rejected`] without any change to the buffer.
    #[inline]
    pub fn insert(&self, item: T) -> Result<(), Rejected<T>> {
        self.inner.insert(item)
    }

    /// Removes and returns the oldest element, blocking while the buffer is empty.
    ///
    /// Never returns if no element is ever inserted again.
    #[inline]
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Removes and returns the oldest element, or `None` right away if empty.
    #[inline]
    pub fn try_get(&self) -> Option<T> {
        self.inner.try_get()
    }

    /// Like [`get`](Self::get), but gives up with `None` after `timeout`.
    #[inline]
    pub fn get_timeout(&self, timeout: Duration) -> Option<T> {
        self.inner.get_timeout(timeout)
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Returns the current number of elements.
    pub fn len(&self) -> usize {
        self.inner.lock().ring.len()
    }

    /// Returns true if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().ring.is_empty()
    }

    /// Returns true if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.inner.lock().ring.is_full()
    }

    /// Returns a copy of the most recently inserted element still buffered.
    pub fn last(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.lock().ring.last().cloned()
    }

    /// Returns a snapshot of the counters. All zero unless metrics are enabled.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.inner.lock().metrics
    }

    /// Splits the channel into its producer and consumer halves.
    pub fn split(self) -> (Producer<T, C>, Consumer<T, C>) {
        let producer = Producer {
            inner: Arc::clone(&self.inner),
        };
        let consumer = Consumer { inner: self.inner };
        (producer, consumer)
    }
}

impl<T, C> Clone for OrderedChannel<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Producer half of an [`OrderedChannel`].
pub struct Producer<T, C = NaturalOrder> {
    inner: Arc<Shared<T, C>>,
}

impl<T, C: Comparator<T>> Producer<T, C> {
    /// See [`OrderedChannel::insert`].
    #[inline]
    pub fn insert(&self, item: T) -> Result<(), Rejected<T>> {
        self.inner.insert(item)
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }
}

/// Consumer half of an [`OrderedChannel`].
pub struct Consumer<T, C = NaturalOrder> {
    inner: Arc<Shared<T, C>>,
}

impl<T, C: Comparator<T>> Consumer<T, C> {
    /// See [`OrderedChannel::get`].
    #[inline]
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// See [`OrderedChannel::try_get`].
    #[inline]
    pub fn try_get(&self) -> Option<T> {
        self.inner.try_get()
    }

    /// See [`OrderedChannel::get_timeout`].
    #[inline]
    pub fn get_timeout(&self, timeout: Duration) -> Option<T> {
        self.inner.get_timeout(timeout)
    }

    /// Returns a snapshot of the channel counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.inner.lock().metrics
    }
}

// Note: Producer and Consumer intentionally do NOT implement Clone.
// One of each keeps the channel single-producer single-consumer.
