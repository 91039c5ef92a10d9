use crate::invariants::{
    debug_assert_bounded_len, debug_assert_index_in_bounds, debug_assert_slot_free,
    debug_assert_slot_occupied,
};
use crate::ChannelError;

// =============================================================================
// INDEXING SCHEME
// =============================================================================
//
// `head` is the next slot to write, `tail` the oldest unread slot. Both are
// wrapped indices in `0..capacity` and advance with `(i + 1) % capacity`, so
// any capacity works (no power-of-two requirement).
//
// `head == tail` is ambiguous on its own; the `full` flag breaks the tie:
// - empty ⇔ head == tail ∧ ¬full
// - full  ⇔ head == tail ∧ full
//
// Occupied slots are exactly those walked from `tail` forward up to but
// excluding `head`. Free slots hold `None`.
//
// `RingState` has no synchronization of its own; `OrderedChannel` keeps it
// behind a mutex.
// =============================================================================

/// Fixed-capacity circular storage with head/tail wraparound indices.
pub(crate) struct RingState<T> {
    /// Fixed-size storage, never grows or shrinks after construction.
    slots: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    full: bool,
}

impl<T> RingState<T> {
    /// Allocates `capacity` free slots. Allocation failure is reported, not aborted on.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, ChannelError> {
        if capacity == 0 {
            return Err(ChannelError::ZeroCapacity);
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| ChannelError::Allocation { capacity })?;
        slots.resize_with(capacity, || None);

        Ok(Self {
            slots: slots.into_boxed_slice(),
            head: 0,
            tail: 0,
            full: false,
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        !self.full && self.head == self.tail
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.full
    }

    pub(crate) fn len(&self) -> usize {
        if self.full {
            self.capacity()
        } else if self.head >= self.tail {
            self.head - self.tail
        } else {
            self.capacity() - self.tail + self.head
        }
    }

    #[inline]
    fn next(&self, idx: usize) -> usize {
        (idx + 1) % self.capacity()
    }

    /// The most recently inserted element still in the buffer, if any.
    ///
    /// Lives in `head`'s predecessor slot whenever the buffer is non-empty.
    pub(crate) fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let idx = (self.head + self.capacity() - 1) % self.capacity();
        self.slots[idx].as_ref()
    }

    /// Stores `item` at `head` and advances. The caller must have checked `!is_full()`.
    pub(crate) fn push(&mut self, item: T) {
        debug_assert!(!self.full, "push into a full ring");
        debug_assert_slot_free!(self.slots[self.head], self.head);

        self.slots[self.head] = Some(item);
        self.head = self.next(self.head);
        self.full = self.head == self.tail;

        debug_assert_index_in_bounds!("head", self.head, self.capacity());
        debug_assert_index_in_bounds!("tail", self.tail, self.capacity());
        debug_assert_bounded_len!(self.len(), self.capacity());
    }

    /// Takes the element at `tail` and advances, or `None` when empty.
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        debug_assert_slot_occupied!(self.slots[self.tail], self.tail);

        let item = self.slots[self.tail].take();
        self.full = false;
        self.tail = self.next(self.tail);

        debug_assert_index_in_bounds!("tail", self.tail, self.capacity());
        item
    }

    #[cfg(test)]
    fn indices(&self) -> (usize, usize) {
        (self.head, self.tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            RingState::<u8>::with_capacity(0),
            Err(ChannelError::ZeroCapacity)
        ));
    }

    #[test]
    fn test_huge_capacity_reports_allocation_failure() {
        let err = RingState::<u64>::with_capacity(usize::MAX).err();
        assert_eq!(err, Some(ChannelError::Allocation { capacity: usize::MAX }));
    }

    #[test]
    fn test_empty_and_full_states() {
        let mut ring = RingState::with_capacity(2).unwrap();
        assert!(ring.is_empty());
        assert!(!ring.is_full());

        ring.push(1);
        assert_eq!(ring.len(), 1);
        ring.push(2);
        assert!(ring.is_full());
        assert!(!ring.is_empty());
        assert_eq!(ring.len(), 2);
        assert_eq!(ring.indices(), (0, 0));

        assert_eq!(ring.pop(), Some(1));
        assert!(!ring.is_full());
        assert_eq!(ring.pop(), Some(2));
        assert!(ring.is_empty());
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_filling_never_evicts_oldest() {
        let mut ring = RingState::with_capacity(3).unwrap();
        for i in 1..=3 {
            ring.push(i);
        }
        // head caught up with tail; tail must not have moved
        assert_eq!(ring.indices(), (0, 0));
        assert!(ring.is_full());
        assert_eq!(ring.pop(), Some(1));
        assert_eq!(ring.pop(), Some(2));
        assert_eq!(ring.pop(), Some(3));
    }

    #[test]
    fn test_wraparound_indices() {
        let mut ring = RingState::with_capacity(3).unwrap();
        for i in 0..10 {
            ring.push(i);
            let (head, tail) = ring.indices();
            assert_eq!(head, (i + 1) % 3);
            assert_eq!(tail, i % 3);
            assert_eq!(ring.pop(), Some(i));
            assert_eq!(ring.indices(), ((i + 1) % 3, (i + 1) % 3));
        }
    }

    #[test]
    fn test_len_across_wrap() {
        let mut ring = RingState::with_capacity(4).unwrap();
        for i in 0..3 {
            ring.push(i);
        }
        ring.pop();
        ring.pop();
        ring.push(3);
        ring.push(4);
        // head wrapped to 1, tail at 2
        assert_eq!(ring.indices(), (1, 2));
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_last_tracks_head_predecessor() {
        let mut ring = RingState::with_capacity(3).unwrap();
        assert_eq!(ring.last(), None);
        ring.push(10);
        ring.push(20);
        assert_eq!(ring.last(), Some(&20));
        ring.push(30);
        // full: head wrapped back to 0, predecessor is slot 2
        assert_eq!(ring.last(), Some(&30));
        ring.pop();
        ring.pop();
        assert_eq!(ring.last(), Some(&30));
        ring.pop();
        assert_eq!(ring.last(), None);
    }

    #[test]
    fn test_remaining_items_dropped_with_ring() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        {
            let mut ring = RingState::with_capacity(4).unwrap();
            ring.push(Rc::clone(&tracker));
            ring.push(Rc::clone(&tracker));
            assert_eq!(Rc::strong_count(&tracker), 3);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }
}
