//! Debug assertion macros for ring invariants.
//!
//! Only active in debug builds (`#[cfg(debug_assertions)]`), so there is
//! zero overhead in release builds.

// =============================================================================
// Index bounds: 0 ≤ head, tail < capacity
// =============================================================================

/// Assert that a wraparound index stays inside storage.
///
/// Used in: `RingState::push()` and `RingState::pop()` after advancing
macro_rules! debug_assert_index_in_bounds {
    ($name:literal, $idx:expr, $capacity:expr) => {
        debug_assert!(
            $idx < $capacity,
            "index bounds violated: {} = {} outside capacity {}",
            $name,
            $idx,
            $capacity
        )
    };
}

// =============================================================================
// Bounded occupancy: len ≤ capacity
// =============================================================================

/// Assert that occupancy never exceeds capacity.
///
/// Used in: `RingState::push()` after the write
macro_rules! debug_assert_bounded_len {
    ($len:expr, $capacity:expr) => {
        debug_assert!(
            $len <= $capacity,
            "bounded occupancy violated: len {} exceeds capacity {}",
            $len,
            $capacity
        )
    };
}

// =============================================================================
// Slot lifecycle: Free → Occupied → Free
// =============================================================================

/// Assert that the slot about to be written is free.
///
/// Used in: `RingState::push()` before storing into `head`
macro_rules! debug_assert_slot_free {
    ($slot:expr, $idx:expr) => {
        debug_assert!(
            $slot.is_none(),
            "slot lifecycle violated: writing into occupied slot {}",
            $idx
        )
    };
}

/// Assert that the slot about to be read is occupied.
///
/// Used in: `RingState::pop()` before taking from `tail`
macro_rules! debug_assert_slot_occupied {
    ($slot:expr, $idx:expr) => {
        debug_assert!(
            $slot.is_some(),
            "slot lifecycle violated: reading free slot {}",
            $idx
        )
    };
}

// =============================================================================
// Ordering: an accepted element is strictly greater than its predecessor
// =============================================================================

/// Assert that an accepted element follows the last inserted one.
///
/// Used in: `OrderedChannel::insert()` before the write
macro_rules! debug_assert_admitted {
    ($cmp:expr, $last:expr, $next:expr) => {
        debug_assert!(
            $last.map_or(true, |last| $cmp.admits(last, $next)),
            "ordering violated: accepted element is not greater than the last inserted element"
        )
    };
}

pub(crate) use debug_assert_admitted;
pub(crate) use debug_assert_bounded_len;
pub(crate) use debug_assert_index_in_bounds;
pub(crate) use debug_assert_slot_free;
pub(crate) use debug_assert_slot_occupied;
