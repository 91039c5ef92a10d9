//! Error types for channel operations.

use std::fmt;
use thiserror::Error;

/// Errors that can occur when constructing a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Backing storage could not be allocated.
    #[error("failed to allocate storage for {capacity} elements")]
    Allocation {
        /// The requested number of slots.
        capacity: usize,
    },
    /// A channel needs at least one slot.
    #[error("capacity must be at least 1")]
    ZeroCapacity,
}

/// An element refused by [`insert`](crate::OrderedChannel::insert) because it
/// is not strictly greater than the most recently inserted element.
///
/// The element is handed back so the caller may retry with another value or
/// drop it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Rejected<T>(pub T);

impl<T> Rejected<T> {
    /// Returns the refused element.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected").finish_non_exhaustive()
    }
}

impl<T> fmt::Display for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("element is not greater than the last inserted element")
    }
}

impl<T> std::error::Error for Rejected<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_hands_item_back() {
        let r = Rejected(String::from("late"));
        assert_eq!(r.to_string(), "element is not greater than the last inserted element");
        assert_eq!(r.into_inner(), "late");
    }

    #[test]
    fn test_channel_error_display() {
        let e = ChannelError::Allocation { capacity: 8 };
        assert_eq!(e.to_string(), "failed to allocate storage for 8 elements");
        assert_eq!(ChannelError::ZeroCapacity.to_string(), "capacity must be at least 1");
    }
}
