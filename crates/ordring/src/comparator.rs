use std::cmp::Ordering;

/// Total order used to decide whether an incoming element may be accepted.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparator, so most callers never
/// name this trait:
///
/// ```
/// use ordring::{Config, OrderedChannel};
///
/// // Accept only strictly decreasing values.
/// let ch = OrderedChannel::new(Config::default(), |a: &i32, b: &i32| b.cmp(a)).unwrap();
/// assert!(ch.insert(9).is_ok());
/// assert!(ch.insert(4).is_ok());
/// assert!(ch.insert(6).is_err());
/// ```
pub trait Comparator<T>: Send + Sync {
    /// Compares `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Returns `true` if `next` may follow `last`, i.e. `last < next`.
    #[inline]
    fn admits(&self, last: &T, next: &T) -> bool {
        self.compare(last, next) == Ordering::Less
    }
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering + Send + Sync,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The element type's own [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order_admits_only_greater() {
        assert!(NaturalOrder.admits(&1, &2));
        assert!(!NaturalOrder.admits(&2, &2));
        assert!(!NaturalOrder.admits(&3, &2));
    }

    #[test]
    fn test_closure_comparator() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert!(by_len.admits(&"ab", &"abc"));
        assert!(!by_len.admits(&"abc", &"xyz"));
    }
}
