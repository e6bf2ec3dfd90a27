//! Key orderings
//!
//! The heap never calls `Ord` directly. It asks a [`Comparator`], which may
//! decline to order two keys by returning `None`. A key that cannot even be
//! ordered against itself (for example `f64::NAN` under [`NaturalOrder`]) is
//! rejected by the heap as invalid.

use std::cmp::Ordering;

/// An ordering over heap keys
pub trait Comparator<K> {
    /// Compares two keys, or returns `None` if they are not comparable
    fn compare(&self, a: &K, b: &K) -> Option<Ordering>;
}

/// Ascending order via `PartialOrd`; the heap pops the smallest key first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: PartialOrd> Comparator<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Option<Ordering> {
        a.partial_cmp(b)
    }
}

/// Descending order via `PartialOrd`; the heap pops the largest key first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReverseOrder;

impl<K: PartialOrd> Comparator<K> for ReverseOrder {
    fn compare(&self, a: &K, b: &K) -> Option<Ordering> {
        b.partial_cmp(a)
    }
}

impl<K, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Option<Ordering>,
{
    fn compare(&self, a: &K, b: &K) -> Option<Ordering> {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert_eq!(NaturalOrder.compare(&1, &2), Some(Ordering::Less));
        assert_eq!(NaturalOrder.compare(&2.5, &2.5), Some(Ordering::Equal));
        assert_eq!(NaturalOrder.compare(&f64::NAN, &f64::NAN), None);
    }

    #[test]
    fn test_reverse_order() {
        assert_eq!(ReverseOrder.compare(&1, &2), Some(Ordering::Greater));
        assert_eq!(ReverseOrder.compare(&"b", &"a"), Some(Ordering::Less));
    }

    #[test]
    fn test_closure_comparator() {
        let by_abs = |a: &i32, b: &i32| Some(a.abs().cmp(&b.abs()));
        assert_eq!(by_abs.compare(&-3, &2), Some(Ordering::Greater));
    }
}
