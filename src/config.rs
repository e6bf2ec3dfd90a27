//! Heap construction settings

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// How sift-down chooses between two children with equal keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Pick either child with equal probability, so long runs of equal keys
    /// do not all sink down the left spine
    #[default]
    Random,
    /// Always pick the left child
    Left,
}

/// Settings for [`AdaptableHeap::with_config`](crate::heap::AdaptableHeap::with_config)
///
/// # Example
///
/// ```rust
/// use adaptable_heap::{AdaptableHeap, HeapConfig, NaturalOrder, TieBreak};
///
/// let config = HeapConfig::default()
///     .with_tie_break(TieBreak::Random)
///     .with_seed(42)
///     .with_capacity(128);
/// let heap: AdaptableHeap<u32, String> = AdaptableHeap::with_config(NaturalOrder, config);
/// assert!(heap.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeapConfig {
    pub tie_break: TieBreak,
    /// Seed for [`TieBreak::Random`]; drawn from OS entropy when `None`
    pub seed: Option<u64>,
    /// Number of entries to reserve room for up front
    pub capacity: usize,
}

impl HeapConfig {
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Runtime state behind a [`TieBreak`] policy
#[derive(Debug, Clone)]
pub(crate) enum TieBreaker {
    Random(StdRng),
    Left,
}

impl TieBreaker {
    pub(crate) fn from_config(config: &HeapConfig) -> Self {
        match config.tie_break {
            TieBreak::Left => TieBreaker::Left,
            TieBreak::Random => TieBreaker::Random(match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            }),
        }
    }

    /// Returns true if the left child should win a tie
    pub(crate) fn prefer_left(&mut self) -> bool {
        match self {
            TieBreaker::Random(rng) => rng.gen_bool(0.5),
            TieBreaker::Left => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HeapConfig::default();
        assert_eq!(config.tie_break, TieBreak::Random);
        assert_eq!(config.seed, None);
        assert_eq!(config.capacity, 0);
    }

    #[test]
    fn test_left_always_prefers_left() {
        let mut breaker = TieBreaker::from_config(&HeapConfig::default().with_tie_break(TieBreak::Left));
        assert!((0..100).all(|_| breaker.prefer_left()));
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let config = HeapConfig::default().with_seed(7);
        let mut a = TieBreaker::from_config(&config);
        let mut b = TieBreaker::from_config(&config);
        let first: Vec<bool> = (0..64).map(|_| a.prefer_left()).collect();
        let second: Vec<bool> = (0..64).map(|_| b.prefer_left()).collect();
        assert_eq!(first, second);
        // Both sides come up over 64 fair draws.
        assert!(first.contains(&true) && first.contains(&false));
    }
}
