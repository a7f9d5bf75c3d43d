use std::ops::Range;

use crate::streak::streaks;

/// Mapping between the qualifying regions of the original signal and their
/// packed positions in the squashed buffer.
#[derive(Debug, Clone, Default)]
pub struct SquashMap {
    pairs: Vec<(Range<usize>, Range<usize>)>,
    source_len: usize,
    compact_len: usize,
}

impl SquashMap {
    pub fn from_mask(mask: &[bool]) -> Self {
        if !mask.is_empty() && mask.iter().all(|&b| b) {
            // whole signal qualifies as one bout; skip streak enumeration
            return Self {
                pairs: vec![(0..mask.len(), 0..mask.len())],
                source_len: mask.len(),
                compact_len: mask.len(),
            };
        }
        let mut pairs = Vec::new();
        let mut at = 0;
        for s in streaks(mask).into_iter().filter(|s| s.value) {
            pairs.push((s.start..s.end, at..at + s.len));
            at += s.len;
        }
        Self {
            pairs,
            source_len: mask.len(),
            compact_len: at,
        }
    }

    pub fn compact_len(&self) -> usize {
        self.compact_len
    }

    pub fn is_empty(&self) -> bool {
        self.compact_len == 0
    }

    pub fn squash(&self, signal: &[f64]) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.compact_len);
        for (orig, _) in &self.pairs {
            out.extend_from_slice(&signal[orig.clone()]);
        }
        out
    }

    // positions outside the mapping (or beyond `values`) get `fill`
    pub fn scatter(&self, values: &[bool], fill: bool) -> Vec<bool> {
        let mut out = vec![fill; self.source_len];
        for (orig, compact) in &self.pairs {
            for (o, c) in orig.clone().zip(compact.clone()) {
                out[o] = values.get(c).copied().unwrap_or(fill);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squash_concatenates_in_order() {
        let mask = [false, true, true, false, true, false];
        let map = SquashMap::from_mask(&mask);
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(map.compact_len(), 3);
        assert_eq!(map.squash(&x), vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_scatter_restores_positions() {
        let mask = [false, true, true, false, true, false];
        let map = SquashMap::from_mask(&mask);
        let scattered = map.scatter(&[true, false, true], false);
        assert_eq!(scattered, vec![false, true, false, false, true, false]);
    }

    #[test]
    fn test_scatter_short_values_fill() {
        let mask = [true, true, true, false];
        let map = SquashMap::from_mask(&mask);
        // classifier dropped the remainder window; missing tail stays false
        assert_eq!(map.scatter(&[true], false), vec![true, false, false, false]);
    }

    #[test]
    fn test_all_true_uses_single_range() {
        let map = SquashMap::from_mask(&[true; 8]);
        assert_eq!(map.compact_len(), 8);
        let x: Vec<f64> = (0..8).map(|i| i as f64).collect();
        assert_eq!(map.squash(&x), x);
    }

    #[test]
    fn test_all_false_is_empty() {
        let map = SquashMap::from_mask(&[false; 4]);
        assert!(map.is_empty());
        assert_eq!(map.scatter(&[], false), vec![false; 4]);
    }
}
