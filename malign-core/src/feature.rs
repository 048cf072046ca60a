//! Features: windows of `M` consecutive markers used as a single symbol.
//!
//! For the marker sequence `45 58 106 17` and `M = 2` the feature sequence is
//! `(45,58) (58,106) (106,17)`. Feature sequences are `M - 1` shorter than the
//! marker sequences they come from, and feature `i` starts at marker `i`, so a
//! feature ordinal is also a marker ordinal.
//!
//! With an alphabet of a few thousand markers the number of distinct features
//! grows as the alphabet size to the power `M`, which makes the alignment
//! matrix in feature space much sparser than in marker space.

use crate::types::KmerId;
use std::fmt::Debug;

/// A symbol that can be sorted and joined on.
pub trait Symbol: Copy + Ord + Debug {}

impl<T: Copy + Ord + Debug> Symbol for T {}

/// `M` consecutive markers. Equality is element-wise, ordering lexicographic.
pub type Feature<const M: usize> = [KmerId; M];

/// Number of features of length `m` in a sequence of `n` markers.
pub fn feature_count(n: usize, m: usize) -> usize {
    if m == 0 {
        return 0;
    }
    (n + 1).saturating_sub(m)
}

/// Build the feature sequence of a marker sequence.
///
/// Returns an empty sequence when there are fewer than `M` markers.
pub fn feature_sequence<const M: usize>(markers: &[KmerId]) -> Vec<Feature<M>> {
    if M == 0 || markers.len() < M {
        return Vec::new();
    }

    markers
        .windows(M)
        .map(|window| {
            let mut feature = [0; M];
            feature.copy_from_slice(window);
            feature
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_sequence_pairs() {
        let features = feature_sequence::<2>(&[45, 58, 106, 17]);
        assert_eq!(features, vec![[45, 58], [58, 106], [106, 17]]);
    }

    #[test]
    fn test_single_marker_features() {
        let features = feature_sequence::<1>(&[3, 1, 2]);
        assert_eq!(features, vec![[3], [1], [2]]);
    }

    #[test]
    fn test_short_sequence_has_no_features() {
        assert!(feature_sequence::<4>(&[1, 2, 3]).is_empty());
        assert_eq!(feature_count(3, 4), 0);
    }

    #[test]
    fn test_feature_length_equal_to_sequence_length() {
        let features = feature_sequence::<3>(&[7, 8, 9]);
        assert_eq!(features, vec![[7, 8, 9]]);
        assert_eq!(feature_count(3, 3), 1);
    }

    #[test]
    fn test_feature_ordering_is_lexicographic() {
        let a: Feature<2> = [1, 9];
        let b: Feature<2> = [2, 0];
        assert!(a < b);
    }
}
