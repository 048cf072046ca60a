//! Sorted symbol lists, the input of the sort-merge join.

use crate::feature::{feature_sequence, Feature, Symbol};
use crate::types::KmerId;

/// Pairs (symbol, ordinal) sorted by symbol, then by ordinal.
pub type SortedSymbols<S> = Vec<(S, u32)>;

/// Sort a sequence of symbols, remembering where each one came from.
pub fn sort_symbols<S: Symbol>(symbols: &[S]) -> SortedSymbols<S> {
    let mut sorted: SortedSymbols<S> = symbols
        .iter()
        .enumerate()
        .map(|(ordinal, &symbol)| (symbol, ordinal as u32))
        .collect();

    // Ordinals are distinct, so this gives the same order as a stable sort by symbol.
    sorted.sort_unstable();
    sorted
}

pub fn sort_markers(markers: &[KmerId]) -> SortedSymbols<KmerId> {
    sort_symbols(markers)
}

pub fn sort_features<const M: usize>(markers: &[KmerId]) -> SortedSymbols<Feature<M>> {
    sort_symbols(&feature_sequence::<M>(markers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_markers_breaks_ties_by_ordinal() {
        let sorted = sort_markers(&[5, 3, 5, 1, 3]);
        assert_eq!(sorted, vec![(1, 3), (3, 1), (3, 4), (5, 0), (5, 2)]);
    }

    #[test]
    fn test_sort_features() {
        let sorted = sort_features::<2>(&[2, 1, 2, 1]);
        assert_eq!(sorted, vec![([1, 2], 1), ([2, 1], 0), ([2, 1], 2)]);
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_markers(&[]).is_empty());
        assert!(sort_features::<3>(&[1, 2]).is_empty());
    }
}
