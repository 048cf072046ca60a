//! Sparse alignment matrix.
//!
//! The matrix has an entry at (x,y) when symbol x of the first sequence equals
//! symbol y of the second. Entries are found by a sort-merge join of the two
//! sorted symbol lists and stored by cell row: for each iY, pairs (iX, entry)
//! sorted by iX. Even though this requires sorting, it is more efficient than
//! a hash table keyed by cell, due to the better memory access pattern.

use crate::coords::CoordinateTransform;
use crate::feature::Symbol;
use crate::types::Coordinates;
use std::cmp::Ordering;

/// One element of the alignment matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatrixEntry {
    pub xy: Coordinates,
}

impl MatrixEntry {
    pub fn new(xy: Coordinates) -> Self {
        Self { xy }
    }
}

/// Call `f` with every (x,y) such that `sorted0[..] == sorted1[..]` by symbol.
///
/// Both lists must be sorted by symbol. When a symbol occurs several times in
/// either list, the full cross product of its occurrences is emitted.
pub fn for_each_match<S, F>(sorted0: &[(S, u32)], sorted1: &[(S, u32)], mut f: F)
where
    S: Symbol,
    F: FnMut(Coordinates),
{
    let (mut i, mut j) = (0, 0);
    while i < sorted0.len() && j < sorted1.len() {
        let symbol0 = sorted0[i].0;
        let symbol1 = sorted1[j].0;
        match symbol0.cmp(&symbol1) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                let i_end = i + sorted0[i..].iter().take_while(|(s, _)| *s == symbol0).count();
                let j_end = j + sorted1[j..].iter().take_while(|(s, _)| *s == symbol0).count();
                for &(_, x) in &sorted0[i..i_end] {
                    for &(_, y) in &sorted1[j..j_end] {
                        f((x, y));
                    }
                }
                i = i_end;
                j = j_end;
            }
        }
    }
}

/// The alignment matrix work area.
///
/// A vector of vectors stored as one contiguous buffer plus row offsets: row
/// `iY` is `data[offsets[iY]..offsets[iY + 1]]`. The caller owns it and can
/// reuse it across alignments to avoid reallocation; `build` clears it first.
#[derive(Debug, Clone, Default)]
pub struct SparseMatrix {
    offsets: Vec<usize>,
    data: Vec<(u32, MatrixEntry)>,
}

impl SparseMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all entries, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.offsets.clear();
        self.data.clear();
    }

    /// Number of iY rows, including empty ones.
    pub fn row_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn entry_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pairs (iX, entry) of row iY, sorted by iX. Empty past the last row.
    pub fn row(&self, iy: usize) -> &[(u32, MatrixEntry)] {
        if iy + 1 >= self.offsets.len() {
            return &[];
        }
        &self.data[self.offsets[iy]..self.offsets[iy + 1]]
    }

    /// Non-empty rows with their iY.
    pub fn rows(&self) -> impl Iterator<Item = (u32, &[(u32, MatrixEntry)])> + '_ {
        (0..self.row_count())
            .map(move |iy| (iy as u32, self.row(iy)))
            .filter(|(_, row)| !row.is_empty())
    }

    /// All entries with their cell (iX,iY), in storage order.
    pub fn entries(&self) -> impl Iterator<Item = (Coordinates, MatrixEntry)> + '_ {
        self.rows()
            .flat_map(|(iy, row)| row.iter().map(move |&(ix, entry)| ((ix, iy), entry)))
    }

    /// Fill the matrix from two sorted symbol lists.
    ///
    /// Runs the join twice: a first pass counts the entries of each row, a
    /// second pass stores them at their final position. Then each row is sorted.
    pub fn build<S: Symbol>(
        &mut self,
        sorted0: &[(S, u32)],
        sorted1: &[(S, u32)],
        transform: &CoordinateTransform,
    ) {
        self.clear();
        let row_count = transform.cell_row_count() as usize;

        let mut counts = vec![0usize; row_count];
        for_each_match(sorted0, sorted1, |xy| {
            counts[transform.xy_to_cell(xy).1 as usize] += 1;
        });

        self.offsets.reserve(row_count + 1);
        self.offsets.push(0);
        let mut total = 0;
        for &count in &counts {
            total += count;
            self.offsets.push(total);
        }

        self.data.resize(total, (0, MatrixEntry::default()));
        let mut next = counts;
        next.copy_from_slice(&self.offsets[..row_count]);
        let data = &mut self.data;
        for_each_match(sorted0, sorted1, |xy| {
            let (ix, iy) = transform.xy_to_cell(xy);
            let slot = &mut next[iy as usize];
            data[*slot] = (ix, MatrixEntry::new(xy));
            *slot += 1;
        });

        for iy in 0..row_count {
            self.data[self.offsets[iy]..self.offsets[iy + 1]].sort_unstable();
        }

        log::trace!(
            "Alignment matrix: {} entries in {} cell rows",
            self.data.len(),
            row_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::{sort_features, sort_markers};

    fn collect_matches(seq0: &[u32], seq1: &[u32]) -> Vec<Coordinates> {
        let mut matches = Vec::new();
        for_each_match(&sort_markers(seq0), &sort_markers(seq1), |xy| matches.push(xy));
        matches.sort_unstable();
        matches
    }

    #[test]
    fn test_join_finds_exactly_the_equal_pairs() {
        let seq0 = [4, 1, 7, 1];
        let seq1 = [1, 9, 4, 1, 7];
        let mut expected = Vec::new();
        for (x, a) in seq0.iter().enumerate() {
            for (y, b) in seq1.iter().enumerate() {
                if a == b {
                    expected.push((x as u32, y as u32));
                }
            }
        }
        assert_eq!(collect_matches(&seq0, &seq1), expected);
    }

    #[test]
    fn test_join_cross_product_for_repeats() {
        let matches = collect_matches(&[2, 2, 2], &[2, 2]);
        assert_eq!(matches.len(), 6);
    }

    #[test]
    fn test_join_disjoint_alphabets() {
        assert!(collect_matches(&[1, 2, 3], &[4, 5, 6]).is_empty());
    }

    #[test]
    fn test_build_groups_rows_and_sorts_by_ix() {
        let seq0 = [1, 2, 3, 4, 5, 6, 7, 8];
        let seq1 = [1, 2, 3, 4, 5, 6, 7, 8];
        let transform = CoordinateTransform::new(8, 8, 3, 2);
        let mut matrix = SparseMatrix::new();
        matrix.build(&sort_markers(&seq0), &sort_markers(&seq1), &transform);

        assert_eq!(matrix.entry_count(), 8);
        assert_eq!(matrix.row_count(), transform.cell_row_count() as usize);
        for (iy, row) in matrix.rows() {
            assert!(row.windows(2).all(|w| w[0].0 <= w[1].0));
            for &(ix, entry) in row {
                assert_eq!(transform.xy_to_cell(entry.xy), (ix, iy));
            }
        }
        // The main diagonal is Y = nx - 1 = 7, in row 3.
        assert_eq!(matrix.row(3).len(), 8);
    }

    #[test]
    fn test_build_clears_previous_content() {
        let transform = CoordinateTransform::new(3, 3, 2, 2);
        let mut matrix = SparseMatrix::new();
        matrix.build(&sort_markers(&[1, 1, 1]), &sort_markers(&[1, 1, 1]), &transform);
        assert_eq!(matrix.entry_count(), 9);
        matrix.build(&sort_markers(&[1, 2, 3]), &sort_markers(&[3, 4, 5]), &transform);
        assert_eq!(matrix.entry_count(), 1);
        assert_eq!(matrix.entries().next().map(|(_, e)| e.xy), Some((2, 0)));
    }

    #[test]
    fn test_build_in_feature_space() {
        let markers0 = [1, 2, 3, 4];
        let markers1 = [9, 1, 2, 3, 4];
        let transform = CoordinateTransform::new(4, 5, 10, 10);
        let mut matrix = SparseMatrix::new();
        matrix.build(
            &sort_features::<2>(&markers0),
            &sort_features::<2>(&markers1),
            &transform,
        );
        let xys: Vec<_> = matrix.entries().map(|(_, e)| e.xy).collect();
        assert_eq!(xys, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_row_out_of_range_is_empty() {
        let matrix = SparseMatrix::new();
        assert!(matrix.row(0).is_empty());
        assert_eq!(matrix.row_count(), 0);
        assert!(matrix.is_empty());
    }
}
