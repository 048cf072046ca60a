//! The band: the part of the alignment matrix where dynamic programming runs.
//!
//! Selected cells are rhombi in (x,y). Each one intersects a column x in a
//! contiguous range of y, so the band is stored as a sorted list of disjoint
//! y intervals per column. Consecutive columns of selected cells are joined
//! by bridges so that indels do not cut the band in two. Band nodes are
//! numbered column by column, in increasing y, which is the order in which
//! dynamic programming visits them.

use crate::cells::CellGrid;
use crate::coords::CoordinateTransform;
use crate::types::Coordinates;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Band {
    nx: u32,
    ny: u32,
    // Column x owns intervals[column_starts[x]..column_starts[x + 1]].
    column_starts: Vec<usize>,
    // Inclusive (y_lo, y_hi), sorted and disjoint within a column.
    intervals: Vec<(u32, u32)>,
    // Index of the first node of each interval.
    node_offsets: Vec<usize>,
    node_count: usize,
}

impl Band {
    /// Rasterize the selected cells and the bridges between them, each
    /// widened by `padding` cells in iX and iY.
    pub fn from_cells(grid: &CellGrid, transform: &CoordinateTransform, padding: u32) -> Self {
        let max_ix = transform.cell_column_count() - 1;
        let max_iy = transform.cell_row_count() - 1;

        let mut blocks: Vec<(Coordinates, Coordinates)> = grid.iter().map(|(cell, _)| (cell, cell)).collect();
        blocks.extend(bridges(grid));

        let mut cells: Vec<Coordinates> = Vec::with_capacity(blocks.len());
        for ((ix0, iy0), (ix1, iy1)) in blocks {
            for jy in iy0.saturating_sub(padding)..=iy1.saturating_add(padding).min(max_iy) {
                for jx in ix0.saturating_sub(padding)..=ix1.saturating_add(padding).min(max_ix) {
                    cells.push((jx, jy));
                }
            }
        }
        cells.sort_unstable();
        cells.dedup();

        let mut columns = vec![Vec::new(); transform.nx() as usize];
        for &cell in &cells {
            if let Some((x0, x1)) = transform.x_range_of_cell(cell) {
                for x in x0..=x1 {
                    if let Some(range) = transform.y_range_in_cell(cell, x) {
                        columns[x as usize].push(range);
                    }
                }
            }
        }

        Self::from_columns(transform.nx(), transform.ny(), columns)
    }

    /// The whole nx * ny matrix. Only reasonable for short sequences.
    pub fn full(nx: u32, ny: u32) -> Self {
        let columns = (0..nx).map(|_| vec![(0, ny - 1)]).collect();
        Self::from_columns(nx, ny, columns)
    }

    /// Build from unsorted, possibly overlapping y intervals of each column.
    pub(crate) fn from_columns(nx: u32, ny: u32, columns: Vec<Vec<(u32, u32)>>) -> Self {
        let mut band = Self {
            nx,
            ny,
            column_starts: Vec::with_capacity(columns.len() + 1),
            ..Default::default()
        };

        for mut column in columns {
            band.column_starts.push(band.intervals.len());
            column.sort_unstable();

            let mut merged: Option<(u32, u32)> = None;
            for (lo, hi) in column {
                merged = match merged {
                    // Overlapping or adjacent intervals become one.
                    Some((m_lo, m_hi)) if lo <= m_hi.saturating_add(1) => Some((m_lo, m_hi.max(hi))),
                    Some(done) => {
                        band.push_interval(done);
                        Some((lo, hi))
                    }
                    None => Some((lo, hi)),
                };
            }
            if let Some(done) = merged {
                band.push_interval(done);
            }
        }
        band.column_starts.push(band.intervals.len());
        band
    }

    fn push_interval(&mut self, (lo, hi): (u32, u32)) {
        self.intervals.push((lo, hi));
        self.node_offsets.push(self.node_count);
        self.node_count += (hi - lo + 1) as usize;
    }

    pub fn nx(&self) -> u32 {
        self.nx
    }

    pub fn ny(&self) -> u32 {
        self.ny
    }

    /// Number of band nodes.
    pub fn len(&self) -> usize {
        self.node_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// The y intervals of column x.
    pub fn column(&self, x: u32) -> &[(u32, u32)] {
        let x = x as usize;
        if x + 1 >= self.column_starts.len() {
            return &[];
        }
        &self.intervals[self.column_starts[x]..self.column_starts[x + 1]]
    }

    /// Node index of (x,y), or `None` if (x,y) is outside the band.
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        let x = x as usize;
        if x + 1 >= self.column_starts.len() {
            return None;
        }
        let start = self.column_starts[x];
        let intervals = &self.intervals[start..self.column_starts[x + 1]];

        let k = intervals.partition_point(|&(lo, _)| lo <= y);
        if k == 0 {
            return None;
        }
        let (lo, hi) = intervals[k - 1];
        if y > hi {
            return None;
        }
        Some(self.node_offsets[start + k - 1] + (y - lo) as usize)
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.index(x, y).is_some()
    }
}

/// Rectangles of cells, as (low corner, high corner), that join every
/// selected cell to the nearest selected cell of the previous and of the next
/// non-empty cell column.
///
/// An indel shifts the alignment path across diagonals, so the selected cells
/// on its two sides are in different rows of cells and would not touch.
fn bridges(grid: &CellGrid) -> Vec<(Coordinates, Coordinates)> {
    let mut columns: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    // By iY then iX, so every column list is sorted.
    for ((ix, iy), _) in grid.iter() {
        columns.entry(ix).or_default().push(iy);
    }
    let columns: Vec<(u32, Vec<u32>)> = columns.into_iter().collect();

    let mut bridges = Vec::new();
    for pair in columns.windows(2) {
        let (ix0, rows0) = (pair[0].0, pair[0].1.as_slice());
        let (ix1, rows1) = (pair[1].0, pair[1].1.as_slice());
        for &iy in rows0 {
            let target = nearest(rows1, iy);
            bridges.push(((ix0, iy.min(target)), (ix1, iy.max(target))));
        }
        for &iy in rows1 {
            let target = nearest(rows0, iy);
            bridges.push(((ix0, iy.min(target)), (ix1, iy.max(target))));
        }
    }
    bridges
}

/// The value of a sorted, non-empty list closest to `iy`; the lower one on ties.
fn nearest(sorted: &[u32], iy: u32) -> u32 {
    let k = sorted.partition_point(|&v| v < iy);
    match (k.checked_sub(1).map(|i| sorted[i]), sorted.get(k)) {
        (Some(below), Some(&above)) if above - iy < iy - below => above,
        (Some(below), _) => below,
        (None, Some(&above)) => above,
        (None, None) => iy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::SparseMatrix;
    use crate::sorting::sort_markers;

    #[test]
    fn test_full_band_indexes_row_major() {
        let band = Band::full(3, 4);
        assert_eq!(band.len(), 12);
        assert_eq!(band.index(0, 0), Some(0));
        assert_eq!(band.index(1, 2), Some(6));
        assert_eq!(band.index(2, 3), Some(11));
        assert_eq!(band.index(3, 0), None);
        assert_eq!(band.index(0, 4), None);
    }

    #[test]
    fn test_intervals_are_merged() {
        let band = Band::from_columns(2, 20, vec![vec![(5, 7), (0, 2), (3, 4), (10, 12)], vec![]]);
        assert_eq!(band.column(0), &[(0, 7), (10, 12)]);
        assert!(band.column(1).is_empty());
        assert_eq!(band.len(), 11);
        assert_eq!(band.index(0, 8), None);
        assert_eq!(band.index(0, 10), Some(8));
        assert_eq!(band.index(1, 0), None);
    }

    #[test]
    fn test_band_follows_selected_cells() {
        let seq: Vec<u32> = (0..50).collect();
        let transform = CoordinateTransform::new(50, 50, 10, 4);
        let mut matrix = SparseMatrix::new();
        matrix.build(&sort_markers(&seq), &sort_markers(&seq), &transform);
        let grid = CellGrid::from_matrix(&matrix, 3);

        let band = Band::from_cells(&grid, &transform, 0);
        for x in 0..50 {
            assert!(band.contains(x, x));
        }
        // Far off the diagonal.
        assert!(!band.contains(0, 30));
        assert!(!band.contains(45, 2));
        assert!(band.len() < 50 * 50 / 4);

        let padded = Band::from_cells(&grid, &transform, 1);
        assert!(padded.len() > band.len());
        for x in 0..50 {
            for y in 0..50 {
                if band.contains(x, y) {
                    assert!(padded.contains(x, y));
                }
            }
        }
    }

    #[test]
    fn test_band_nodes_are_numbered_in_visit_order() {
        let seq: Vec<u32> = (0..20).collect();
        let transform = CoordinateTransform::new(20, 20, 6, 3);
        let mut matrix = SparseMatrix::new();
        matrix.build(&sort_markers(&seq), &sort_markers(&seq), &transform);
        let band = Band::from_cells(&CellGrid::from_matrix(&matrix, 1), &transform, 1);

        let mut expected = 0;
        for x in 0..20 {
            for &(lo, hi) in band.column(x) {
                for y in lo..=hi {
                    assert_eq!(band.index(x, y), Some(expected));
                    expected += 1;
                }
            }
        }
        assert_eq!(expected, band.len());
    }

    #[test]
    fn test_nearest_prefers_lower_on_ties() {
        assert_eq!(nearest(&[3, 9], 6), 3);
        assert_eq!(nearest(&[3, 9], 7), 9);
        assert_eq!(nearest(&[3, 9], 1), 3);
        assert_eq!(nearest(&[3, 9], 20), 9);
        assert_eq!(nearest(&[3, 9], 9), 9);
    }

    #[test]
    fn test_band_bridges_an_insertion() {
        // 50 new markers after position 200 shift the diagonal by 50,
        // which is 12 rows of cells.
        let seq0: Vec<u32> = (0..400).collect();
        let mut seq1: Vec<u32> = (0..=200).collect();
        seq1.extend(1000..1050);
        seq1.extend(201..400);

        let transform = CoordinateTransform::new(400, 450, 40, 4);
        let mut matrix = SparseMatrix::new();
        matrix.build(&sort_markers(&seq0), &sort_markers(&seq1), &transform);
        let grid = CellGrid::from_matrix(&matrix, 10);
        let band = Band::from_cells(&grid, &transform, 0);

        // The last cells of the path are too sparse to be selected.
        for x in 0..=200 {
            assert!(band.contains(x, x));
        }
        for y in 200..=250 {
            assert!(band.contains(200, y), "insertion at y={} is outside the band", y);
        }
        for x in 201..390 {
            assert!(band.contains(x, x + 50));
        }
    }
}
