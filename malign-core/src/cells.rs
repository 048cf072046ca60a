//! Cells in (X,Y) space.
//!
//! Alignment matrix entries are binned into `delta_x * delta_y` cells and only
//! cells with enough entries are kept. Along a true alignment the entries are
//! dense in a narrow range of Y, while spurious matches between unrelated
//! positions are scattered, so the kept cells form the band in which the
//! alignment is computed.

use crate::matrix::SparseMatrix;
use crate::types::Coordinates;
use serde::{Deserialize, Serialize};

/// Statistics of the alignment matrix entries in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub entry_count: u32,
    // Bounding box of the entries in (x,y).
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl Cell {
    fn new((x, y): Coordinates) -> Self {
        Self {
            entry_count: 1,
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        }
    }

    fn add(&mut self, (x, y): Coordinates) {
        self.entry_count = self.entry_count.saturating_add(1);
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }
}

/// Selected cells, stored like the alignment matrix: for each iY,
/// pairs (iX, cell) sorted by iX.
#[derive(Debug, Clone, Default)]
pub struct CellGrid {
    rows: Vec<Vec<(u32, Cell)>>,
    cell_count: usize,
}

impl CellGrid {
    /// Bin the matrix entries and keep the cells with at least
    /// `min_entry_count` entries.
    ///
    /// Rows of the matrix are sorted by iX, so each row is binned in one scan.
    pub fn from_matrix(matrix: &SparseMatrix, min_entry_count: u32) -> Self {
        let mut rows = vec![Vec::new(); matrix.row_count()];
        let mut cell_count = 0;

        for (iy, row) in matrix.rows() {
            let cells = &mut rows[iy as usize];
            let mut current: Option<(u32, Cell)> = None;

            for &(ix, entry) in row {
                if let Some((current_ix, cell)) = current.as_mut() {
                    if *current_ix == ix {
                        cell.add(entry.xy);
                        continue;
                    }
                }
                if let Some((done_ix, cell)) = current.take() {
                    if cell.entry_count >= min_entry_count {
                        cells.push((done_ix, cell));
                    }
                }
                current = Some((ix, Cell::new(entry.xy)));
            }
            if let Some((done_ix, cell)) = current {
                if cell.entry_count >= min_entry_count {
                    cells.push((done_ix, cell));
                }
            }
            cell_count += cells.len();
        }

        Self { rows, cell_count }
    }

    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count == 0
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Pairs (iX, cell) of row iY, sorted by iX.
    pub fn row(&self, iy: usize) -> &[(u32, Cell)] {
        self.rows.get(iy).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, (ix, iy): Coordinates) -> Option<&Cell> {
        let row = self.row(iy as usize);
        row.binary_search_by_key(&ix, |&(cell_ix, _)| cell_ix)
            .ok()
            .map(|i| &row[i].1)
    }

    /// All cells with their (iX,iY), by iY then iX.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinates, &Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(iy, row)| {
            row.iter().map(move |(ix, cell)| ((*ix, iy as u32), cell))
        })
    }

    /// Largest entry count over all cells.
    pub fn max_entry_count(&self) -> u32 {
        self.iter().map(|(_, cell)| cell.entry_count).max().unwrap_or(0)
    }
}
