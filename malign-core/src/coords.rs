//! Coordinate systems of the alignment matrix.
//!
//! `x` and `y` are ordinals in the first and second marker sequence. The
//! diagonal coordinates are
//!
//! ```text
//! X = x + y
//! Y = y + (nx - 1 - x)
//! ```
//!
//! so that `0 <= X, Y <= nx + ny - 2`. X runs along the diagonals of the
//! alignment matrix and Y identifies the diagonal. In (X,Y) the matrix is a
//! square of side `nx + ny - 1` rotated by 45 degrees, and only points with
//! `X - Y + nx - 1` even map back to a matrix element.
//!
//! Cells are `delta_x * delta_y` rectangles in (X,Y) with indexes
//! `(iX, iY) = (X / delta_x, Y / delta_y)`. In (x,y) a cell is a rhombus, and
//! its intersection with a column of the matrix is a contiguous range of y.

use crate::types::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateTransform {
    nx: u32,
    ny: u32,
    delta_x: u32,
    delta_y: u32,
}

impl CoordinateTransform {
    /// Both sequences must be non-empty and both cell sizes positive.
    pub fn new(nx: u32, ny: u32, delta_x: u32, delta_y: u32) -> Self {
        debug_assert!(nx > 0 && ny > 0);
        debug_assert!(delta_x > 0 && delta_y > 0);
        Self {
            nx,
            ny,
            delta_x,
            delta_y,
        }
    }

    pub fn nx(&self) -> u32 {
        self.nx
    }

    pub fn ny(&self) -> u32 {
        self.ny
    }

    pub fn delta_x(&self) -> u32 {
        self.delta_x
    }

    pub fn delta_y(&self) -> u32 {
        self.delta_y
    }

    /// Number of distinct values of X, and of Y.
    pub fn diagonal_extent(&self) -> u32 {
        (self.nx - 1) + self.ny
    }

    /// Number of distinct values of iX.
    pub fn cell_column_count(&self) -> u32 {
        (self.diagonal_extent() - 1) / self.delta_x + 1
    }

    /// Number of distinct values of iY.
    pub fn cell_row_count(&self) -> u32 {
        (self.diagonal_extent() - 1) / self.delta_y + 1
    }

    /// (x,y) to (X,Y).
    #[inline]
    pub fn xy_to_diagonal(&self, (x, y): Coordinates) -> Coordinates {
        (x + y, y + (self.nx - 1 - x))
    }

    /// (X,Y) to (iX,iY).
    #[inline]
    pub fn diagonal_to_cell(&self, (big_x, big_y): Coordinates) -> Coordinates {
        (big_x / self.delta_x, big_y / self.delta_y)
    }

    /// (x,y) to (iX,iY).
    #[inline]
    pub fn xy_to_cell(&self, xy: Coordinates) -> Coordinates {
        self.diagonal_to_cell(self.xy_to_diagonal(xy))
    }

    /// (X,Y) back to (x,y), if the point corresponds to a matrix element.
    pub fn diagonal_to_xy(&self, (big_x, big_y): Coordinates) -> Option<Coordinates> {
        let twice_x = big_x as i64 - big_y as i64 + self.nx as i64 - 1;
        if twice_x < 0 || twice_x % 2 != 0 {
            return None;
        }
        let x = twice_x / 2;
        let y = big_x as i64 - x;
        if x >= self.nx as i64 || y < 0 || y >= self.ny as i64 {
            return None;
        }
        Some((x as u32, y as u32))
    }

    /// Inclusive range of X and of Y covered by a cell.
    fn cell_bounds(&self, (ix, iy): Coordinates) -> ((i64, i64), (i64, i64)) {
        let x0 = ix as i64 * self.delta_x as i64;
        let y0 = iy as i64 * self.delta_y as i64;
        (
            (x0, x0 + self.delta_x as i64 - 1),
            (y0, y0 + self.delta_y as i64 - 1),
        )
    }

    /// Inclusive range of x spanned by a cell, clipped to the matrix.
    ///
    /// Some columns of the range can still have an empty intersection
    /// with the cell near the matrix boundary.
    pub fn x_range_of_cell(&self, cell: Coordinates) -> Option<(u32, u32)> {
        let ((big_x0, big_x1), (big_y0, big_y1)) = self.cell_bounds(cell);
        let offset = self.nx as i64 - 1;

        // x = (X - Y + nx - 1) / 2
        let lo = (big_x0 - big_y1 + offset + 1).div_euclid(2).max(0);
        let hi = (big_x1 - big_y0 + offset).div_euclid(2).min(self.nx as i64 - 1);
        if lo > hi {
            return None;
        }
        Some((lo as u32, hi as u32))
    }

    /// Inclusive range of y of column `x` inside a cell, clipped to the matrix.
    pub fn y_range_in_cell(&self, cell: Coordinates, x: u32) -> Option<(u32, u32)> {
        let ((big_x0, big_x1), (big_y0, big_y1)) = self.cell_bounds(cell);
        let x = x as i64;
        let shift = self.nx as i64 - 1 - x;

        // y = X - x and y = Y - (nx - 1 - x)
        let lo = (big_x0 - x).max(big_y0 - shift).max(0);
        let hi = (big_x1 - x).min(big_y1 - shift).min(self.ny as i64 - 1);
        if lo > hi {
            return None;
        }
        Some((lo as u32, hi as u32))
    }
}
