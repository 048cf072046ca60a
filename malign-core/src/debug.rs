//! Debug output of the alignment phases.
//!
//! Written only when the caller passes a debug directory. The images show the
//! alignment matrix with x horizontal and y vertical, over a checkerboard of the
//! diagonal-space cells, so the band selected by the cell binner is easy to see.

use crate::cells::CellGrid;
use crate::coords::CoordinateTransform;
use crate::error::AlignResult;
use crate::matrix::SparseMatrix;
use crate::types::Coordinates;
use image::{Rgb, RgbImage};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Images larger than this in either direction are not written.
pub const MAX_IMAGE_SIDE: u32 = 4096;

pub const MARKER_SPACE_PNG: &str = "alignment-matrix-marker-space.png";
pub const FEATURE_SPACE_PNG: &str = "alignment-matrix-feature-space.png";
pub const MATRIX_CSV: &str = "alignment-matrix.csv";
pub const CELLS_CSV: &str = "cells.csv";
pub const CELLS_PNG: &str = "cells.png";

const MATCH_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const EVEN_CELL_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const ODD_CELL_COLOR: Rgb<u8> = Rgb([225, 225, 240]);

/// Writes debug files into one directory.
pub struct DebugWriter {
    dir: PathBuf,
}

impl DebugWriter {
    /// Create the directory if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> AlignResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn image_fits(&self, name: &str, width: u32, height: u32) -> bool {
        if width > MAX_IMAGE_SIDE || height > MAX_IMAGE_SIDE {
            log::warn!(
                "Skipping {}: {}x{} pixels exceeds the {} pixel limit",
                name,
                width,
                height,
                MAX_IMAGE_SIDE
            );
            return false;
        }
        true
    }

    /// Image of the alignment matrix, one pixel per (x,y).
    ///
    /// Returns false if the image was too large to be written.
    pub fn write_matrix_png<I>(&self, name: &str, transform: &CoordinateTransform, matches: I) -> AlignResult<bool>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let (width, height) = (transform.nx(), transform.ny());
        if !self.image_fits(name, width, height) {
            return Ok(false);
        }

        let mut img = RgbImage::from_fn(width, height, |x, y| {
            let (ix, iy) = transform.xy_to_cell((x, y));
            if (ix + iy) % 2 == 0 {
                EVEN_CELL_COLOR
            } else {
                ODD_CELL_COLOR
            }
        });
        for (x, y) in matches {
            img.put_pixel(x, y, MATCH_COLOR);
        }
        img.save(self.path(name))?;
        Ok(true)
    }

    /// One line per alignment matrix entry: `x,y,X,Y,iX,iY`.
    pub fn write_matrix_csv(&self, matrix: &SparseMatrix, transform: &CoordinateTransform) -> AlignResult<()> {
        let mut out = BufWriter::new(File::create(self.path(MATRIX_CSV))?);
        writeln!(out, "x,y,X,Y,iX,iY")?;
        for ((ix, iy), entry) in matrix.entries() {
            let (x, y) = entry.xy;
            let (big_x, big_y) = transform.xy_to_diagonal(entry.xy);
            writeln!(out, "{},{},{},{},{},{}", x, y, big_x, big_y, ix, iy)?;
        }
        out.flush()?;
        Ok(())
    }

    /// One line per selected cell.
    pub fn write_cells_csv(&self, grid: &CellGrid) -> AlignResult<()> {
        let mut out = BufWriter::new(File::create(self.path(CELLS_CSV))?);
        writeln!(out, "iX,iY,entryCount,minX,maxX,minY,maxY")?;
        for ((ix, iy), cell) in grid.iter() {
            writeln!(
                out,
                "{},{},{},{},{},{},{}",
                ix, iy, cell.entry_count, cell.min_x, cell.max_x, cell.min_y, cell.max_y
            )?;
        }
        out.flush()?;
        Ok(())
    }

    /// One pixel per cell in (iX,iY), darker for more entries.
    pub fn write_cells_png(&self, grid: &CellGrid, transform: &CoordinateTransform) -> AlignResult<bool> {
        let (width, height) = (transform.cell_column_count(), transform.cell_row_count());
        if !self.image_fits(CELLS_PNG, width, height) {
            return Ok(false);
        }

        let max_count = grid.max_entry_count().max(1) as f32;
        let mut img = RgbImage::from_pixel(width, height, EVEN_CELL_COLOR);
        for ((ix, iy), cell) in grid.iter() {
            let level = 255.0 - 255.0 * (cell.entry_count as f32 / max_count);
            let level = level.clamp(0.0, 224.0) as u8;
            img.put_pixel(ix, iy, Rgb([level, level, level]));
        }
        img.save(self.path(CELLS_PNG))?;
        Ok(true)
    }
}
