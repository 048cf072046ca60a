//! Entry points of the aligner.
//!
//! An alignment runs in phases:
//!
//! 1. Sort the markers (or features) of each sequence.
//! 2. Join the sorted lists into the sparse alignment matrix.
//! 3. Bin the matrix entries into cells and keep the dense ones.
//! 4. Run banded dynamic programming in marker space, inside the selected cells.
//!
//! The matrix is built in feature space when the feature length is 2 or more,
//! and the dynamic programming always runs on markers.

use crate::band::Band;
use crate::banded::BandedAligner;
use crate::cells::CellGrid;
use crate::coords::CoordinateTransform;
use crate::debug::{DebugWriter, FEATURE_SPACE_PNG, MARKER_SPACE_PNG};
use crate::error::{AlignError, AlignResult};
use crate::matrix::{for_each_match, SparseMatrix};
use crate::options::Options;
use crate::sorting::{sort_features, sort_markers};
use crate::types::{Alignment, AlignmentInfo, KmerId};
use std::path::Path;

/// Align two marker sequences with features of a compile-time length `M`.
///
/// `work_area` holds the alignment matrix. It is cleared on entry and can be
/// reused across calls. If `debug` is set, debug files are written to that
/// directory; failures to write them are logged and do not affect the result.
pub fn align_with_feature_length<const M: usize>(
    markers0: &[KmerId],
    markers1: &[KmerId],
    options: &Options,
    work_area: &mut SparseMatrix,
    debug: Option<&Path>,
) -> AlignResult<(Alignment, AlignmentInfo)> {
    Aligner::<M>::new(markers0, markers1, options)?.run(work_area, debug)
}

/// Align two marker sequences, with the feature length taken from `options.m`.
///
/// Feature lengths 0 and 1 both mean that the alignment matrix is built in
/// marker space.
pub fn align(
    markers0: &[KmerId],
    markers1: &[KmerId],
    options: &Options,
    work_area: &mut SparseMatrix,
    debug: Option<&Path>,
) -> AlignResult<(Alignment, AlignmentInfo)> {
    options.validate()?;
    match options.feature_length() {
        1 => align_with_feature_length::<1>(markers0, markers1, options, work_area, debug),
        2 => align_with_feature_length::<2>(markers0, markers1, options, work_area, debug),
        3 => align_with_feature_length::<3>(markers0, markers1, options, work_area, debug),
        4 => align_with_feature_length::<4>(markers0, markers1, options, work_area, debug),
        5 => align_with_feature_length::<5>(markers0, markers1, options, work_area, debug),
        6 => align_with_feature_length::<6>(markers0, markers1, options, work_area, debug),
        7 => align_with_feature_length::<7>(markers0, markers1, options, work_area, debug),
        8 => align_with_feature_length::<8>(markers0, markers1, options, work_area, debug),
        m => Err(AlignError::InvalidOptions(format!("unsupported feature length {}", m))),
    }
}

struct Aligner<'a, const M: usize> {
    markers0: &'a [KmerId],
    markers1: &'a [KmerId],
    options: &'a Options,
    transform: CoordinateTransform,
}

impl<'a, const M: usize> Aligner<'a, M> {
    fn new(markers0: &'a [KmerId], markers1: &'a [KmerId], options: &'a Options) -> AlignResult<Self> {
        options.validate_for(markers0.len(), markers1.len(), M)?;
        let transform = CoordinateTransform::new(
            markers0.len() as u32,
            markers1.len() as u32,
            options.delta_x,
            options.delta_y,
        );
        Ok(Self {
            markers0,
            markers1,
            options,
            transform,
        })
    }

    fn run(&self, matrix: &mut SparseMatrix, debug: Option<&Path>) -> AlignResult<(Alignment, AlignmentInfo)> {
        log::debug!(
            "Aligning {} and {} markers, feature length {}",
            self.markers0.len(),
            self.markers1.len(),
            M
        );

        if M == 1 {
            matrix.build(&sort_markers(self.markers0), &sort_markers(self.markers1), &self.transform);
        } else {
            matrix.build(
                &sort_features::<M>(self.markers0),
                &sort_features::<M>(self.markers1),
                &self.transform,
            );
        }
        let entry_count = matrix.entry_count() as u64;
        log::debug!("Alignment matrix has {} entries", entry_count);

        let grid = CellGrid::from_matrix(matrix, self.options.min_entry_count_per_cell);
        log::debug!("Selected {} cells", grid.cell_count());

        if let Some(dir) = debug {
            if let Err(e) = self.write_debug_output(dir, matrix, &grid) {
                log::warn!("Could not write debug output to {}: {}", dir.display(), e);
            }
        }

        if matrix.is_empty() {
            return Err(AlignError::NoMatches);
        }
        if grid.is_empty() {
            return Err(AlignError::EmptyBand {
                entry_count,
                min_entry_count: self.options.min_entry_count_per_cell,
            });
        }

        let band = Band::from_cells(&grid, &self.transform, self.options.band_padding);
        log::debug!("Band has {} nodes", band.len());

        let (alignment, mut info) =
            BandedAligner::new(self.options.scoring()).align(self.markers0, self.markers1, &band)?;
        info.matrix_entry_count = entry_count;
        info.cell_count = grid.cell_count() as u64;
        info.band_size = band.len() as u64;

        log::debug!(
            "Alignment score {}: {} matches, {} mismatches, {} gaps",
            info.score,
            info.match_count,
            info.mismatch_count,
            info.gap_count()
        );
        Ok((alignment, info))
    }

    fn write_debug_output(&self, dir: &Path, matrix: &SparseMatrix, grid: &CellGrid) -> AlignResult<()> {
        let writer = DebugWriter::new(dir)?;

        if M == 1 {
            writer.write_matrix_png(MARKER_SPACE_PNG, &self.transform, matrix.entries().map(|(_, e)| e.xy))?;
        } else {
            // The matrix is in feature space, so marker matches are found again.
            let mut marker_matches = Vec::new();
            for_each_match(&sort_markers(self.markers0), &sort_markers(self.markers1), |xy| {
                marker_matches.push(xy)
            });
            writer.write_matrix_png(MARKER_SPACE_PNG, &self.transform, marker_matches)?;
            writer.write_matrix_png(FEATURE_SPACE_PNG, &self.transform, matrix.entries().map(|(_, e)| e.xy))?;
        }

        writer.write_matrix_csv(matrix, &self.transform)?;
        writer.write_cells_csv(grid)?;
        writer.write_cells_png(grid, &self.transform)?;
        Ok(())
    }
}
