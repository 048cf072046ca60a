//! Many independent alignments in parallel.

use crate::align::align;
use crate::error::AlignResult;
use crate::matrix::SparseMatrix;
use crate::options::Options;
use crate::types::{Alignment, AlignmentInfo, KmerId};
use rayon::prelude::*;

/// A pair of marker sequences to align.
pub type SequencePair<'a> = (&'a [KmerId], &'a [KmerId]);

/// Align each pair on the rayon thread pool.
///
/// Each worker thread owns one work area and reuses it for all the pairs it
/// processes. Results are in the same order as `pairs`.
pub fn align_batch(
    pairs: &[SequencePair<'_>],
    options: &Options,
) -> Vec<AlignResult<(Alignment, AlignmentInfo)>> {
    log::debug!("Aligning {} sequence pairs", pairs.len());
    pairs
        .par_iter()
        .map_init(SparseMatrix::new, |work_area, &(markers0, markers1)| {
            align(markers0, markers1, options, work_area, None)
        })
        .collect()
}
