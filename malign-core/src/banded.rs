//! Banded dynamic programming over the band.
//!
//! Node (x,y) holds the best score of a path that has consumed markers
//! `0..=x` of the first sequence and `0..=y` of the second. Its predecessors
//! are (x-1,y-1) through a match or mismatch, (x-1,y) leaving marker x
//! unaligned, and (x,y-1) leaving marker y unaligned. Nodes outside the band
//! are unreachable. The empty prefix of either sequence (x = -1 or y = -1) is
//! not stored: its score only depends on how many markers it skips.

use crate::band::Band;
use crate::error::{AlignError, AlignResult};
use crate::options::{AlignmentMode, Scoring};
use crate::types::{Alignment, AlignmentInfo, AlignmentOperation, KmerId};

const UNREACHABLE: i64 = i64::MIN / 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// The path starts here (local alignment).
    Start,
    Diagonal,
    /// From (x, y-1).
    GapIn0,
    /// From (x-1, y).
    GapIn1,
}

pub struct BandedAligner {
    scoring: Scoring,
}

impl BandedAligner {
    pub fn new(scoring: Scoring) -> Self {
        Self { scoring }
    }

    /// Score of a path that has skipped `skipped` markers before reaching the band.
    #[inline]
    fn boundary_score(&self, skipped: u32) -> i64 {
        match self.scoring.mode {
            AlignmentMode::Global => self.scoring.gap_score * skipped as i64,
            AlignmentMode::SemiGlobal | AlignmentMode::Local => 0,
        }
    }

    /// Score of a path that ends at (x,y), or `None` if it cannot end there.
    /// In global mode the markers after (x,y) are scored as gaps.
    fn terminal_score(&self, score: i64, x: u32, y: u32, nx: u32, ny: u32) -> Option<i64> {
        match self.scoring.mode {
            AlignmentMode::Global => Some(score + self.boundary_score((nx - 1 - x) + (ny - 1 - y))),
            AlignmentMode::SemiGlobal if x == nx - 1 || y == ny - 1 => Some(score),
            AlignmentMode::SemiGlobal => None,
            AlignmentMode::Local => Some(score),
        }
    }

    /// Align two marker sequences inside a band built for them.
    pub fn align(
        &self,
        seq0: &[KmerId],
        seq1: &[KmerId],
        band: &Band,
    ) -> AlignResult<(Alignment, AlignmentInfo)> {
        let nx = seq0.len() as u32;
        let ny = seq1.len() as u32;
        if band.nx() != nx || band.ny() != ny {
            return Err(AlignError::InvalidInput(format!(
                "band is {}x{} but sequences have {} and {} markers",
                band.nx(),
                band.ny(),
                nx,
                ny
            )));
        }
        if band.is_empty() {
            return Err(AlignError::DegeneratePath);
        }

        let mut scores = vec![UNREACHABLE; band.len()];
        let mut steps = vec![Step::Start; band.len()];
        let gap = self.scoring.gap_score;

        // Best terminal node: (score, node, x, y).
        let mut best: Option<(i64, usize, u32, u32)> = None;

        let mut node = 0;
        for x in 0..nx {
            for &(lo, hi) in band.column(x) {
                for y in lo..=hi {
                    let substitution =
                        self.scoring.substitution(seq0[x as usize] == seq1[y as usize]);
                    let mut score = UNREACHABLE;
                    let mut step = Step::Start;

                    let diagonal = if x == 0 || y == 0 {
                        Some(self.boundary_score(x.max(y)))
                    } else {
                        band.index(x - 1, y - 1).map(|k| scores[k])
                    };
                    if let Some(previous) = diagonal.filter(|&s| s > UNREACHABLE) {
                        score = previous + substitution;
                        step = Step::Diagonal;
                    }

                    let from_left = if x == 0 {
                        Some(self.boundary_score(y + 1))
                    } else {
                        band.index(x - 1, y).map(|k| scores[k])
                    };
                    if let Some(previous) = from_left.filter(|&s| s > UNREACHABLE) {
                        if previous + gap > score {
                            score = previous + gap;
                            step = Step::GapIn1;
                        }
                    }

                    // Intervals of a column are disjoint and not adjacent,
                    // so (x, y-1) is in the band only inside the same interval.
                    let from_below = if y == 0 {
                        Some(self.boundary_score(x + 1))
                    } else if y > lo {
                        Some(scores[node - 1])
                    } else {
                        None
                    };
                    if let Some(previous) = from_below.filter(|&s| s > UNREACHABLE) {
                        if previous + gap > score {
                            score = previous + gap;
                            step = Step::GapIn0;
                        }
                    }

                    if self.scoring.mode == AlignmentMode::Local && substitution > score {
                        score = substitution;
                        step = Step::Start;
                    }

                    scores[node] = score;
                    steps[node] = step;

                    if score > UNREACHABLE {
                        if let Some(end_score) = self.terminal_score(score, x, y, nx, ny) {
                            if best.map_or(true, |(best_score, ..)| end_score > best_score) {
                                best = Some((end_score, node, x, y));
                            }
                        }
                    }
                    node += 1;
                }
            }
        }

        let (score, terminal, x, y) = best.ok_or(AlignError::DegeneratePath)?;
        let alignment = self.backtrack(seq0, seq1, band, &steps, terminal, x, y)?;
        let info = AlignmentInfo::from_alignment(&alignment, nx, ny, score);
        if info.match_count == 0 {
            return Err(AlignError::DegeneratePath);
        }

        log::trace!(
            "Banded alignment: {} band nodes, score {}, {} matches",
            band.len(),
            score,
            info.match_count
        );
        Ok((alignment, info))
    }

    #[allow(clippy::too_many_arguments)]
    fn backtrack(
        &self,
        seq0: &[KmerId],
        seq1: &[KmerId],
        band: &Band,
        steps: &[Step],
        terminal: usize,
        mut x: u32,
        mut y: u32,
    ) -> AlignResult<Alignment> {
        let aligned = |x: u32, y: u32| {
            if seq0[x as usize] == seq1[y as usize] {
                AlignmentOperation::Match { x, y }
            } else {
                AlignmentOperation::Mismatch { x, y }
            }
        };

        let mut operations = Vec::new();
        let mut node = terminal;

        // Operations are collected from the end of the path backwards.
        if self.scoring.mode == AlignmentMode::Global {
            let (nx, ny) = (band.nx(), band.ny());
            operations.extend((y + 1..ny).rev().map(|y| AlignmentOperation::GapIn0 { y }));
            operations.extend((x + 1..nx).rev().map(|x| AlignmentOperation::GapIn1 { x }));
        }

        // Markers before the start of the path, which are only part of the
        // alignment when end gaps are scored.
        let leading: Option<(u32, u32)> = loop {
            match steps[node] {
                Step::Start => {
                    operations.push(aligned(x, y));
                    break None;
                }
                Step::Diagonal => {
                    operations.push(aligned(x, y));
                    if x == 0 || y == 0 {
                        break Some((x, y));
                    }
                    x -= 1;
                    y -= 1;
                }
                Step::GapIn1 => {
                    operations.push(AlignmentOperation::GapIn1 { x });
                    if x == 0 {
                        break Some((0, y + 1));
                    }
                    x -= 1;
                }
                Step::GapIn0 => {
                    operations.push(AlignmentOperation::GapIn0 { y });
                    if y == 0 {
                        break Some((x + 1, 0));
                    }
                    y -= 1;
                }
            }
            node = band.index(x, y).ok_or(AlignError::DegeneratePath)?;
        };

        // Here `leading` holds the number of unconsumed markers of each sequence.
        if let (Some((skipped_x, skipped_y)), AlignmentMode::Global) = (leading, self.scoring.mode) {
            operations.extend((0..skipped_y).rev().map(|y| AlignmentOperation::GapIn0 { y }));
            operations.extend((0..skipped_x).rev().map(|x| AlignmentOperation::GapIn1 { x }));
        }

        operations.reverse();
        Ok(Alignment::new(operations))
    }
}
