//! Alignment options.
//!
//! `Options` is the whole configuration surface of the engine. It is plain data,
//! deserializable from the `[align]` table of a TOML configuration file.

use crate::error::{AlignError, AlignResult};
use serde::{Deserialize, Serialize};

/// Largest feature length with a compiled specialization.
pub const MAX_FEATURE_LENGTH: usize = 8;

/// Where the alignment path may start and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentMode {
    /// The path covers both sequences end to end; end gaps are scored.
    Global,
    /// The path starts at x=0 or y=0 and ends at x=nx-1 or y=ny-1; end gaps are free.
    #[default]
    SemiGlobal,
    /// The path may start and end anywhere.
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Feature length. 0 or 1 means the alignment matrix is built in marker space.
    pub m: u32,
    /// Cell size in the X (along the diagonal) direction.
    pub delta_x: u32,
    /// Cell size in the Y (across diagonals) direction.
    pub delta_y: u32,
    /// Cells with fewer alignment matrix entries are not part of the band.
    pub min_entry_count_per_cell: u32,
    /// Number of neighboring cells added around each selected cell.
    pub band_padding: u32,
    pub match_score: i64,
    pub mismatch_score: i64,
    pub gap_score: i64,
    pub mode: AlignmentMode,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            m: 2,
            delta_x: 200,
            delta_y: 10,
            min_entry_count_per_cell: 10,
            band_padding: 1,
            match_score: 6,
            mismatch_score: -1,
            gap_score: -1,
            mode: AlignmentMode::SemiGlobal,
        }
    }
}

impl Options {
    /// Number of markers per feature, with 0 mapped to marker space.
    pub fn feature_length(&self) -> usize {
        (self.m as usize).max(1)
    }

    pub fn scoring(&self) -> Scoring {
        Scoring {
            match_score: self.match_score,
            mismatch_score: self.mismatch_score,
            gap_score: self.gap_score,
            mode: self.mode,
        }
    }

    /// Check the options on their own, independently of the input sequences.
    pub fn validate(&self) -> AlignResult<()> {
        if self.delta_x == 0 || self.delta_y == 0 {
            return Err(AlignError::InvalidOptions(format!(
                "cell sizes must be positive (delta_x={}, delta_y={})",
                self.delta_x, self.delta_y
            )));
        }
        if self.feature_length() > MAX_FEATURE_LENGTH {
            return Err(AlignError::InvalidOptions(format!(
                "feature length m={} is not supported, maximum is {}",
                self.m, MAX_FEATURE_LENGTH
            )));
        }
        Ok(())
    }

    /// Check the options against the lengths of the two marker sequences,
    /// for features of `m` markers.
    pub fn validate_for(&self, nx: usize, ny: usize, m: usize) -> AlignResult<()> {
        self.validate()?;

        if nx == 0 || ny == 0 {
            return Err(AlignError::InvalidInput(format!(
                "cannot align an empty marker sequence (nx={}, ny={})",
                nx, ny
            )));
        }
        if m == 0 || m > nx.min(ny) {
            return Err(AlignError::InvalidInput(format!(
                "feature length {} does not fit sequences of {} and {} markers",
                m, nx, ny
            )));
        }
        // X and Y go up to nx + ny - 2 and are stored as u32.
        if (nx as u64) + (ny as u64) - 1 > u32::MAX as u64 {
            return Err(AlignError::InvalidInput(format!(
                "sequences of {} and {} markers are too long",
                nx, ny
            )));
        }
        Ok(())
    }
}

/// Dynamic programming weights and end policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoring {
    pub match_score: i64,
    pub mismatch_score: i64,
    pub gap_score: i64,
    pub mode: AlignmentMode,
}

impl Scoring {
    #[inline]
    pub fn substitution(&self, same: bool) -> i64 {
        if same {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}
