use serde::{Deserialize, Serialize};

/// Marker symbol identifier.
pub type KmerId = u32;

/// Used to store (x,y), (X,Y), or (iX,iY).
pub type Coordinates = (u32, u32);

/// One step of an alignment path.
///
/// `x` is an ordinal in the first marker sequence, `y` an ordinal in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignmentOperation {
    /// Markers `x` and `y` are aligned and identical.
    Match { x: u32, y: u32 },
    /// Markers `x` and `y` are aligned but differ.
    Mismatch { x: u32, y: u32 },
    /// Marker `y` of the second sequence has no partner in the first.
    GapIn0 { y: u32 },
    /// Marker `x` of the first sequence has no partner in the second.
    GapIn1 { x: u32 },
}

impl AlignmentOperation {
    /// Ordinals of the aligned pair, if this step aligns two markers.
    pub fn aligned_pair(&self) -> Option<Coordinates> {
        match *self {
            AlignmentOperation::Match { x, y } | AlignmentOperation::Mismatch { x, y } => Some((x, y)),
            AlignmentOperation::GapIn0 { .. } | AlignmentOperation::GapIn1 { .. } => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, AlignmentOperation::Match { .. })
    }
}

/// The correspondence found between two marker sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub operations: Vec<AlignmentOperation>,
}

impl Alignment {
    pub fn new(operations: Vec<AlignmentOperation>) -> Self {
        Self { operations }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Pairs of ordinals of identical aligned markers, in path order.
    pub fn ordinals(&self) -> impl Iterator<Item = Coordinates> + '_ {
        self.operations
            .iter()
            .filter(|op| op.is_match())
            .filter_map(AlignmentOperation::aligned_pair)
    }

    /// Pairs of ordinals of all aligned markers (matches and mismatches).
    pub fn aligned_pairs(&self) -> impl Iterator<Item = Coordinates> + '_ {
        self.operations.iter().filter_map(AlignmentOperation::aligned_pair)
    }
}

/// Summary statistics of an alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentInfo {
    /// Number of markers in the two sequences.
    pub nx: u32,
    pub ny: u32,

    pub match_count: u32,
    pub mismatch_count: u32,
    /// Markers of the second sequence skipped by the path.
    pub gap_count_0: u32,
    /// Markers of the first sequence skipped by the path.
    pub gap_count_1: u32,
    pub score: i64,

    /// First and last aligned pair (match or mismatch).
    pub first_ordinals: Option<Coordinates>,
    pub last_ordinals: Option<Coordinates>,

    // Diagnostics of the sparse phases.
    pub matrix_entry_count: u64,
    pub cell_count: u64,
    pub band_size: u64,
}

impl AlignmentInfo {
    /// Tally the operations of an alignment.
    pub fn from_alignment(alignment: &Alignment, nx: u32, ny: u32, score: i64) -> Self {
        let mut info = Self {
            nx,
            ny,
            score,
            ..Default::default()
        };

        for op in &alignment.operations {
            match op {
                AlignmentOperation::Match { .. } => info.match_count += 1,
                AlignmentOperation::Mismatch { .. } => info.mismatch_count += 1,
                AlignmentOperation::GapIn0 { .. } => info.gap_count_0 += 1,
                AlignmentOperation::GapIn1 { .. } => info.gap_count_1 += 1,
            }
        }

        info.first_ordinals = alignment.aligned_pairs().next();
        info.last_ordinals = alignment.aligned_pairs().last();
        info
    }

    pub fn gap_count(&self) -> u32 {
        self.gap_count_0 + self.gap_count_1
    }

    /// Fraction of path steps that are matches.
    pub fn identity(&self) -> f64 {
        let total = self.match_count + self.mismatch_count + self.gap_count();
        if total == 0 {
            return 0.0;
        }
        self.match_count as f64 / total as f64
    }

    /// Number of markers spanned by the aligned region in each sequence.
    pub fn aligned_range_lengths(&self) -> (u32, u32) {
        match (self.first_ordinals, self.last_ordinals) {
            (Some((x0, y0)), Some((x1, y1))) => (x1 - x0 + 1, y1 - y0 + 1),
            _ => (0, 0),
        }
    }
}
