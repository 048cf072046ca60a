//! malign Core Library
//!
//! Sparse banded alignment of marker sequences: features, sort-merge join into
//! a sparse alignment matrix, cell binning in diagonal space, and banded
//! dynamic programming with backtrack.

pub mod types;
pub mod error;
pub mod options;
pub mod feature;
pub mod sorting;
pub mod coords;
pub mod matrix;
pub mod cells;
pub mod band;
pub mod banded;
pub mod align;
pub mod batch;
pub mod debug;

// Re-export commonly used types and functions
pub use types::{Alignment, AlignmentInfo, AlignmentOperation, Coordinates, KmerId};
pub use error::{AlignError, AlignResult};
pub use options::{AlignmentMode, Options, Scoring, MAX_FEATURE_LENGTH};
pub use coords::CoordinateTransform;
pub use matrix::{MatrixEntry, SparseMatrix};
pub use cells::{Cell, CellGrid};
pub use band::Band;
pub use banded::BandedAligner;
pub use align::{align, align_with_feature_length};
pub use batch::{align_batch, SequencePair};

/// Version information for the malign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
