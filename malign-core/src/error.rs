//! Error type shared by all alignment phases.

use thiserror::Error;

/// Errors that can occur during marker alignment
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Alignment not found: the two sequences share no markers or features")]
    NoMatches,

    #[error("Alignment not found: no cell holds {min_entry_count} or more of the {entry_count} matrix entries")]
    EmptyBand { entry_count: u64, min_entry_count: u32 },

    #[error("Alignment not found: the banded path contains no matching markers")]
    DegeneratePath,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl AlignError {
    /// True for the outcomes that mean "these two sequences do not align",
    /// as opposed to bad arguments or I/O failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AlignError::NoMatches | AlignError::EmptyBand { .. } | AlignError::DegeneratePath
        )
    }
}

pub type AlignResult<T> = Result<T, AlignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(AlignError::NoMatches.is_not_found());
        assert!(AlignError::DegeneratePath.is_not_found());
        assert!(AlignError::EmptyBand { entry_count: 3, min_entry_count: 10 }.is_not_found());
        assert!(!AlignError::InvalidOptions("deltaX".into()).is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = AlignError::EmptyBand { entry_count: 3, min_entry_count: 10 };
        assert_eq!(
            err.to_string(),
            "Alignment not found: no cell holds 10 or more of the 3 matrix entries"
        );
    }
}
