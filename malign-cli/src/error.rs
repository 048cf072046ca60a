//! Error handling for malign CLI

use std::path::PathBuf;
use thiserror::Error;

/// Errors in the command-line inputs, reported with suggestions
#[derive(Error, Debug)]
pub enum CliError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Alignment failed for {pair}: {source}")]
    Alignment {
        pair: String,
        #[source]
        source: malign_core::AlignError,
    },
}

impl CliError {
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn parse<S: Into<String>, T: Into<String>>(file: S, message: T) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn alignment<S: Into<String>>(pair: S, source: malign_core::AlignError) -> Self {
        Self::Alignment {
            pair: pair.into(),
            source,
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Paths in a pairs file are relative to the pairs file",
                path.display()
            ));
        }

        CliError::Parse { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Marker files contain whitespace-separated unsigned integers\n\
                 • Use '#' to start a comment",
            );
        }

        CliError::Alignment { source, .. } if source.is_not_found() => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Lower --min-entry-count-per-cell or increase --delta-y\n\
                 • Use a shorter feature length with -m",
            );
        }

        CliError::Alignment { .. } => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
