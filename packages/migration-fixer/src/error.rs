//! Typed errors for the migration fixer.
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning or fixing the migrations root.
#[derive(Debug, Error)]
pub enum FixError {
    /// The migrations root does not exist
    #[error("migrations directory not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// Listing the migrations root failed
    #[error("failed to read {}", path.display())]
    ReadRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Renaming the candidate failed
    #[error("failed to rename {} to {}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Recursive removal of the candidate failed
    #[error("failed to remove {}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the candidate for its content summary failed
    #[error("failed to inspect {}", path.display())]
    Summarize {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Confirmation prompt could not be shown
    #[error("confirmation prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}
