// error.rs — The exporter's two failure kinds.
//
// Anything that goes wrong reading the input table is a `Load`; anything
// that goes wrong producing artifacts in the output directory is a `Write`.
// Neither is recovered locally: both propagate to main and end the run.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Input file missing, unreadable, or not parseable as a labeled
    /// numeric table.
    #[error("failed to load embedding table from {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    /// Output directory or artifact creation/persistence failure.
    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

impl ExportError {
    pub fn load(path: &Path, reason: impl Display) -> Self {
        Self::Load {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn write(path: &Path, reason: impl Display) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
