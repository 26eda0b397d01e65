//! Error taxonomy for pipeline stages
//!
//! A failed build is not in here: it is a normal [`BuildOutcome`](super::BuildOutcome)
//! that still gets reduced.

use crate::toolchain::{describe_exit, ToolchainError};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Project creation failed for '{name}' ({})", describe_exit(.code))]
    Scaffold { name: String, code: Option<i32> },

    #[error("Source directory does not exist: {0}")]
    SourceNotFound(PathBuf),

    #[error("Install failed for package '{package}' ({})", describe_exit(.code))]
    Install {
        package: String,
        code: Option<i32>,
        output: String,
    },

    #[error("No *.{extension} build descriptor found in {dir}")]
    MissingDescriptor { dir: PathBuf, extension: String },

    #[error("Expected one build descriptor in {dir}, found {}", describe_candidates(.candidates))]
    AmbiguousDescriptor {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    #[error("Build log not found: {0} (has the build run?)")]
    MissingLog(PathBuf),

    #[error("Scan root does not exist: {0}")]
    ScanRootNotFound(PathBuf),

    #[error("Failed to parse build descriptor {path}: {message}")]
    DescriptorParse { path: PathBuf, message: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    #[error("Invalid declaration pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

fn describe_candidates(candidates: &[String]) -> String {
    format!("{}: {}", candidates.len(), candidates.join(", "))
}

impl PipelineError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        PipelineError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
