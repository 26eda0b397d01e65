//! Serializable results of pipeline runs

use crate::references::ReferenceIdentifier;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a full (or partial) pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub project_root: PathBuf,
    pub discovered: Vec<ReferenceIdentifier>,
    pub missing: Vec<ReferenceIdentifier>,
    pub installed: Vec<String>,
    pub build_succeeded: bool,
    pub build_log: PathBuf,
    pub error_report: PathBuf,
    /// Report lines, in report order
    pub errors: Vec<String>,
}

/// Result of scanning and filtering a project without installing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub project_root: PathBuf,
    pub known_roots: Vec<String>,
    pub discovered: Vec<ReferenceIdentifier>,
    pub satisfied: Vec<ReferenceIdentifier>,
    pub missing: Vec<ReferenceIdentifier>,
}
