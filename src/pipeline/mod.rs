//! Bootstrap-and-diagnose pipeline
//!
//! Stages run strictly in order, each finishing (including every toolchain
//! invocation it makes) before the next starts:
//!
//! create → merge → clean → resolve → install → build → reduce
//!
//! Failures in create, merge, clean, resolve, install or descriptor discovery
//! abort the run. A build that exits non-zero does not; its log is what the
//! reduce stage exists to process.

pub mod context;
pub mod error;
pub mod orchestrator;
pub mod phases;
pub mod summary;

pub use context::{PipelineRequest, RunContext};
pub use error::PipelineError;
pub use orchestrator::{Pipeline, StageError};
pub use phases::build::{find_descriptor, BuildOutcome, BuildRunner};
pub use phases::clean::{clean_template, strip_placeholder_items, CleanSummary};
pub use phases::create::create_project;
pub use phases::install::PackageInstaller;
pub use phases::merge::merge_sources;
pub use phases::resolve::resolve;
pub use phases::WorkflowPhase;
pub use summary::{PipelineSummary, ScanSummary};

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Directory under the project root holding the durable run artifacts
pub const BACKLOG_DIR: &str = "backlog";
/// Raw combined build output, overwritten each run
pub const BUILD_LOG_FILE: &str = "build_log.txt";
/// Reduced error report, overwritten each run
pub const ERROR_REPORT_FILE: &str = "build_error_log.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Create,
    Merge,
    Clean,
    Resolve,
    Install,
    Build,
    Reduce,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Create => "create",
            Stage::Merge => "merge",
            Stage::Clean => "clean",
            Stage::Resolve => "resolve",
            Stage::Install => "install",
            Stage::Build => "build",
            Stage::Reduce => "reduce",
        };
        f.write_str(name)
    }
}

/// Locations of the run artifacts for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BacklogPaths {
    pub dir: PathBuf,
    pub build_log: PathBuf,
    pub error_report: PathBuf,
}

impl BacklogPaths {
    pub fn for_project(project_root: &Path) -> Self {
        let dir = project_root.join(BACKLOG_DIR);
        Self {
            build_log: dir.join(BUILD_LOG_FILE),
            error_report: dir.join(ERROR_REPORT_FILE),
            dir,
        }
    }
}
