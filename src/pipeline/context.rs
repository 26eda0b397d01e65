//! Per-run state threaded through the pipeline phases

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::AutobuildConfig;
use crate::diagnostics::ErrorReport;
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::references::{KnownNamespaces, ReferenceIdentifier};
use crate::toolchain::{ProjectTemplate, Toolchain};

use super::phases::build::BuildOutcome;
use super::summary::PipelineSummary;
use super::BacklogPaths;

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    /// Project name; also the project directory name and a known namespace root
    pub project_name: String,
    /// Generated sources merged into the new project (merge is skipped when `None`)
    pub source_dir: Option<PathBuf>,
    /// Directory the project is created in
    pub workdir: PathBuf,
    /// Reuse an existing project instead of creating, merging and cleaning one
    pub skip_scaffold: bool,
}

impl PipelineRequest {
    pub fn new(project_name: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            project_name: project_name.into(),
            source_dir: None,
            workdir: workdir.into(),
            skip_scaffold: false,
        }
    }

    /// Request targeting an already scaffolded project directory.
    ///
    /// The directory name doubles as the project name.
    pub fn for_project_dir(project_root: &Path) -> Self {
        let project_name = project_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let workdir = project_root
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            project_name,
            source_dir: None,
            workdir,
            skip_scaffold: true,
        }
    }

    pub fn with_source(mut self, source_dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(source_dir.into());
        self
    }

    pub fn project_root(&self) -> PathBuf {
        self.workdir.join(&self.project_name)
    }
}

/// Collaborators plus the data each stage hands to the next.
pub struct RunContext<'a> {
    pub config: &'a AutobuildConfig,
    pub toolchain: &'a dyn Toolchain,
    pub progress: &'a dyn ProgressHandler,
    pub request: &'a PipelineRequest,

    pub project_root: PathBuf,
    pub discovered: BTreeSet<ReferenceIdentifier>,
    pub missing: Vec<ReferenceIdentifier>,
    pub installed: Vec<String>,
    pub build: Option<BuildOutcome>,
    pub report: Option<ErrorReport>,
}

impl<'a> RunContext<'a> {
    pub fn new(
        config: &'a AutobuildConfig,
        toolchain: &'a dyn Toolchain,
        progress: &'a dyn ProgressHandler,
        request: &'a PipelineRequest,
    ) -> Self {
        Self {
            config,
            toolchain,
            progress,
            request,
            project_root: request.project_root(),
            discovered: BTreeSet::new(),
            missing: Vec::new(),
            installed: Vec::new(),
            build: None,
            report: None,
        }
    }

    pub fn emit(&self, event: ProgressEvent) {
        self.progress.on_progress(&event);
    }

    pub fn template(&self) -> ProjectTemplate {
        self.config.template(&self.request.project_name)
    }

    pub fn known_namespaces(&self) -> KnownNamespaces {
        self.config.known_namespaces(&self.request.project_name)
    }

    pub fn backlog(&self) -> BacklogPaths {
        BacklogPaths::for_project(&self.project_root)
    }

    pub fn into_summary(self) -> PipelineSummary {
        let backlog = self.backlog();
        let error_lines = self
            .report
            .as_ref()
            .map(|r| r.iter().map(|e| e.as_str().to_string()).collect())
            .unwrap_or_default();

        PipelineSummary {
            project_root: self.project_root,
            discovered: self.discovered.into_iter().collect(),
            missing: self.missing,
            installed: self.installed,
            build_succeeded: self.build.as_ref().is_some_and(|b| b.success),
            build_log: backlog.build_log,
            error_report: backlog.error_report,
            errors: error_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_project_root() {
        let request = PipelineRequest::new("ProjectName", "/work").with_source("/gen");
        assert_eq!(request.project_root(), PathBuf::from("/work/ProjectName"));
        assert_eq!(request.source_dir, Some(PathBuf::from("/gen")));
        assert!(!request.skip_scaffold);
    }

    #[test]
    fn test_request_for_project_dir() {
        let request = PipelineRequest::for_project_dir(Path::new("/work/ProjectName"));
        assert_eq!(request.project_name, "ProjectName");
        assert_eq!(request.workdir, PathBuf::from("/work"));
        assert!(request.skip_scaffold);
        assert_eq!(request.project_root(), PathBuf::from("/work/ProjectName"));
    }
}
