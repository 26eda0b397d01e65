use super::WorkflowPhase;
use crate::pipeline::{BacklogPaths, PipelineError, RunContext, Stage};
use crate::progress::ProgressEvent;
use crate::toolchain::Toolchain;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Result of one build invocation. A failed build is still a valid outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOutcome {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub descriptor: PathBuf,
    pub log_path: PathBuf,
    pub duration_ms: u64,
}

/// Finds the single `*.<extension>` file directly inside `dir`.
pub fn find_descriptor(dir: &Path, extension: &str) -> Result<PathBuf, PipelineError> {
    let entries = fs::read_dir(dir).map_err(|e| PipelineError::io(dir, e))?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(extension))
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(PipelineError::MissingDescriptor {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(PipelineError::AmbiguousDescriptor {
            dir: dir.to_path_buf(),
            candidates: candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
        }),
    }
}

/// Builds a project and captures everything the toolchain prints.
pub struct BuildRunner<'a> {
    toolchain: &'a dyn Toolchain,
    descriptor_extension: &'a str,
}

impl<'a> BuildRunner<'a> {
    pub fn new(toolchain: &'a dyn Toolchain, descriptor_extension: &'a str) -> Self {
        Self {
            toolchain,
            descriptor_extension,
        }
    }

    /// Runs the build for `project_root`, overwriting `backlog/build_log.txt`.
    ///
    /// The backlog directory is only created once a descriptor has been found.
    pub fn run(&self, project_root: &Path) -> Result<BuildOutcome, PipelineError> {
        let descriptor = find_descriptor(project_root, self.descriptor_extension)?;
        let backlog = BacklogPaths::for_project(project_root);

        fs::create_dir_all(&backlog.dir).map_err(|e| PipelineError::io(&backlog.dir, e))?;
        let log = File::create(&backlog.build_log)
            .map_err(|e| PipelineError::io(&backlog.build_log, e))?;

        let start = Instant::now();
        let outcome = self.toolchain.build(&descriptor, log)?;
        let duration_ms = start.elapsed().as_millis() as u64;

        if outcome.success {
            info!(descriptor = %descriptor.display(), duration_ms, "Build succeeded");
        } else {
            warn!(
                descriptor = %descriptor.display(),
                exit_code = ?outcome.code,
                log = %backlog.build_log.display(),
                "Build failed"
            );
        }

        Ok(BuildOutcome {
            success: outcome.success,
            exit_code: outcome.code,
            descriptor,
            log_path: backlog.build_log,
            duration_ms,
        })
    }
}

pub struct BuildPhase;

impl WorkflowPhase for BuildPhase {
    fn stage(&self) -> Stage {
        Stage::Build
    }

    fn execute(&self, context: &mut RunContext<'_>) -> Result<(), PipelineError> {
        let runner = BuildRunner::new(context.toolchain, &context.config.descriptor_extension);
        let outcome = runner.run(&context.project_root)?;

        context.emit(ProgressEvent::BuildFinished {
            success: outcome.success,
            build_time: Duration::from_millis(outcome.duration_ms),
        });
        context.build = Some(outcome);
        Ok(())
    }
}
