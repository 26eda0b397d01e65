use super::WorkflowPhase;
use crate::pipeline::{PipelineError, RunContext, Stage};
use crate::progress::ProgressEvent;
use crate::toolchain::{project_root, ProjectTemplate, Toolchain};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Scaffolds a new project from `template` inside `workdir` and returns its root.
pub fn create_project(
    toolchain: &dyn Toolchain,
    template: &ProjectTemplate,
    workdir: &Path,
) -> Result<PathBuf, PipelineError> {
    fs::create_dir_all(workdir).map_err(|e| PipelineError::io(workdir, e))?;

    let outcome = toolchain.new_project(template, workdir)?;
    if !outcome.success {
        warn!(
            toolchain = toolchain.name(),
            output = %outcome.output.trim(),
            "Project creation failed"
        );
        return Err(PipelineError::Scaffold {
            name: template.name.clone(),
            code: outcome.code,
        });
    }

    let root = project_root(template, workdir);
    info!(project = %template.name, root = %root.display(), "Project created");
    Ok(root)
}

pub struct CreatePhase;

impl WorkflowPhase for CreatePhase {
    fn stage(&self) -> Stage {
        Stage::Create
    }

    fn execute(&self, context: &mut RunContext<'_>) -> Result<(), PipelineError> {
        let template = context.template();
        let root = create_project(context.toolchain, &template, &context.request.workdir)?;

        context.emit(ProgressEvent::ProjectCreated {
            project_root: root.display().to_string(),
        });
        context.project_root = root;
        Ok(())
    }
}
