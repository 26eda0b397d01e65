use super::context::{PipelineRequest, RunContext};
use super::phases::{
    BuildPhase, CleanPhase, CreatePhase, InstallPhase, MergePhase, ReducePhase, ResolvePhase,
    WorkflowPhase,
};
use super::summary::PipelineSummary;
use super::{PipelineError, Stage};
use crate::config::AutobuildConfig;
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use crate::toolchain::Toolchain;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// A pipeline error tagged with the stage that raised it.
#[derive(Error, Debug)]
#[error("{stage} stage failed: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: PipelineError,
}

/// Runs the stages in order against one project.
pub struct Pipeline<'a> {
    config: &'a AutobuildConfig,
    toolchain: &'a dyn Toolchain,
    progress: &'a dyn ProgressHandler,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a AutobuildConfig, toolchain: &'a dyn Toolchain) -> Self {
        Self {
            config,
            toolchain,
            progress: &NoOpHandler,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressHandler) -> Self {
        self.progress = progress;
        self
    }

    /// Full run. With `skip_scaffold` set, starts at resolve on an existing project.
    pub fn run(&self, request: &PipelineRequest) -> Result<PipelineSummary, StageError> {
        let mut phases: Vec<Box<dyn WorkflowPhase>> = Vec::new();
        if !request.skip_scaffold {
            phases.push(Box::new(CreatePhase));
            phases.push(Box::new(MergePhase));
            phases.push(Box::new(CleanPhase));
        }
        phases.push(Box::new(ResolvePhase));
        phases.push(Box::new(InstallPhase));
        phases.push(Box::new(BuildPhase));
        phases.push(Box::new(ReducePhase));

        self.execute(request, phases)
    }

    /// Build and reduce only, for a project whose dependencies are already in place.
    pub fn rebuild(&self, request: &PipelineRequest) -> Result<PipelineSummary, StageError> {
        let phases: Vec<Box<dyn WorkflowPhase>> = vec![Box::new(BuildPhase), Box::new(ReducePhase)];
        self.execute(request, phases)
    }

    fn execute(
        &self,
        request: &PipelineRequest,
        phases: Vec<Box<dyn WorkflowPhase>>,
    ) -> Result<PipelineSummary, StageError> {
        let start = Instant::now();
        let mut context = RunContext::new(self.config, self.toolchain, self.progress, request);

        info!(
            project = %request.project_name,
            root = %context.project_root.display(),
            stages = phases.len(),
            "Starting pipeline"
        );
        context.emit(ProgressEvent::Started {
            project_root: context.project_root.display().to_string(),
        });

        for phase in phases {
            let stage = phase.stage();
            context.emit(ProgressEvent::StageStarted { stage });

            let stage_start = Instant::now();
            if let Err(source) = phase.execute(&mut context) {
                context.emit(ProgressEvent::Failed {
                    stage,
                    error: source.to_string(),
                });
                return Err(StageError { stage, source });
            }

            context.emit(ProgressEvent::StageComplete {
                stage,
                duration: stage_start.elapsed(),
            });
            debug!(stage = %stage, "Stage complete");
        }

        context.emit(ProgressEvent::Completed {
            total_time: start.elapsed(),
        });
        Ok(context.into_summary())
    }
}
