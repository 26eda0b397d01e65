//! Progress handler trait and events

use crate::pipeline::Stage;
use std::time::Duration;

/// Events emitted while the pipeline runs
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Run started
    Started { project_root: String },

    /// A stage is about to execute
    StageStarted { stage: Stage },

    /// The template project exists on disk
    ProjectCreated { project_root: String },

    /// Generated sources were copied into the project
    SourcesMerged {
        source: String,
        destination: String,
        files: usize,
    },

    /// Placeholder files and descriptor entries were removed
    TemplateCleaned {
        placeholder: String,
        files_removed: usize,
        references_removed: usize,
    },

    /// References were scanned and filtered
    PackagesResolved {
        discovered: usize,
        missing: Vec<String>,
    },

    /// One package was added to the project
    PackageInstalled { package: String },

    /// Every missing package was added
    PackagesInstalled { count: usize },

    /// The build ran to completion (successfully or not)
    BuildFinished { success: bool, build_time: Duration },

    /// The reduced error report was written
    ReportWritten { path: String, errors: usize },

    /// A stage finished without error
    StageComplete { stage: Stage, duration: Duration },

    /// Run completed
    Completed { total_time: Duration },

    /// Run aborted
    Failed { stage: Stage, error: String },
}

/// Trait for handling progress events during a run
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
