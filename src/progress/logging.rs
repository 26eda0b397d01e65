//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { project_root } => {
                info!(project = %project_root, "Starting pipeline");
            }
            ProgressEvent::StageStarted { stage } => {
                info!(stage = %stage, "Starting stage");
            }
            ProgressEvent::ProjectCreated { project_root } => {
                debug!(project = %project_root, "Project created");
            }
            ProgressEvent::SourcesMerged {
                source,
                destination,
                files,
            } => {
                debug!(source = %source, destination = %destination, files, "Sources merged");
            }
            ProgressEvent::TemplateCleaned {
                placeholder,
                files_removed,
                references_removed,
            } => {
                debug!(
                    placeholder = %placeholder,
                    files_removed,
                    references_removed,
                    "Template cleaned"
                );
            }
            ProgressEvent::PackagesResolved {
                discovered,
                missing,
            } => {
                info!(
                    discovered,
                    missing = missing.len(),
                    packages = %missing.join(", "),
                    "Packages resolved"
                );
            }
            ProgressEvent::PackageInstalled { package } => {
                debug!(package = %package, "Package installed");
            }
            ProgressEvent::PackagesInstalled { count } => {
                info!(count, "Packages installed");
            }
            ProgressEvent::BuildFinished {
                success,
                build_time,
            } => {
                if *success {
                    info!(build_time_ms = build_time.as_millis(), "Build succeeded");
                } else {
                    warn!(build_time_ms = build_time.as_millis(), "Build failed");
                }
            }
            ProgressEvent::ReportWritten { path, errors } => {
                info!(report = %path, errors, "Error report written");
            }
            ProgressEvent::StageComplete { stage, duration } => {
                info!(
                    stage = %stage,
                    duration_ms = duration.as_millis(),
                    "Stage complete"
                );
            }
            ProgressEvent::Completed { total_time } => {
                info!(total_time_ms = total_time.as_millis(), "Pipeline complete");
            }
            ProgressEvent::Failed { stage, error } => {
                warn!(stage = %stage, error = %error, "Pipeline failed");
            }
        }
    }
}
