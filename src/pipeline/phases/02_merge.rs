use super::WorkflowPhase;
use crate::pipeline::{PipelineError, RunContext, Stage};
use crate::progress::ProgressEvent;
use ignore::WalkBuilder;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Recursively copies everything under `source` into `destination`.
///
/// Existing files are overwritten and existing directories reused. Hidden files
/// are copied and ignore files are not honoured. Returns the number of files copied.
pub fn merge_sources(source: &Path, destination: &Path) -> Result<usize, PipelineError> {
    if !source.is_dir() {
        return Err(PipelineError::SourceNotFound(source.to_path_buf()));
    }
    fs::create_dir_all(destination).map_err(|e| PipelineError::io(destination, e))?;

    let mut copied = 0usize;
    for result in WalkBuilder::new(source)
        .standard_filters(false)
        .follow_links(true)
        .build()
    {
        let entry = result.map_err(|err| {
            PipelineError::io(source, io::Error::new(io::ErrorKind::Other, err.to_string()))
        })?;
        let relative = match entry.path().strip_prefix(source) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => continue,
        };
        let target = destination.join(relative);

        if entry.file_type().is_some_and(|t| t.is_dir()) {
            fs::create_dir_all(&target).map_err(|e| PipelineError::io(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }
        fs::copy(entry.path(), &target).map_err(|e| PipelineError::io(entry.path(), e))?;
        debug!(file = %relative.display(), "Copied");
        copied += 1;
    }

    info!(
        source = %source.display(),
        destination = %destination.display(),
        files = copied,
        "Sources merged"
    );
    Ok(copied)
}

pub struct MergePhase;

impl WorkflowPhase for MergePhase {
    fn stage(&self) -> Stage {
        Stage::Merge
    }

    fn execute(&self, context: &mut RunContext<'_>) -> Result<(), PipelineError> {
        let Some(source) = context.request.source_dir.as_deref() else {
            debug!("No source directory given, nothing to merge");
            return Ok(());
        };

        let files = merge_sources(source, &context.project_root)?;
        context.emit(ProgressEvent::SourcesMerged {
            source: source.display().to_string(),
            destination: context.project_root.display().to_string(),
            files,
        });
        Ok(())
    }
}
