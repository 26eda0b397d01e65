use super::WorkflowPhase;
use crate::pipeline::{PipelineError, RunContext, ScanSummary, Stage};
use crate::progress::ProgressEvent;
use crate::references::{partition, KnownNamespaces, ReferenceScanner, ScanConfig};
use std::path::Path;
use tracing::info;

/// Scans `project_root` and splits what it references into satisfied and missing.
pub fn resolve(
    project_root: &Path,
    scan_config: ScanConfig,
    known: &KnownNamespaces,
) -> Result<ScanSummary, PipelineError> {
    let scanner = ReferenceScanner::with_config(scan_config)?;
    let discovered = scanner.scan(project_root)?;
    let split = partition(&discovered, known);

    info!(
        discovered = discovered.len(),
        satisfied = split.satisfied.len(),
        missing = split.missing.len(),
        "References resolved"
    );

    Ok(ScanSummary {
        project_root: project_root.to_path_buf(),
        known_roots: known.roots().to_vec(),
        discovered: discovered.into_iter().collect(),
        satisfied: split.satisfied,
        missing: split.missing,
    })
}

pub struct ResolvePhase;

impl WorkflowPhase for ResolvePhase {
    fn stage(&self) -> Stage {
        Stage::Resolve
    }

    fn execute(&self, context: &mut RunContext<'_>) -> Result<(), PipelineError> {
        let summary = resolve(
            &context.project_root,
            context.config.scan_config(),
            &context.known_namespaces(),
        )?;

        context.emit(ProgressEvent::PackagesResolved {
            discovered: summary.discovered.len(),
            missing: summary.missing.iter().map(|id| id.to_string()).collect(),
        });
        context.discovered = summary.discovered.into_iter().collect();
        context.missing = summary.missing;
        Ok(())
    }
}
