use super::WorkflowPhase;
use crate::diagnostics::reduce_log_file;
use crate::pipeline::{PipelineError, RunContext, Stage};
use crate::progress::ProgressEvent;

pub struct ReducePhase;

impl WorkflowPhase for ReducePhase {
    fn stage(&self) -> Stage {
        Stage::Reduce
    }

    fn execute(&self, context: &mut RunContext<'_>) -> Result<(), PipelineError> {
        let backlog = context.backlog();
        let report = reduce_log_file(&backlog.build_log, &backlog.error_report)?;

        context.emit(ProgressEvent::ReportWritten {
            path: backlog.error_report.display().to_string(),
            errors: report.len(),
        });
        context.report = Some(report);
        Ok(())
    }
}
