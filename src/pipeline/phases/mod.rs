// Pipeline phases, one file per stage, numbered in execution order.

use super::{PipelineError, RunContext, Stage};

#[path = "01_create.rs"]
pub mod create;
#[path = "02_merge.rs"]
pub mod merge;
#[path = "03_clean.rs"]
pub mod clean;
#[path = "04_resolve.rs"]
pub mod resolve;
#[path = "05_install.rs"]
pub mod install;
#[path = "06_build.rs"]
pub mod build;
#[path = "07_reduce.rs"]
pub mod reduce;

pub use build::BuildPhase;
pub use clean::CleanPhase;
pub use create::CreatePhase;
pub use install::InstallPhase;
pub use merge::MergePhase;
pub use reduce::ReducePhase;
pub use resolve::ResolvePhase;

pub trait WorkflowPhase: Send + Sync {
    fn stage(&self) -> Stage;

    fn execute(&self, context: &mut RunContext<'_>) -> Result<(), PipelineError>;
}
