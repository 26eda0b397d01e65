//! autobuild - bootstraps generated .NET web services and harvests their build errors
//!
//! This library drops a generated source tree into a freshly scaffolded project,
//! works out which external packages the sources reference, installs them through
//! the toolchain, runs a build and reduces the raw build log into a stable,
//! deduplicated error report.
//!
//! # Core Concepts
//!
//! - **References**: `using`-style declarations scanned out of the source tree,
//!   filtered against the namespaces the runtime and the project already provide
//! - **Toolchain**: the external CLI (`dotnet` by default) that scaffolds projects,
//!   adds packages and builds, abstracted behind the [`Toolchain`] trait
//! - **Backlog**: the `backlog/` directory under the project root holding the raw
//!   build log and the reduced error report
//!
//! # Example Usage
//!
//! ```ignore
//! use autobuild::{AutobuildConfig, Pipeline, PipelineRequest};
//!
//! let config = AutobuildConfig::default();
//! let toolchain = config.toolchain();
//! let pipeline = Pipeline::new(&config, &toolchain);
//!
//! let request = PipelineRequest::new("ProjectName", ".").with_source("code_output");
//! let summary = pipeline.run(&request)?;
//! println!("{} distinct build errors", summary.errors.len());
//! ```
//!
//! # Project Structure
//!
//! - [`references`]: declaration scanner and known-namespace filter
//! - [`toolchain`]: external toolchain abstraction and the .NET CLI binding
//! - [`pipeline`]: stage implementations and the orchestrating driver
//! - [`diagnostics`]: build log reduction

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod pipeline;
pub mod progress;
pub mod references;
pub mod toolchain;
pub mod util;

pub use config::{AutobuildConfig, ConfigError};
pub use diagnostics::{reduce_log_file, ErrorReport, NormalizedError};
pub use pipeline::{
    BacklogPaths, BuildOutcome, Pipeline, PipelineError, PipelineRequest, PipelineSummary,
    ScanSummary, Stage, StageError,
};
pub use references::{KnownNamespaces, ReferenceIdentifier, ReferenceScanner};
pub use toolchain::{DotNetToolchain, ProjectTemplate, ToolOutcome, Toolchain, ToolchainError};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
