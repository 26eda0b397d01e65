//! External toolchain abstraction
//!
//! Every interaction with the compiler toolchain (scaffolding a project, adding a
//! package, building) goes through the [`Toolchain`] trait so stages can be driven
//! by the real CLI or by a test double.

pub mod dotnet;

pub use dotnet::DotNetToolchain;

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolchainError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to redirect toolchain output: {0}")]
    Redirect(#[source] io::Error),
}

/// What a scaffolded project is made from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTemplate {
    /// Template kind, e.g. `webapi`
    pub kind: String,
    /// Project (and directory) name
    pub name: String,
    /// Target framework moniker, e.g. `net6.0`
    pub framework: String,
}

/// Result of a completed toolchain invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToolOutcome {
    pub success: bool,
    /// Exit code; `None` when the process was terminated by a signal
    pub code: Option<i32>,
    /// Combined stdout/stderr, when the invocation captured it
    pub output: String,
}

impl ToolOutcome {
    pub fn from_status(status: ExitStatus, output: String) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
            output,
        }
    }

    pub fn succeeded() -> Self {
        Self {
            success: true,
            code: Some(0),
            output: String::new(),
        }
    }

    pub fn failed(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
            output: String::new(),
        }
    }
}

/// Human description of an exit code, e.g. `exit code 1`.
pub fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// The external compiler toolchain.
///
/// Calls are synchronous and run to completion; there is no timeout or cancellation.
pub trait Toolchain: Send + Sync {
    /// Program name used in diagnostics
    fn name(&self) -> &str;

    /// Creates a new project from `template` inside `workdir`.
    fn new_project(&self, template: &ProjectTemplate, workdir: &Path)
        -> Result<ToolOutcome, ToolchainError>;

    /// Adds `package` to the manifest of the project at `project`.
    fn add_package(&self, project: &Path, package: &str) -> Result<ToolOutcome, ToolchainError>;

    /// Builds `descriptor`, writing stdout and stderr interleaved into `log`.
    fn build(&self, descriptor: &Path, log: File) -> Result<ToolOutcome, ToolchainError>;
}

impl<T: Toolchain + ?Sized> Toolchain for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn new_project(
        &self,
        template: &ProjectTemplate,
        workdir: &Path,
    ) -> Result<ToolOutcome, ToolchainError> {
        (**self).new_project(template, workdir)
    }

    fn add_package(&self, project: &Path, package: &str) -> Result<ToolOutcome, ToolchainError> {
        (**self).add_package(project, package)
    }

    fn build(&self, descriptor: &Path, log: File) -> Result<ToolOutcome, ToolchainError> {
        (**self).build(descriptor, log)
    }
}

/// Directory `new_project` creates for `template` under `workdir`.
pub fn project_root(template: &ProjectTemplate, workdir: &Path) -> PathBuf {
    workdir.join(&template.name)
}
