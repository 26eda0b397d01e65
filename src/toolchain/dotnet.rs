//! .NET CLI binding (`dotnet new`, `dotnet add package`, `dotnet build`)

use super::{ProjectTemplate, ToolOutcome, Toolchain, ToolchainError};
use std::fs::File;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tracing::debug;

pub const DEFAULT_PROGRAM: &str = "dotnet";

/// Drives the .NET CLI as a child process.
#[derive(Debug, Clone)]
pub struct DotNetToolchain {
    program: String,
    leading_args: Vec<String>,
}

impl Default for DotNetToolchain {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl DotNetToolchain {
    /// Uses `program` instead of `dotnet` from `PATH`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Arguments placed before every subcommand, for running the CLI through a wrapper.
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args).stdin(Stdio::null());
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> ToolchainError {
        ToolchainError::Spawn {
            program: self.program.clone(),
            source,
        }
    }

    fn captured(&self, output: Output) -> ToolOutcome {
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        for line in text.lines() {
            debug!(program = %self.program, "{}", line);
        }
        ToolOutcome::from_status(output.status, text)
    }
}

impl Toolchain for DotNetToolchain {
    fn name(&self) -> &str {
        &self.program
    }

    fn new_project(
        &self,
        template: &ProjectTemplate,
        workdir: &Path,
    ) -> Result<ToolOutcome, ToolchainError> {
        debug!(
            kind = %template.kind,
            name = %template.name,
            framework = %template.framework,
            workdir = %workdir.display(),
            "Creating project"
        );
        let output = self
            .command()
            .current_dir(workdir)
            .args(["new", &template.kind, "-n", &template.name, "--force"])
            .args(["--framework", &template.framework])
            .output()
            .map_err(|e| self.spawn_error(e))?;
        Ok(self.captured(output))
    }

    fn add_package(&self, project: &Path, package: &str) -> Result<ToolOutcome, ToolchainError> {
        debug!(project = %project.display(), package, "Adding package");
        let output = self
            .command()
            .arg("add")
            .arg(project)
            .args(["package", package])
            .output()
            .map_err(|e| self.spawn_error(e))?;
        Ok(self.captured(output))
    }

    fn build(&self, descriptor: &Path, log: File) -> Result<ToolOutcome, ToolchainError> {
        debug!(descriptor = %descriptor.display(), "Building");
        let stdout = log.try_clone().map_err(ToolchainError::Redirect)?;
        let status = self
            .command()
            .arg("build")
            .arg(descriptor)
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(log))
            .status()
            .map_err(|e| self.spawn_error(e))?;
        Ok(ToolOutcome::from_status(status, String::new()))
    }
}
