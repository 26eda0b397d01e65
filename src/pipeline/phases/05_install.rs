use super::WorkflowPhase;
use crate::pipeline::{PipelineError, RunContext, Stage};
use crate::progress::ProgressEvent;
use crate::toolchain::Toolchain;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Adds packages to one project, one toolchain call at a time.
pub struct PackageInstaller<'a> {
    toolchain: &'a dyn Toolchain,
    project_root: &'a Path,
}

impl<'a> PackageInstaller<'a> {
    pub fn new(toolchain: &'a dyn Toolchain, project_root: &'a Path) -> Self {
        Self {
            toolchain,
            project_root,
        }
    }

    pub fn install(&self, package: &str) -> Result<(), PipelineError> {
        let outcome = self.toolchain.add_package(self.project_root, package)?;
        if !outcome.success {
            warn!(
                package,
                output = %outcome.output.trim(),
                "Package install failed"
            );
            return Err(PipelineError::Install {
                package: package.to_string(),
                code: outcome.code,
                output: outcome.output,
            });
        }
        info!(package, "Package installed");
        Ok(())
    }

    /// Installs `packages` in order, stopping at the first failure.
    ///
    /// Repeated names are installed once. `on_installed` fires after each success.
    pub fn install_all<I, S, F>(
        &self,
        packages: I,
        mut on_installed: F,
    ) -> Result<Vec<String>, PipelineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(&str),
    {
        let mut seen = HashSet::new();
        let mut installed = Vec::new();

        for package in packages {
            let package = package.as_ref();
            if !seen.insert(package.to_string()) {
                continue;
            }
            self.install(package)?;
            on_installed(package);
            installed.push(package.to_string());
        }

        Ok(installed)
    }
}

pub struct InstallPhase;

impl WorkflowPhase for InstallPhase {
    fn stage(&self) -> Stage {
        Stage::Install
    }

    fn execute(&self, context: &mut RunContext<'_>) -> Result<(), PipelineError> {
        let installer = PackageInstaller::new(context.toolchain, &context.project_root);
        let progress = context.progress;

        let installed = installer.install_all(
            context.missing.iter().map(|id| id.as_str()),
            |package| {
                progress.on_progress(&ProgressEvent::PackageInstalled {
                    package: package.to_string(),
                })
            },
        )?;

        context.emit(ProgressEvent::PackagesInstalled {
            count: installed.len(),
        });
        context.installed = installed;
        Ok(())
    }
}
