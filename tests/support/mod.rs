//! Shared helpers for integration tests

#![allow(dead_code)]

use autobuild::{ProjectTemplate, ToolOutcome, Toolchain, ToolchainError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const TEMPLATE_CSPROJ: &str = r#"<Project Sdk="Microsoft.NET.Sdk.Web">

  <PropertyGroup>
    <TargetFramework>net6.0</TargetFramework>
    <Nullable>enable</Nullable>
  </PropertyGroup>

  <ItemGroup>
    <PackageReference Include="Swashbuckle.AspNetCore" Version="6.2.3" />
  </ItemGroup>

  <ItemGroup>
    <Compile Include="WeatherForecast.cs" />
    <None Include="Controllers/WeatherForecastController.cs" />
  </ItemGroup>

</Project>
"#;

/// Path to the built `autobuild` binary
pub fn autobuild_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_autobuild"))
}

pub fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative)
}

/// One toolchain invocation as seen by [`FakeToolchain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    NewProject { name: String, framework: String },
    AddPackage { project: PathBuf, package: String },
    Build { descriptor: PathBuf },
}

/// In-process stand-in for the .NET CLI that records every call.
///
/// `new_project` lays down a template project with the sample files, `build`
/// writes `build_log` into the log and exits with `build_code`.
pub struct FakeToolchain {
    pub calls: Mutex<Vec<Call>>,
    pub failing_package: Option<String>,
    pub scaffold_code: i32,
    pub build_log: String,
    pub build_code: i32,
}

impl Default for FakeToolchain {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing_package: None,
            scaffold_code: 0,
            build_log: "Build succeeded.\nTime Elapsed 00:00:01.02\n".to_string(),
            build_code: 0,
        }
    }
}

impl FakeToolchain {
    pub fn failing_build(log: &str) -> Self {
        Self {
            build_log: log.to_string(),
            build_code: 1,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn installed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddPackage { package, .. } => Some(package),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn io(err: std::io::Error) -> ToolchainError {
    ToolchainError::Redirect(err)
}

impl Toolchain for FakeToolchain {
    fn name(&self) -> &str {
        "fake-dotnet"
    }

    fn new_project(
        &self,
        template: &ProjectTemplate,
        workdir: &Path,
    ) -> Result<ToolOutcome, ToolchainError> {
        self.record(Call::NewProject {
            name: template.name.clone(),
            framework: template.framework.clone(),
        });
        if self.scaffold_code != 0 {
            return Ok(ToolOutcome::failed(self.scaffold_code));
        }

        let root = workdir.join(&template.name);
        fs::create_dir_all(root.join("Controllers")).map_err(io)?;
        fs::write(root.join(format!("{}.csproj", template.name)), TEMPLATE_CSPROJ).map_err(io)?;
        fs::write(
            root.join("Program.cs"),
            "var builder = WebApplication.CreateBuilder(args);\n",
        )
        .map_err(io)?;
        fs::write(root.join("WeatherForecast.cs"), "namespace X;\n").map_err(io)?;
        fs::write(
            root.join("Controllers/WeatherForecastController.cs"),
            "using Not.Installed.Anymore;\n",
        )
        .map_err(io)?;
        Ok(ToolOutcome::succeeded())
    }

    fn add_package(&self, project: &Path, package: &str) -> Result<ToolOutcome, ToolchainError> {
        self.record(Call::AddPackage {
            project: project.to_path_buf(),
            package: package.to_string(),
        });
        if self.failing_package.as_deref() == Some(package) {
            return Ok(ToolOutcome::failed(1));
        }
        Ok(ToolOutcome::succeeded())
    }

    fn build(&self, descriptor: &Path, mut log: File) -> Result<ToolOutcome, ToolchainError> {
        self.record(Call::Build {
            descriptor: descriptor.to_path_buf(),
        });
        log.write_all(self.build_log.as_bytes()).map_err(io)?;
        if self.build_code == 0 {
            Ok(ToolOutcome::succeeded())
        } else {
            Ok(ToolOutcome::failed(self.build_code))
        }
    }
}

/// Recursively copies a fixture tree into `dest`.
pub fn copy_tree(src: &Path, dest: &Path) {
    fs::create_dir_all(dest).unwrap();
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dest.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_tree(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).unwrap();
        }
    }
}
