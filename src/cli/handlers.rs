//! Subcommand handlers
//!
//! Each handler returns the process exit code: `0` when the command completed
//! (a failed build included), `1` on a fatal error.

use super::commands::{BuildArgs, OutputFormatArg, ReduceArgs, RunArgs, ScanArgs};
use super::output::OutputFormatter;
use crate::config::AutobuildConfig;
use crate::diagnostics::reduce_log_file;
use crate::pipeline::{resolve, Pipeline, PipelineRequest, ERROR_REPORT_FILE};
use crate::progress::ConsoleHandler;
use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub fn handle_run(args: &RunArgs, quiet: bool) -> i32 {
    exit_code(run(args, quiet))
}

pub fn handle_scan(args: &ScanArgs) -> i32 {
    exit_code(scan(args))
}

pub fn handle_build(args: &BuildArgs, quiet: bool) -> i32 {
    exit_code(build(args, quiet))
}

pub fn handle_reduce(args: &ReduceArgs, quiet: bool) -> i32 {
    exit_code(reduce(args, quiet))
}

fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn load_config() -> Result<AutobuildConfig> {
    let config = AutobuildConfig::default();
    config.validate().context("Invalid configuration")?;
    debug!("{}", config);
    Ok(config)
}

fn existing_dir(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        bail!("Not a directory: {}", path.display());
    }
    path.canonicalize()
        .with_context(|| format!("Failed to canonicalize {}", path.display()))
}

fn dir_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("Cannot derive a project name from {}", path.display()))
}

fn print_output(text: &str, human: bool, quiet: bool) {
    if !human || !quiet {
        print!("{}", text);
        if !text.ends_with('\n') {
            println!();
        }
    }
}

fn run(args: &RunArgs, quiet: bool) -> Result<()> {
    let config = load_config()?;

    let workdir = match &args.workdir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };

    let mut request = PipelineRequest::new(args.name.as_str(), workdir);
    if let Some(source) = &args.source {
        request = request.with_source(source);
    }
    request.skip_scaffold = args.skip_scaffold;
    if request.skip_scaffold && !request.project_root().is_dir() {
        bail!(
            "Project directory does not exist: {}",
            request.project_root().display()
        );
    }

    info!(project = %request.project_name, "Starting run");
    let toolchain = config.toolchain();
    let console = ConsoleHandler::new(quiet);
    let summary = Pipeline::new(&config, &toolchain)
        .with_progress(&console)
        .run(&request)?;

    let formatter = OutputFormatter::new(args.format.into());
    let text = formatter.format_pipeline(&summary)?;
    print_output(&text, args.format == OutputFormatArg::Human, quiet);
    Ok(())
}

fn scan(args: &ScanArgs) -> Result<()> {
    let config = load_config()?;
    let root = existing_dir(&args.project_dir)?;
    let project_name = match &args.project_name {
        Some(name) => name.clone(),
        None => dir_name(&root)?,
    };

    let summary = resolve(
        &root,
        config.scan_config(),
        &config.known_namespaces(&project_name),
    )?;

    let formatter = OutputFormatter::new(args.format.into());
    print_output(&formatter.format_scan(&summary)?, false, false);
    Ok(())
}

fn build(args: &BuildArgs, quiet: bool) -> Result<()> {
    let config = load_config()?;
    let root = existing_dir(&args.project_dir)?;
    let request = PipelineRequest::for_project_dir(&root);

    let toolchain = config.toolchain();
    let console = ConsoleHandler::new(quiet);
    let summary = Pipeline::new(&config, &toolchain)
        .with_progress(&console)
        .rebuild(&request)?;

    let formatter = OutputFormatter::new(args.format.into());
    let text = formatter.format_pipeline(&summary)?;
    print_output(&text, args.format == OutputFormatArg::Human, quiet);
    Ok(())
}

fn reduce(args: &ReduceArgs, quiet: bool) -> Result<()> {
    let report_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.log.with_file_name(ERROR_REPORT_FILE));

    let report = reduce_log_file(&args.log, &report_path)?;

    if !quiet {
        println!(
            "Wrote {} error(s) to {}",
            report.len(),
            report_path.display()
        );
    }
    Ok(())
}
