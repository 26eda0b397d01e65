use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Scaffold, resolve, build and diagnose .NET projects
#[derive(Parser, Debug)]
#[command(
    name = "autobuild",
    about = "Scaffold, resolve, build and diagnose .NET projects",
    version,
    long_about = "autobuild creates a project from a template, merges generated sources into it, \
                  installs every package the sources reference, builds it, and reduces the \
                  build log to a sorted, deduplicated error report under <project>/backlog/."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress status lines and non-error logs"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run the full pipeline",
        long_about = "Creates the project, merges the sources, strips the template sample, \
                      installs missing packages, builds, and writes the error report.\n\n\
                      Examples:\n  \
                      autobuild run --name ProjectName --source ./generated\n  \
                      autobuild run --name ProjectName --source ./generated --workdir /tmp/work\n  \
                      autobuild run --name ProjectName --skip-scaffold --format json"
    )]
    Run(RunArgs),

    #[command(
        about = "List referenced and missing packages",
        long_about = "Scans a project's sources and prints which referenced namespaces would \
                      need a package install. Nothing is modified.\n\n\
                      Examples:\n  \
                      autobuild scan ./ProjectName\n  \
                      autobuild scan ./src --project-name ProjectName --format yaml"
    )]
    Scan(ScanArgs),

    #[command(
        about = "Build an existing project and reduce its log",
        long_about = "Builds the project's single build descriptor, then writes \
                      backlog/build_log.txt and backlog/build_error_log.txt.\n\n\
                      Examples:\n  \
                      autobuild build ./ProjectName"
    )]
    Build(BuildArgs),

    #[command(
        about = "Reduce a raw build log to an error report",
        long_about = "Examples:\n  \
                      autobuild reduce ProjectName/backlog/build_log.txt\n  \
                      autobuild reduce build.log --output errors.txt"
    )]
    Reduce(ReduceArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    #[arg(short = 'n', long, value_name = "NAME", help = "Project name")]
    pub name: String,

    #[arg(
        short = 's',
        long,
        value_name = "DIR",
        required_unless_present = "skip_scaffold",
        help = "Directory of generated sources to merge into the project"
    )]
    pub source: Option<PathBuf>,

    #[arg(
        short = 'w',
        long,
        value_name = "DIR",
        help = "Directory the project is created in (defaults to current directory)"
    )]
    pub workdir: Option<PathBuf>,

    #[arg(long, help = "Reuse an existing project: skip create, merge and clean")]
    pub skip_scaffold: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    #[arg(value_name = "PROJECT_DIR", help = "Directory to scan")]
    pub project_dir: PathBuf,

    #[arg(
        long,
        value_name = "NAME",
        help = "Project namespace root (defaults to the directory name)"
    )]
    pub project_name: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    #[arg(value_name = "PROJECT_DIR", help = "Project root containing the build descriptor")]
    pub project_dir: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ReduceArgs {
    #[arg(value_name = "LOG", help = "Raw build log")]
    pub log: PathBuf,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Report path (defaults to build_error_log.txt next to the log)"
    )]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_run_args() {
        let args = CliArgs::parse_from([
            "autobuild",
            "run",
            "--name",
            "ProjectName",
            "--source",
            "./generated",
        ]);
        match args.command {
            Commands::Run(run) => {
                assert_eq!(run.name, "ProjectName");
                assert_eq!(run.source, Some(PathBuf::from("./generated")));
                assert!(run.workdir.is_none());
                assert!(!run.skip_scaffold);
                assert_eq!(run.format, OutputFormatArg::Human);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_requires_source_unless_skipping_scaffold() {
        assert!(CliArgs::try_parse_from(["autobuild", "run", "--name", "App"]).is_err());

        let args =
            CliArgs::try_parse_from(["autobuild", "run", "--name", "App", "--skip-scaffold"])
                .unwrap();
        match args.command {
            Commands::Run(run) => {
                assert!(run.skip_scaffold);
                assert!(run.source.is_none());
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_scan_args() {
        let args = CliArgs::parse_from([
            "autobuild",
            "scan",
            "/tmp/App",
            "--project-name",
            "MyProj",
            "--format",
            "json",
        ]);
        match args.command {
            Commands::Scan(scan) => {
                assert_eq!(scan.project_dir, PathBuf::from("/tmp/App"));
                assert_eq!(scan.project_name.as_deref(), Some("MyProj"));
                assert_eq!(scan.format, OutputFormatArg::Json);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_reduce_args() {
        let args = CliArgs::parse_from(["autobuild", "reduce", "build.log", "-o", "errors.txt"]);
        match args.command {
            Commands::Reduce(reduce) => {
                assert_eq!(reduce.log, PathBuf::from("build.log"));
                assert_eq!(reduce.output, Some(PathBuf::from("errors.txt")));
            }
            _ => panic!("Expected Reduce command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["autobuild", "-v", "build", "."]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let args = CliArgs::parse_from(["autobuild", "build", ".", "-q"]);
        assert!(args.quiet);

        let args = CliArgs::parse_from(["autobuild", "--log-level", "debug", "build", "."]);
        assert_eq!(args.log_level, Some("debug".to_string()));

        assert!(CliArgs::try_parse_from(["autobuild", "-v", "-q", "build", "."]).is_err());
    }
}
