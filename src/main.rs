use autobuild::cli::commands::{CliArgs, Commands};
use autobuild::cli::handlers::{handle_build, handle_reduce, handle_run, handle_scan};
use autobuild::util::logging::{config_from_env, init_logging, parse_level};
use autobuild::{NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Run(run_args) => handle_run(run_args, args.quiet),
        Commands::Scan(scan_args) => handle_scan(scan_args),
        Commands::Build(build_args) => handle_build(build_args, args.quiet),
        Commands::Reduce(reduce_args) => handle_reduce(reduce_args, args.quiet),
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let mut config = config_from_env();

    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }

    init_logging(config);
}
