pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{BuildArgs, CliArgs, Commands, ReduceArgs, RunArgs, ScanArgs};
pub use output::{OutputFormat, OutputFormatter};
