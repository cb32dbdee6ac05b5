use apidocs::cli::{run_cli, Cli};
use apidocs::logging::{init_logging_with_config, LogConfig};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env().with_verbose(cli.verbose);
    if let Err(err) = init_logging_with_config(&log_config) {
        eprintln!("Warning: {err:#}");
    }

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
