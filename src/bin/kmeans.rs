//! Command line front end
//!
//! Reads points from stdin (or `--input`), prints the final centroids to stdout.
//! Failures print a single line to stdout and exit with status 1, details go to the log on stderr.

use clap::Parser;
use kmeans_lloyd::cli::{self, Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprint!("{}", e);
            println!("{}", cli::MSG_GENERIC);
            return ExitCode::FAILURE;
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level().to_string()))
        .init();

    match cli::run(&args, std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            println!("{}", cli::failure_message(&e));
            ExitCode::FAILURE
        }
    }
}
