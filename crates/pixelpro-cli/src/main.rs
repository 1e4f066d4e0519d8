use pixelpro_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Log to the state file; fall back to stderr if it cannot be opened.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("pixelpro error: {:#}", err);
        std::process::exit(1);
    }
}
