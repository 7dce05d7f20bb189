//! Entry point for the `salesman` command-line interface.
#![forbid(unsafe_code)]

use salesman_cli::CliError;

fn main() -> eyre::Result<()> {
    match salesman_cli::run() {
        // Lets clap print help and version text with its own exit codes.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        outcome => outcome.map_err(eyre::Report::from),
    }
}
