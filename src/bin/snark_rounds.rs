//! `snark-rounds` command-line entry point.

use clap::Parser;
use std::io;
use std::process::ExitCode;

use snark_rounds::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            return ExitCode::from(cli::USAGE_EXIT_CODE);
        }
        // --help and --version
        Err(err) => err.exit(),
    };

    cli::init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli::run(&cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "estimation failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
