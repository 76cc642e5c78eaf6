use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tokenkit_cli::{execute, init_logging, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let color = !cli.no_color && console::Term::stdout().features().colors_supported();
    match execute(&cli, color) {
        Ok(outcome) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(err) = stdout.write_all(outcome.output.as_bytes()) {
                eprintln!("error: {}", err);
                return ExitCode::FAILURE;
            }
            if outcome.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
