use std::process::ExitCode;

use clap::Parser;
use console::style;

use colorsheet::cli::{self, Cli};
use colorsheet::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut stdout = std::io::stdout().lock();
    match cli::run(&cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", style(format!("error: {:#}", err)).red().for_stderr());
            ExitCode::FAILURE
        }
    }
}
