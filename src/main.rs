use std::process::ExitCode;

use clap::Parser;

mod cli;
mod config;
mod error;
mod library;
mod logging;
mod menu;
mod mpris;
mod organize;
mod player;
mod runtime;
mod select;

#[cfg(test)]
mod testing;

use cli::Cli;
use error::Outcome;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match runtime::run(cli) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Cancelled) => {
            println!("cancelled");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("musictl: {e}");
            ExitCode::FAILURE
        }
    }
}
