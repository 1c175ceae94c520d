//! `courtside` - build NBA daily fantasy lineups from a player CSV.

mod cli;
mod commands;
mod display;
mod error;

use std::io;
use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if !cli.quiet {
        courtside::console::init();
    }

    let mut stdout = io::stdout().lock();
    let result = match &cli.command {
        Commands::Optimize(args) => commands::optimize(args, &mut stdout),
        Commands::Check(args) => commands::check(args, &mut stdout),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
