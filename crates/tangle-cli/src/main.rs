//! The `tangle` binary: build a multigraph sketch from an editing script and
//! report its cycles.
use clap::Parser;

mod cli;
mod cmd;
mod error;
mod io;
mod script;

use cli::{Cli, Command};
use error::CliError;
use io::{DEFAULT_MAX_SCRIPT_SIZE, read_input};

fn main() {
    let cli = Cli::parse();

    let result = dispatch(cli.command);

    if let Err(e) = result {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

/// Routes a parsed subcommand to its implementation.
fn dispatch(command: Command) -> Result<(), CliError> {
    match command {
        Command::Run {
            script,
            format,
            quiet,
        } => {
            let content = read_input(&script, DEFAULT_MAX_SCRIPT_SIZE)?;
            cmd::run::run(&content, &format, quiet)
        }
        Command::Cycles {
            script,
            format,
            fail_on_cycles,
        } => {
            let content = read_input(&script, DEFAULT_MAX_SCRIPT_SIZE)?;
            cmd::cycles::run(&content, &format, fail_on_cycles)
        }
        Command::Inspect { script, format } => {
            let content = read_input(&script, DEFAULT_MAX_SCRIPT_SIZE)?;
            cmd::inspect::run(&content, &format)
        }
        Command::Version => {
            println!("{}", tangle_core::version());
            Ok(())
        }
    }
}
