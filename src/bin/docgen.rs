// src/bin/docgen.rs
use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use docgen_core::cli::{handlers, Cli, Commands};
use docgen_core::exit::DocGenExit;

fn main() -> DocGenExit {
    let cli = Cli::parse();
    match dispatch(&cli.command) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            DocGenExit::Error
        }
    }
}

fn dispatch(cmd: &Commands) -> Result<DocGenExit> {
    match cmd {
        Commands::Run(args) => handlers::handle_run(args),
        Commands::Map { input } => handlers::handle_map(input),
        Commands::Apply {
            placeholder,
            docs,
            output,
        } => handlers::handle_apply(placeholder, docs, output.as_deref()),
    }
}
