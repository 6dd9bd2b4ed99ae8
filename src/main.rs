mod cli;
mod compare_cmd;
mod config;
mod dataset;
mod easter_cmd;
mod generate_cmd;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::Config;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Compare(args) => compare_cmd::run(args, &config),
        Command::Easter(args) => easter_cmd::run(args, &config),
        Command::Generate(args) => generate_cmd::run(args),
    }
}
