use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Compare astronomical and ecclesiastical dates of Easter.
#[derive(Parser)]
#[command(
    name = "computus",
    version,
    about = "Compare astronomical and ecclesiastical dates of Easter"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file. Defaults to computus.toml if it exists.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare both methods over a range of years and list the years that differ.
    Compare(CompareArgs),
    /// Show both dates of Easter for one year, with the events behind the astronomical one.
    Easter(EasterArgs),
    /// Write an ephemeris table sampled from the built-in analytic model.
    Generate(GenerateArgs),
}

#[derive(clap::Args)]
pub struct CompareArgs {
    /// First year to compare. Defaults to the first year the ephemeris supports.
    #[arg(long)]
    pub from: Option<i32>,

    /// Last year to compare. Defaults to the last year the ephemeris supports.
    #[arg(long)]
    pub to: Option<i32>,

    /// Ephemeris table (JSON) to use instead of the built-in model.
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// List every year, including those where both methods agree.
    #[arg(long)]
    pub all: bool,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct EasterArgs {
    /// Year to compute.
    pub year: i32,

    /// Ephemeris table (JSON) to use instead of the built-in model.
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Output path for the ephemeris table.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Hours between samples.
    #[arg(long, default_value_t = 6)]
    pub step_hours: u32,

    /// First year the table should support. Defaults to the model's full coverage.
    #[arg(long)]
    pub from: Option<i32>,

    /// Last year the table should support.
    #[arg(long)]
    pub to: Option<i32>,
}
