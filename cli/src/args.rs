use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gremlins", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Alternative bestiary document to load instead of the embedded one.
    #[arg(short, long, global = true, env = "GREMLINS_BESTIARY")]
    pub bestiary: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an encounter scenario
    Run(RunArgs),
    /// Validate every template in the bestiary
    Validate,
    /// List the templates in the bestiary
    List {
        /// Only list templates of this size category
        #[arg(short, long)]
        size: Option<String>,
    },
    /// List the predefined waves
    Waves,
    /// Parse a move string and print its canonical form
    Moves {
        /// Move DSL, e.g. `ticks=4,drain_heat=2|ticks=0,heat_hard_cap=3`
        moves: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Scenario TOML file or the id of a predefined wave
    pub scenario: String,

    /// Number of seeded runs
    #[arg(short = 'n', long, default_value_t = 1)]
    pub iterations: usize,

    /// Base seed, overrides the scenario's seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Worker threads, defaults to the number of cpus
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Print dispatched logs and warnings
    #[arg(short, long)]
    pub verbose: bool,
}
