use clap::Parser;
use std::path::PathBuf;

use crate::constants::PRINT_TARGET;
use crate::domain::Mode;

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(version)]
#[command(about = "Look up Pokemon, abilities and moves from PokeAPI", long_about = None)]
pub struct Cli {
    /// What to look up: pokemon, ability or move
    #[arg(value_enum, ignore_case = true)]
    pub mode: Mode,

    /// A name or id for a single query, or a .txt file with one name or id per line
    pub input: String,

    /// Inline the details of every stat, ability and move (pokemon only)
    #[arg(short, long)]
    pub expanded: bool,

    /// "print" for the console, or a .txt file to write the results to
    #[arg(short, long, default_value = PRINT_TARGET)]
    pub output: String,

    /// Save front sprites of looked-up Pokemon into this directory
    #[arg(long, value_name = "DIR")]
    pub sprites: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, env = "POKEDEX_BASE_URL")]
    pub base_url: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
