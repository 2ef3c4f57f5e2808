//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::domain::{ForestShape, OwnershipFormat};

/// Generates CSV data representing a forest (a graph of multiple trees).
///
/// The total number of nodes is N * (D^L - 1) / (D - 1) for a forest of
/// N trees with degree D and depth L; every non-root node contributes one edge.
#[derive(Parser, Debug)]
#[command(name = "forestgen")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// The file to which to write the CSV data
    #[arg(
        value_hint = ValueHint::FilePath,
        required_unless_present_any = ["completions", "show_config", "init_config"]
    )]
    pub output: Option<PathBuf>,

    /// The total number of trees to generate
    #[arg(long, default_value_t = 1)]
    pub trees: u64,

    /// The depth of every tree in the forest (root is level 0)
    #[arg(long, default_value_t = 10)]
    pub depth: u32,

    /// The node degree of every node in every tree
    #[arg(long, default_value_t = 3)]
    pub degree: u64,

    /// Seed for ownership sampling (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Node label prefix (overrides config)
    #[arg(long)]
    pub prefix: Option<char>,

    /// Ownership rendering (overrides config)
    #[arg(long, value_enum)]
    pub format: Option<OwnershipFormat>,

    /// Config file layered over the global one
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print effective settings as TOML and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write a commented config template (to --config or the global location) and exit
    #[arg(long, conflicts_with = "show_config")]
    pub init_config: bool,

    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Print shell completion script and exit
    #[arg(long, value_enum)]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    pub fn shape(&self) -> ForestShape {
        ForestShape::new(self.trees, self.depth, self.degree)
    }
}
