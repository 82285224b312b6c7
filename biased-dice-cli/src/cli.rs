use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "biased-dice", about = "Roll dice from a user-defined weight table", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the weights of a command come from.
#[derive(Args, Debug)]
pub struct WeightSource {
    /// Number of faces; the default table is used unless weights are given
    #[arg(long, default_value_t = 6)]
    pub faces: u32,

    /// Comma-separated weights in face order (overrides --faces)
    #[arg(long, value_delimiter = ',', conflicts_with = "profile")]
    pub weights: Option<Vec<u32>>,

    /// Weights file, one weight per line (overrides --faces)
    #[arg(long)]
    pub profile: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Roll a batch of dice
    Roll {
        #[command(flatten)]
        source: WeightSource,

        /// Number of dice; values outside 1 to 10 are brought back into range
        #[arg(long, short, default_value_t = 1, allow_negative_numbers = true)]
        dice: i64,

        /// Probability, in percent, that a die correlates with the previous one
        #[arg(long, short, default_value_t = 0)]
        consistency: u32,

        /// Number of batches to roll
        #[arg(long, default_value_t = 1)]
        times: u32,

        /// Seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the default table for a face count
    Defaults {
        /// Number of faces
        #[arg(long, default_value_t = 6)]
        faces: u32,
    },

    /// Normalize weights to integer percentages summing to 100
    Normalize {
        #[command(flatten)]
        source: WeightSource,

        /// Write the normalized weights back to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Check whether weights sum to 100
    Validate {
        #[command(flatten)]
        source: WeightSource,
    },

    /// Compare observed face frequencies against the weights
    Stats {
        #[command(flatten)]
        source: WeightSource,

        /// Number of draws
        #[arg(long, default_value_t = 10_000)]
        iterations: u64,
    },

    /// Measure how often correlated batches come out identical or similar
    Consistency {
        #[command(flatten)]
        source: WeightSource,

        /// Number of dice per batch
        #[arg(long, short, default_value_t = 5)]
        dice: u32,

        /// Consistency percentage
        #[arg(long, short, default_value_t = 100)]
        consistency: u32,

        /// Number of batches
        #[arg(long, default_value_t = 100)]
        iterations: u64,

        /// Seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run the built-in normalization scenarios
    NormalizationCases,
}
