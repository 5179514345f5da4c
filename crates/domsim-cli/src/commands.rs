pub mod analyze;
pub mod groups;
pub mod pairs;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use domsim_engine::constants::{
    DEFAULT_CANDIDATE_LIMIT, DEFAULT_OUTPUT_DIR, DEFAULT_SIMILARITY_THRESHOLD,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "domsim")]
#[command(about = "Find similar domains by shared letters and fuzzy company names.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the letter classifier and the name grouper, then export everything
    #[command(alias = "a")]
    Analyze {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        grouping: GroupingArgs,
        /// Worker threads (default: one per core)
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Classify domain pairs by shared letters
    #[command(alias = "p")]
    Pairs {
        #[command(flatten)]
        io: IoArgs,
        /// Worker threads (default: one per core)
        #[arg(long)]
        threads: Option<usize>,
    },
    /// Group similar company names
    #[command(alias = "g")]
    Groups {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        grouping: GroupingArgs,
    },
}

#[derive(Args, Debug)]
pub struct IoArgs {
    /// Domain list (.csv, .tsv, .json, .jsonl, .parquet or one domain per line)
    pub input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct GroupingArgs {
    /// Minimum fuzzy score for a name to join a group (0-100)
    #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD,
          value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: u8,
    /// Best-scoring candidates examined per name
    #[arg(long, default_value_t = DEFAULT_CANDIDATE_LIMIT)]
    pub candidate_limit: usize,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Size the global rayon pool
pub fn configure_threads(threads: Option<usize>) -> anyhow::Result<()> {
    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure the thread pool")?;
    }
    tracing::debug!(threads = rayon::current_num_threads(), "thread pool ready");
    Ok(())
}
