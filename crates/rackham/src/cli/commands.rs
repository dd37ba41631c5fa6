//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rackham CLI - turn a plain-text story into a storybook framework
#[derive(Parser, Debug)]
#[command(name = "rackham")]
#[command(about = "Turn a plain-text children's story into a storybook framework", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process the story and write the storybook artifacts
    Run {
        /// Directory holding the input and output folders
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Config file to use instead of the layered lookup
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip the model entirely and use offline fallbacks
        #[arg(long)]
        offline: bool,
    },

    /// Create the input and output folders under a fresh root
    Init {
        /// Directory to hold the input and output folders
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Config file to use instead of the layered lookup
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Report which input files are present
    Check {
        /// Directory holding the input folder
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Config file to use instead of the layered lookup
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
