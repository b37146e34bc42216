//! Command-line argument definitions for the Logicpad CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects what to do with the input file; the
//! configuration file and logging verbosity are global.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Logicpad exercise checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve an element stream against a notation language
    Resolve {
        /// Path to the element stream file (TOML)
        input: String,

        /// Language to resolve against; overrides the file's `language`
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Check a formula-tree diagram
    Tree {
        /// Path to the diagram file (TOML)
        input: String,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Check a correspondence map
    Map {
        /// Path to the map exercise file (TOML)
        input: String,

        #[command(flatten)]
        session: SessionArgs,
    },
}

/// Who is checking and where their attempts are kept.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct SessionArgs {
    /// Attempt ledger file (TOML); created on first use
    #[arg(long)]
    pub attempts: Option<String>,

    /// Check as an instructor: no attempt cap, nothing counted
    #[arg(long)]
    pub instructor: bool,
}
