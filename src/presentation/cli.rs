//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--config, --json, --verbose) are inherited by all subcommands
//! - Pipeline commands map onto goals; `plan` only prints the stage order

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::Goal;

/// Bridgewright - JNI bridge build orchestrator
#[derive(Parser, Debug)]
#[command(name = "bridgewright")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./bridgewright.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for CI (NDJSON events on stdout)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List native declarations
    Scan,

    /// Scan and regenerate JNI headers
    Headers,

    /// Report stale, missing or orphaned headers (exit 1 if any)
    Check,

    /// Scan, generate headers, compile, build the native library and package it
    Build,

    /// Build, then launch the host application
    Run,

    /// Print the validated stage order for a goal
    Plan {
        /// Goal to plan for
        #[arg(long, value_enum, default_value_t = Goal::Build)]
        goal: Goal,
    },
}
