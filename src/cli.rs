// src/cli.rs
//! CLI definitions for debmark
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "debmark")]
#[command(author = "debmark Contributors")]
#[command(version)]
#[command(
    about = "Reconciles dpkg, apt extended_states, and apt-mark into one explicit-install list",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List packages explicitly installed by the operator
    List {
        /// Path to the dpkg status database
        #[arg(short, long, default_value = "/var/lib/dpkg/status")]
        status_file: String,

        /// Path to the apt extended_states database
        #[arg(short = 'e', long, default_value = "/var/lib/apt/extended_states")]
        states_file: String,

        /// Do not invoke apt-mark showmanual
        #[arg(long)]
        no_apt_mark: bool,

        /// Exclusion policy for status candidates: auto-only, strict
        #[arg(long, default_value = "auto-only")]
        policy: String,

        /// Also write the list to a file
        #[arg(short, long)]
        output: Option<String>,

        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show disagreements between the local databases and apt-mark
    Diff {
        /// Path to the dpkg status database
        #[arg(short, long, default_value = "/var/lib/dpkg/status")]
        status_file: String,

        /// Path to the apt extended_states database
        #[arg(short = 'e', long, default_value = "/var/lib/apt/extended_states")]
        states_file: String,

        /// Exclusion policy for status candidates: auto-only, strict
        #[arg(long, default_value = "auto-only")]
        policy: String,
    },

    /// Show the per-source breakdown behind the reconciliation
    Sources {
        /// Path to the dpkg status database
        #[arg(short, long, default_value = "/var/lib/dpkg/status")]
        status_file: String,

        /// Path to the apt extended_states database
        #[arg(short = 'e', long, default_value = "/var/lib/apt/extended_states")]
        states_file: String,

        /// Do not invoke apt-mark showmanual
        #[arg(long)]
        no_apt_mark: bool,

        /// Exclusion policy for status candidates: auto-only, strict
        #[arg(long, default_value = "auto-only")]
        policy: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
