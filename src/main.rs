// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging. Diagnostics go to stderr so
    // stdout stays a clean package list for scripts and front-ends.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List {
            status_file,
            states_file,
            no_apt_mark,
            policy,
            output,
            json,
        }) => commands::cmd_list(
            &status_file,
            &states_file,
            no_apt_mark,
            &policy,
            output.as_deref(),
            json,
        ),
        Some(Commands::Diff {
            status_file,
            states_file,
            policy,
        }) => commands::cmd_diff(&status_file, &states_file, &policy),
        Some(Commands::Sources {
            status_file,
            states_file,
            no_apt_mark,
            policy,
        }) => commands::cmd_sources(&status_file, &states_file, no_apt_mark, &policy),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        // No subcommand: run the standard report against the system paths
        None => commands::cmd_list(
            "/var/lib/dpkg/status",
            "/var/lib/apt/extended_states",
            false,
            "auto-only",
            None,
            false,
        ),
    }
}
