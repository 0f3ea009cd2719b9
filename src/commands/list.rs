// src/commands/list.rs

//! The main report: packages explicitly installed by the operator

use anyhow::Result;
use debmark::{gather, AptMark, ExclusionPolicy, ManualMarkSource, Reconciliation, SourcePaths};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Print the explicit-install list, optionally as JSON or copied to a file.
pub fn cmd_list(
    status_file: &str,
    states_file: &str,
    no_apt_mark: bool,
    policy: &str,
    output: Option<&str>,
    json: bool,
) -> Result<()> {
    let result = run_reconciliation(status_file, states_file, no_apt_mark, policy)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Packages explicitly installed by the user:");
    for pkg in &result.explicit {
        println!("- {}", pkg);
    }

    if let Some(path) = output {
        write_report(&result, path)?;
        info!("Results saved to {}", path);
    }

    Ok(())
}

/// Shared front half of every subcommand: parse the policy, wire up the
/// sources, run the pipeline.
pub(crate) fn run_reconciliation(
    status_file: &str,
    states_file: &str,
    no_apt_mark: bool,
    policy: &str,
) -> Result<Reconciliation> {
    let policy: ExclusionPolicy = policy.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let paths = SourcePaths {
        status: PathBuf::from(status_file),
        states: PathBuf::from(states_file),
    };

    let apt_mark = AptMark::new();
    let marks: Option<&dyn ManualMarkSource> = if no_apt_mark { None } else { Some(&apt_mark) };

    Ok(gather(&paths, policy, marks))
}

/// Write the plain-text report to a file.
fn write_report(result: &Reconciliation, path: &str) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "Packages explicitly installed by the user:")?;
    for pkg in &result.explicit {
        writeln!(file, "- {}", pkg)?;
    }
    Ok(())
}
