// src/commands/diff.rs

//! Cross-check report between the local databases and apt-mark

use anyhow::Result;
use debmark::{Disagreement, DisagreementKind};

use super::list::run_reconciliation;

/// Print every disagreement, sorted by package name.
pub fn cmd_diff(status_file: &str, states_file: &str, policy: &str) -> Result<()> {
    // apt-mark is the whole point of the cross-check, so it is never skipped here
    let result = run_reconciliation(status_file, states_file, false, policy)?;

    let mut disagreements = result.disagreements.clone();
    disagreements.sort_by(|a, b| a.package.cmp(&b.package));

    if disagreements.is_empty() {
        println!(
            "No inconsistencies were found between the detected packages and apt-mark showmanual."
        );
        return Ok(());
    }

    for Disagreement { package, kind } in &disagreements {
        match kind {
            DisagreementKind::DetectedNotExternal => {
                println!(
                    "{}: detected in the local databases but not listed by apt-mark",
                    package
                );
            }
            DisagreementKind::ExternalNotDetected => {
                println!(
                    "{}: listed by apt-mark but not detected in the local databases",
                    package
                );
            }
        }
    }

    println!();
    println!("{} inconsistencies found", disagreements.len());

    Ok(())
}
