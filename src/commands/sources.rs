// src/commands/sources.rs

//! Per-source breakdown of the reconciliation

use anyhow::Result;

use super::list::run_reconciliation;

/// Show how many packages each source vouches for and the final tally.
pub fn cmd_sources(
    status_file: &str,
    states_file: &str,
    no_apt_mark: bool,
    policy: &str,
) -> Result<()> {
    let result = run_reconciliation(status_file, states_file, no_apt_mark, policy)?;

    println!("debmark Source Breakdown");
    println!("========================");
    println!();
    println!("extended_states:");
    println!("  Auto-installed:     {}", result.auto_installed.len());
    println!("  Manually installed: {}", result.manual_from_states.len());
    println!();
    println!("dpkg status candidates: {}", result.candidate.len());
    println!("apt-mark showmanual:    {}", result.external_manual.len());
    println!();
    println!("Explicitly installed:   {}", result.explicit.len());
    println!("Disagreements:          {}", result.disagreements.len());

    if !result.notes.is_empty() {
        println!();
        println!("Source problems:");
        for note in &result.notes {
            println!("  {}", note);
        }
    }

    Ok(())
}
