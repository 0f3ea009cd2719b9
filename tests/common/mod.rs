// tests/common/mod.rs

//! Shared fixtures and helpers for the reconciliation integration tests.

use debmark::{Error, ManualMarkSource, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Canned apt-mark stand-in.
pub struct StaticMarks(pub BTreeSet<String>);

impl ManualMarkSource for StaticMarks {
    fn fetch(&self) -> Result<BTreeSet<String>> {
        Ok(self.0.clone())
    }
}

/// apt-mark stand-in that always fails, like a missing binary.
pub struct BrokenMarks;

impl ManualMarkSource for BrokenMarks {
    fn fetch(&self) -> Result<BTreeSet<String>> {
        Err(Error::ExternalCommand(
            "apt-mark not found in PATH".to_string(),
        ))
    }
}

pub fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Write status and extended_states fixtures into a tempdir.
///
/// Returns (TempDir, status_path, states_path) - keep the TempDir alive to
/// prevent cleanup.
pub fn setup_source_files(status: &str, states: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let status_path = temp_dir.path().join("status");
    let states_path = temp_dir.path().join("extended_states");
    fs::write(&status_path, status).unwrap();
    fs::write(&states_path, states).unwrap();
    (temp_dir, status_path, states_path)
}
