// src/sources/apt_mark.rs

//! Adapter for `apt-mark showmanual`
//!
//! apt keeps its own authoritative record of manual marks, printed one
//! package name per line by `apt-mark showmanual`. The reconciler depends
//! only on the [`ManualMarkSource`] trait, so tests substitute canned sets
//! for the real command.

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::debug;
use wait_timeout::ChildExt;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A source of the system's manual-install marks.
pub trait ManualMarkSource {
    /// Fetch the set of manually marked package names.
    fn fetch(&self) -> Result<BTreeSet<String>>;
}

/// The real collaborator: `apt-mark showmanual` with a bounded runtime.
pub struct AptMark {
    timeout: Duration,
}

impl AptMark {
    pub fn new() -> Self {
        AptMark {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the subprocess timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for AptMark {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualMarkSource for AptMark {
    fn fetch(&self) -> Result<BTreeSet<String>> {
        // Fail with a readable error when apt-mark is not on PATH
        which::which("apt-mark")
            .map_err(|e| Error::ExternalCommand(format!("apt-mark not found in PATH: {}", e)))?;

        debug!("Running apt-mark showmanual");

        let mut child = Command::new("apt-mark")
            .arg("showmanual")
            .stdin(Stdio::null()) // Prevent stdin hangs
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::ExternalCommand(format!("Failed to spawn apt-mark: {}", e)))?;

        match child.wait_timeout(self.timeout)? {
            Some(status) => {
                let output = child.wait_with_output()?;

                if !status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    return Err(Error::ExternalCommand(format!(
                        "apt-mark showmanual failed with exit code {}: {}",
                        status.code().unwrap_or(-1),
                        stderr.trim()
                    )));
                }

                let marks: BTreeSet<String> = String::from_utf8_lossy(&output.stdout)
                    .lines()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();

                debug!("apt-mark reports {} manual packages", marks.len());
                Ok(marks)
            }
            None => {
                // Timeout - kill the process
                let _ = child.kill();
                Err(Error::ExternalCommand(format!(
                    "apt-mark showmanual timed out after {} seconds",
                    self.timeout.as_secs()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_never_panics() {
        // apt-mark may or may not exist in the test environment; either way
        // fetch must return a plain Result.
        let source = AptMark::new().with_timeout(Duration::from_secs(5));
        match source.fetch() {
            Ok(marks) => {
                for name in &marks {
                    assert!(!name.is_empty());
                }
            }
            Err(e) => {
                assert!(matches!(e, Error::ExternalCommand(_)));
            }
        }
    }
}
