// src/sources/dpkg_status.rs

//! Reader for the dpkg status database
//!
//! Walks /var/lib/dpkg/status stanza by stanza and collects the packages
//! that are actually on disk (`Status: install ok installed`) and not ruled
//! out by the caller's exclusion set. Exclusion is plain set membership;
//! deciding what goes into the set is the reconciler's policy call.

use crate::error::{Error, Result};
use crate::sources::deb822::{Event, Tokenizer};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Substring dpkg writes for a package that is fully installed.
const INSTALLED_MARKER: &str = "install ok installed";

/// Per-stanza accumulator folded over the tokenizer events.
#[derive(Default)]
struct Block {
    name: Option<String>,
    installed: bool,
}

/// Collect candidate explicitly-installed packages from status text.
///
/// A package makes the candidate set when its stanza shows it installed and
/// its name is not in `exclude`. The last `Status:` line in a stanza wins,
/// though dpkg normally writes exactly one.
pub fn parse_status(text: &str, exclude: &BTreeSet<String>) -> BTreeSet<String> {
    let mut candidates = BTreeSet::new();
    let mut block = Block::default();

    for event in Tokenizer::new(text) {
        match event {
            Event::Field {
                key: "Package",
                value,
            } => {
                block.name = Some(value.to_string());
            }
            Event::Field {
                key: "Status",
                value,
            } => {
                block.installed = value.contains(INSTALLED_MARKER);
            }
            Event::Field { .. } => {}
            Event::BlockEnd => {
                let Block { name, installed } = std::mem::take(&mut block);
                let Some(name) = name else { continue };

                let excluded = exclude.contains(&name);
                if installed && !excluded {
                    debug!("explicitly installed: {}", name);
                    candidates.insert(name);
                } else {
                    debug!(
                        "skipped {} (installed: {}, excluded: {})",
                        name, installed, excluded
                    );
                }
            }
        }
    }

    candidates
}

/// Read and parse a dpkg status file.
///
/// The status database is the primary source; when it cannot be read the
/// caller reports the failure and proceeds with an empty candidate set
/// rather than crashing.
pub fn load_status(path: &Path, exclude: &BTreeSet<String>) -> Result<BTreeSet<String>> {
    let text = fs::read_to_string(path).map_err(|e| Error::SourceUnavailable {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_status(&text, exclude))
}
