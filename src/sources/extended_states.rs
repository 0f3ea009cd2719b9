// src/sources/extended_states.rs

//! Reader for apt's extended_states database
//!
//! extended_states records why a package is on the system: a stanza with
//! `Auto-Installed: 1` marks a dependency apt pulled in automatically, any
//! other value marks a manual install. A stanza with no verdict at all is
//! folded into the manual set - a package apt tracks without an explicit
//! flag is still user-relevant.

use crate::error::{Error, Result};
use crate::sources::deb822::{Event, Tokenizer};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Why a package is on the system, as recorded by a single stanza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Reason {
    Auto,
    Manual,
    #[default]
    Unknown,
}

/// Per-stanza accumulator folded over the tokenizer events.
#[derive(Default)]
struct Block {
    name: Option<String>,
    reason: Reason,
}

/// The partition of extended_states into auto- and manually-installed names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedStates {
    pub auto_installed: BTreeSet<String>,
    pub manual: BTreeSet<String>,
}

impl ExtendedStates {
    /// Parse extended_states text. Total: malformed lines are skipped, and
    /// a trailing stanza without a terminator is still classified.
    pub fn parse(text: &str) -> ExtendedStates {
        let mut states = ExtendedStates::default();
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
                    key: "Auto-Installed",
                    value,
                } => {
                    block.reason = if value == "1" {
                        Reason::Auto
                    } else {
                        Reason::Manual
                    };
                }
                Event::Field { .. } => {}
                Event::BlockEnd => states.classify(&mut block),
            }
        }

        states
    }

    /// Read and parse an extended_states file.
    ///
    /// The file is optional on a real system (apt creates it lazily), so
    /// callers treat [`Error::SourceUnavailable`] as a degradation to empty
    /// sets rather than a fatal condition.
    pub fn load(path: &Path) -> Result<ExtendedStates> {
        let text = fs::read_to_string(path).map_err(|e| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::parse(&text))
    }

    /// Classify a finished stanza and reset the accumulator. A stanza with
    /// no `Package:` field carries nothing to classify and is dropped.
    fn classify(&mut self, block: &mut Block) {
        let Block { name, reason } = std::mem::take(block);
        let Some(name) = name else { return };

        match reason {
            Reason::Auto => {
                debug!("auto-installed: {}", name);
                self.auto_installed.insert(name);
            }
            Reason::Manual | Reason::Unknown => {
                debug!("manually installed: {}", name);
                self.manual.insert(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partitions_auto_and_manual() {
        let text = "Package: a\nAuto-Installed: 1\n\nPackage: b\nAuto-Installed: 0\n\nPackage: c\n";
        let states = ExtendedStates::parse(text);
        assert_eq!(states.auto_installed, set(&["a"]));
        assert_eq!(states.manual, set(&["b", "c"]));
    }

    #[test]
    fn test_missing_flag_counts_as_manual() {
        let states = ExtendedStates::parse("Package: standalone\nArchitecture: amd64\n");
        assert!(states.auto_installed.is_empty());
        assert_eq!(states.manual, set(&["standalone"]));
    }

    #[test]
    fn test_non_one_values_count_as_manual() {
        let states = ExtendedStates::parse("Package: a\nAuto-Installed: yes\n");
        assert_eq!(states.manual, set(&["a"]));
        assert!(states.auto_installed.is_empty());
    }

    #[test]
    fn test_indented_input() {
        // extended_states content quoted with list indentation still parses.
        let text = "    Package: package1\n    Architecture: amd64\n    Auto-Installed: 1\n    \n    Package: package2\n    Architecture: amd64\n    Auto-Installed: 0\n";
        let states = ExtendedStates::parse(text);
        assert_eq!(states.auto_installed, set(&["package1"]));
        assert_eq!(states.manual, set(&["package2"]));
    }

    #[test]
    fn test_stanza_without_package_is_skipped() {
        let states = ExtendedStates::parse("Auto-Installed: 1\n\nPackage: a\nAuto-Installed: 0\n");
        assert!(states.auto_installed.is_empty());
        assert_eq!(states.manual, set(&["a"]));
    }

    #[test]
    fn test_trailing_stanza_without_blank_line() {
        let states = ExtendedStates::parse("Package: a\nAuto-Installed: 1\n\nPackage: b\nAuto-Installed: 1");
        assert_eq!(states.auto_installed, set(&["a", "b"]));
    }

    #[test]
    fn test_adjacent_stanzas_without_blank_line() {
        let states = ExtendedStates::parse("Package: a\nAuto-Installed: 1\nPackage: b\n");
        assert_eq!(states.auto_installed, set(&["a"]));
        assert_eq!(states.manual, set(&["b"]));
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let text = "Package: a\nAuto-Installed: 1\n\nPackage: b\n";
        assert_eq!(ExtendedStates::parse(text), ExtendedStates::parse(text));
    }

    #[test]
    fn test_load_missing_file_is_source_unavailable() {
        let err = ExtendedStates::load(Path::new("/nonexistent/extended_states")).unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
    }
}
