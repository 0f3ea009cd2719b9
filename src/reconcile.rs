// src/reconcile.rs

//! Reconciliation of the three manual-install sources
//!
//! dpkg's status database, apt's extended_states, and apt-mark each answer
//! "was this installed on purpose?" for a different slice of the system.
//! Reconciliation takes the union of their votes - any one source vouching
//! for a package is enough - and keeps a cross-check report against
//! apt-mark so operators can see where the sources disagree. The report is
//! diagnostic only; it never removes a package from the final set.

use crate::sources::apt_mark::ManualMarkSource;
use crate::sources::dpkg_status;
use crate::sources::extended_states::ExtendedStates;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{info, warn};

/// Which names are withheld from the status-file candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExclusionPolicy {
    /// Exclude only packages extended_states marks auto-installed.
    #[default]
    AutoOnly,
    /// Exclude everything extended_states knows about; the status file then
    /// only vouches for packages with no recorded reason at all.
    Strict,
}

impl ExclusionPolicy {
    /// Build the exclusion set for the status reader.
    pub fn exclusion_set(&self, states: &ExtendedStates) -> BTreeSet<String> {
        match self {
            ExclusionPolicy::AutoOnly => states.auto_installed.clone(),
            ExclusionPolicy::Strict => states
                .auto_installed
                .union(&states.manual)
                .cloned()
                .collect(),
        }
    }
}

impl std::str::FromStr for ExclusionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "auto-only" => Ok(ExclusionPolicy::AutoOnly),
            "strict" => Ok(ExclusionPolicy::Strict),
            other => Err(format!(
                "unknown policy '{}' (expected auto-only or strict)",
                other
            )),
        }
    }
}

/// How the local databases and apt-mark disagree about one package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisagreementKind {
    /// The local databases vouch for a package apt-mark does not list.
    DetectedNotExternal,
    /// apt-mark lists a manual package the local databases did not detect.
    ExternalNotDetected,
}

/// A single cross-check finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disagreement {
    pub package: String,
    pub kind: DisagreementKind,
}

/// Paths to the on-disk sources.
#[derive(Debug, Clone)]
pub struct SourcePaths {
    pub status: PathBuf,
    pub states: PathBuf,
}

/// The full outcome of a reconciliation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Reconciliation {
    /// Union of every source's manual votes, the final answer.
    pub explicit: BTreeSet<String>,
    /// Candidates detected in the status file after exclusion.
    pub candidate: BTreeSet<String>,
    pub auto_installed: BTreeSet<String>,
    pub manual_from_states: BTreeSet<String>,
    pub external_manual: BTreeSet<String>,
    pub disagreements: Vec<Disagreement>,
    /// Source failures the run degraded over.
    pub notes: Vec<String>,
}

/// Combine the status-file candidates with the states and apt-mark votes.
///
/// Union, not intersection: a package makes the explicit list as soon as
/// one source vouches for it. The disagreement report compares everything
/// the local databases detected (candidates plus states-manual votes)
/// against apt-mark's list.
pub fn reconcile(
    candidate: BTreeSet<String>,
    states: ExtendedStates,
    external_manual: BTreeSet<String>,
) -> Reconciliation {
    let detected: BTreeSet<String> = candidate.union(&states.manual).cloned().collect();

    let mut explicit = detected.clone();
    explicit.extend(external_manual.iter().cloned());

    let mut disagreements = Vec::new();
    for name in detected.difference(&external_manual) {
        disagreements.push(Disagreement {
            package: name.clone(),
            kind: DisagreementKind::DetectedNotExternal,
        });
    }
    for name in external_manual.difference(&detected) {
        disagreements.push(Disagreement {
            package: name.clone(),
            kind: DisagreementKind::ExternalNotDetected,
        });
    }

    Reconciliation {
        explicit,
        candidate,
        auto_installed: states.auto_installed,
        manual_from_states: states.manual,
        external_manual,
        disagreements,
        notes: Vec::new(),
    }
}

/// Run the full pipeline: extended_states first, then the status scan
/// filtered by the policy's exclusion set, then the external marks, then
/// the merge.
///
/// Every source failure degrades to an empty set, is logged, and is
/// recorded in the result's notes; nothing here aborts the run. Passing
/// `None` for `marks` skips the external command entirely.
pub fn gather(
    paths: &SourcePaths,
    policy: ExclusionPolicy,
    marks: Option<&dyn ManualMarkSource>,
) -> Reconciliation {
    let mut notes = Vec::new();

    let states = match ExtendedStates::load(&paths.states) {
        Ok(states) => states,
        Err(e) => {
            warn!("{} - auto-installed data will be incomplete", e);
            notes.push(e.to_string());
            ExtendedStates::default()
        }
    };

    let exclude = policy.exclusion_set(&states);
    let candidate = match dpkg_status::load_status(&paths.status, &exclude) {
        Ok(candidate) => candidate,
        Err(e) => {
            warn!("{} - nothing can be detected from the status database", e);
            notes.push(e.to_string());
            BTreeSet::new()
        }
    };

    let external = match marks {
        Some(source) => match source.fetch() {
            Ok(set) => set,
            Err(e) => {
                warn!("{}", e);
                notes.push(e.to_string());
                BTreeSet::new()
            }
        },
        None => BTreeSet::new(),
    };

    let mut result = reconcile(candidate, states, external);
    result.notes = notes;

    info!(
        "{} packages explicitly installed, {} disagreements",
        result.explicit.len(),
        result.disagreements.len()
    );
    result
}
