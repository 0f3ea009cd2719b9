// src/lib.rs

//! debmark
//!
//! Determines which packages on a Debian-family system were explicitly
//! installed by the operator, as opposed to pulled in as dependencies.
//! Three records each hold part of the answer:
//!
//! - `/var/lib/dpkg/status` - what is actually installed
//! - `/var/lib/apt/extended_states` - why apt believes each package is there
//! - `apt-mark showmanual` - apt's own list of manual marks
//!
//! The library parses the two databases, queries the command, merges the
//! three with a union (any source vouching for a package is enough), and
//! reports where the sources disagree. Missing files and a failing command
//! degrade to empty sets; they never abort a run.

mod error;
pub mod reconcile;
pub mod sources;

pub use error::{Error, Result};
pub use reconcile::{
    gather, reconcile, Disagreement, DisagreementKind, ExclusionPolicy, Reconciliation,
    SourcePaths,
};
pub use sources::{AptMark, ExtendedStates, ManualMarkSource};
