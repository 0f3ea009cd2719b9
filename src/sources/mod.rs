// src/sources/mod.rs

//! The three sources of manual-install evidence
//!
//! Each source answers "was this package installed on purpose?" for a
//! different slice of the system: the dpkg status database knows what is
//! installed, apt's extended_states knows why, and `apt-mark showmanual`
//! is apt's own list of manual marks. The `deb822` tokenizer is the shared
//! primitive behind the two file readers.

pub mod apt_mark;
pub mod deb822;
pub mod dpkg_status;
pub mod extended_states;

pub use apt_mark::{AptMark, ManualMarkSource};
pub use extended_states::ExtendedStates;
