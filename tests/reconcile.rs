// tests/reconcile.rs

//! End-to-end reconciliation tests over on-disk fixtures: source files in a
//! tempdir, a canned apt-mark stand-in, the full gather pipeline.

mod common;

use common::{names, setup_source_files, BrokenMarks, StaticMarks};
use debmark::{gather, DisagreementKind, ExclusionPolicy, SourcePaths};

const STATUS: &str = "\
Package: a
Status: install ok installed
Priority: optional

Package: b
Status: install ok installed
Priority: optional

Package: c
Status: install ok not-installed
Priority: optional
";

const STATES: &str = "\
Package: a
Architecture: amd64
Auto-Installed: 1

Package: b
Architecture: amd64
Auto-Installed: 0

Package: c
Architecture: amd64
";

#[test]
fn test_full_pipeline_against_reference_fixtures() {
    let (_tmp, status_path, states_path) = setup_source_files(STATUS, STATES);
    let paths = SourcePaths {
        status: status_path,
        states: states_path,
    };

    let marks = StaticMarks(names(&["b", "d"]));
    let result = gather(&paths, ExclusionPolicy::AutoOnly, Some(&marks));

    assert_eq!(result.auto_installed, names(&["a"]));
    assert_eq!(result.manual_from_states, names(&["b", "c"]));
    // a is excluded as auto-installed, c is not actually installed.
    assert_eq!(result.candidate, names(&["b"]));
    assert_eq!(result.explicit, names(&["b", "c", "d"]));

    let detected_not_external: Vec<_> = result
        .disagreements
        .iter()
        .filter(|d| d.kind == DisagreementKind::DetectedNotExternal)
        .map(|d| d.package.as_str())
        .collect();
    let external_not_detected: Vec<_> = result
        .disagreements
        .iter()
        .filter(|d| d.kind == DisagreementKind::ExternalNotDetected)
        .map(|d| d.package.as_str())
        .collect();
    assert_eq!(detected_not_external, vec!["c"]);
    assert_eq!(external_not_detected, vec!["d"]);

    assert!(result.notes.is_empty());
}

#[test]
fn test_gather_is_idempotent() {
    let (_tmp, status_path, states_path) = setup_source_files(STATUS, STATES);
    let paths = SourcePaths {
        status: status_path,
        states: states_path,
    };
    let marks = StaticMarks(names(&["b", "d"]));

    let first = gather(&paths, ExclusionPolicy::AutoOnly, Some(&marks));
    let second = gather(&paths, ExclusionPolicy::AutoOnly, Some(&marks));

    assert_eq!(first.explicit, second.explicit);
    assert_eq!(first.candidate, second.candidate);
    assert_eq!(first.disagreements, second.disagreements);
}

#[test]
fn test_strict_policy_excludes_states_manual_packages() {
    let (_tmp, status_path, states_path) = setup_source_files(STATUS, STATES);
    let paths = SourcePaths {
        status: status_path,
        states: states_path,
    };

    let result = gather(&paths, ExclusionPolicy::Strict, None);

    // b is known to extended_states, so under strict it cannot be a status
    // candidate; it still reaches the final set through its states vote.
    assert!(result.candidate.is_empty());
    assert_eq!(result.explicit, names(&["b", "c"]));
}

#[test]
fn test_missing_extended_states_degrades_to_empty_sets() {
    let (tmp, status_path, _states) = setup_source_files(STATUS, STATES);
    let paths = SourcePaths {
        status: status_path,
        states: tmp.path().join("does-not-exist"),
    };

    let result = gather(&paths, ExclusionPolicy::AutoOnly, None);

    // With no reason data nothing is excluded: a and b are both candidates.
    assert!(result.auto_installed.is_empty());
    assert!(result.manual_from_states.is_empty());
    assert_eq!(result.candidate, names(&["a", "b"]));
    assert_eq!(result.explicit, names(&["a", "b"]));
    assert_eq!(result.notes.len(), 1);
}

#[test]
fn test_missing_status_file_yields_empty_candidates_not_a_crash() {
    let (tmp, _status, states_path) = setup_source_files(STATUS, STATES);
    let paths = SourcePaths {
        status: tmp.path().join("does-not-exist"),
        states: states_path,
    };

    let marks = StaticMarks(names(&["d"]));
    let result = gather(&paths, ExclusionPolicy::AutoOnly, Some(&marks));

    // The states and apt-mark votes survive the degraded status source.
    assert!(result.candidate.is_empty());
    assert_eq!(result.explicit, names(&["b", "c", "d"]));
    assert_eq!(result.notes.len(), 1);
}

#[test]
fn test_failing_mark_source_degrades_to_empty_external_set() {
    let (_tmp, status_path, states_path) = setup_source_files(STATUS, STATES);
    let paths = SourcePaths {
        status: status_path,
        states: states_path,
    };

    let result = gather(&paths, ExclusionPolicy::AutoOnly, Some(&BrokenMarks));

    assert!(result.external_manual.is_empty());
    assert_eq!(result.explicit, names(&["b", "c"]));
    assert_eq!(result.notes, vec!["apt-mark not found in PATH".to_string()]);
}

#[test]
fn test_skipping_apt_mark_leaves_no_note() {
    let (_tmp, status_path, states_path) = setup_source_files(STATUS, STATES);
    let paths = SourcePaths {
        status: status_path,
        states: states_path,
    };

    let result = gather(&paths, ExclusionPolicy::AutoOnly, None);

    assert!(result.external_manual.is_empty());
    assert!(result.notes.is_empty());
}

#[test]
fn test_trailing_stanza_without_blank_line_is_still_counted() {
    let status = "Package: zlib1g\nStatus: install ok installed";
    let states = "Package: zlib1g\nAuto-Installed: 0";
    let (_tmp, status_path, states_path) = setup_source_files(status, states);
    let paths = SourcePaths {
        status: status_path,
        states: states_path,
    };

    let result = gather(&paths, ExclusionPolicy::AutoOnly, None);

    assert_eq!(result.candidate, names(&["zlib1g"]));
    assert_eq!(result.explicit, names(&["zlib1g"]));
}

#[test]
fn test_every_source_vote_reaches_the_final_set() {
    let status = "Package: only-status\nStatus: install ok installed\n";
    let states = "Package: only-states\nAuto-Installed: 0\n";
    let (_tmp, status_path, states_path) = setup_source_files(status, states);
    let paths = SourcePaths {
        status: status_path,
        states: states_path,
    };

    let marks = StaticMarks(names(&["only-apt-mark"]));
    let result = gather(&paths, ExclusionPolicy::AutoOnly, Some(&marks));

    assert_eq!(
        result.explicit,
        names(&["only-apt-mark", "only-states", "only-status"])
    );
}
