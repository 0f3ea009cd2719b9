// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: dpkg status database path
fn status_file_arg() -> Arg {
    Arg::new("status_file")
        .short('s')
        .long("status-file")
        .value_name("PATH")
        .default_value("/var/lib/dpkg/status")
        .help("Path to the dpkg status database")
}

/// Common argument: apt extended_states path
fn states_file_arg() -> Arg {
    Arg::new("states_file")
        .short('e')
        .long("states-file")
        .value_name("PATH")
        .default_value("/var/lib/apt/extended_states")
        .help("Path to the apt extended_states database")
}

/// Common argument: skip the apt-mark invocation
fn no_apt_mark_arg() -> Arg {
    Arg::new("no_apt_mark")
        .long("no-apt-mark")
        .action(clap::ArgAction::SetTrue)
        .help("Do not invoke apt-mark showmanual")
}

/// Common argument: exclusion policy
fn policy_arg() -> Arg {
    Arg::new("policy")
        .long("policy")
        .default_value("auto-only")
        .help("Exclusion policy for status candidates: auto-only or strict")
}

fn build_cli() -> Command {
    Command::new("debmark")
        .version(env!("CARGO_PKG_VERSION"))
        .author("debmark Contributors")
        .about("Reconciles dpkg, apt extended_states, and apt-mark into one explicit-install list")
        .subcommand_required(false)
        .subcommand(
            Command::new("list")
                .about("List packages explicitly installed by the operator")
                .arg(status_file_arg())
                .arg(states_file_arg())
                .arg(no_apt_mark_arg())
                .arg(policy_arg())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("PATH")
                        .help("Also write the list to a file"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(clap::ArgAction::SetTrue)
                        .help("Emit the full report as JSON"),
                ),
        )
        .subcommand(
            Command::new("diff")
                .about("Show disagreements between detected packages and apt-mark")
                .arg(status_file_arg())
                .arg(states_file_arg())
                .arg(policy_arg()),
        )
        .subcommand(
            Command::new("sources")
                .about("Show the per-source breakdown behind the reconciliation")
                .arg(status_file_arg())
                .arg(states_file_arg())
                .arg(no_apt_mark_arg())
                .arg(policy_arg()),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("debmark.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
        return;
    }

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
