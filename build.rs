use std::env;
use std::process::Command;

fn main() {
    // Environment override wins, otherwise the crate version
    let version = env::var("FWSTAMP_VERSION")
        .unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.1".to_string()));

    println!("cargo:rustc-env=FWSTAMP_VERSION={}", version);

    // Best effort: a source tarball has no repository
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string());

    if let Some(commit) = commit {
        println!("cargo:rustc-env=GIT_COMMIT={}", commit);
    }

    println!("cargo:rerun-if-env-changed=FWSTAMP_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
