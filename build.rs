use std::process::Command;

// Embed `git describe` output as the CLI version, falling back to the crate version.
fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    let version = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().trim_start_matches('v').to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=TASKBOARD_VERSION={version}");
}
