use std::env;
use std::process::Command;

fn main() {
    let pkg_version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let release = env::var("PROFILE").map(|p| p == "release").unwrap_or(false);

    let version = if release {
        pkg_version
    } else {
        match git_revision() {
            Some((hash, true)) => format!("{}-dev+{}.dirty", pkg_version, hash),
            Some((hash, false)) => format!("{}-dev+{}", pkg_version, hash),
            None => format!("{}-dev+unknown", pkg_version),
        }
    };

    println!("cargo:rustc-env=AGENT_ONBOARD_VERSION={}", version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}

/// Short commit hash plus whether the work tree has staged or unstaged edits.
fn git_revision() -> Option<(String, bool)> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();

    let dirty = [&["diff", "--quiet"][..], &["diff", "--cached", "--quiet"][..]]
        .iter()
        .any(|args| {
            Command::new("git")
                .args(*args)
                .status()
                .map(|status| !status.success())
                .unwrap_or(false)
        });

    Some((hash, dirty))
}
