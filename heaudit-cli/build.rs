//! Build script for heaudit-cli
//!
//! Stamps the binary with the source revision of its rule set:
//! - `GIT_HASH`: short commit hash, suffixed `-dirty` for uncommitted changes
//! - `BUILD_TIMESTAMP`: RFC 3339, taken from `SOURCE_DATE_EPOCH` when set
//! - `BUILD_PROFILE`: cargo profile (debug/release)

use std::path::PathBuf;
use std::process::Command;

use chrono::{DateTime, SecondsFormat, Utc};

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok().map(|s| s.trim().to_string())
}

fn main() {
    let git_hash = match git(&["rev-parse", "--short=8", "HEAD"]) {
        Some(hash) => match git(&["status", "--porcelain", "--untracked-files=no"]) {
            Some(changes) if !changes.is_empty() => format!("{}-dirty", hash),
            _ => hash,
        },
        None => "unknown".to_string(),
    };

    let build_time = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|epoch| epoch.parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_time.to_rfc3339_opts(SecondsFormat::Secs, true));
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);

    // Rerun when the checked-out commit or the index moves, not on every build
    if let Some(git_dir) = git(&["rev-parse", "--absolute-git-dir"]) {
        let git_dir = PathBuf::from(git_dir);
        println!("cargo:rerun-if-changed={}", git_dir.join("HEAD").display());
        println!("cargo:rerun-if-changed={}", git_dir.join("index").display());
        if let Some(head_ref) = git(&["symbolic-ref", "-q", "HEAD"]) {
            println!("cargo:rerun-if-changed={}", git_dir.join(head_ref).display());
        }
    }
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
}
