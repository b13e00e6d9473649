//! Repository descriptor lookup
//!
//! A descriptor names the checked-out commit relative to the nearest tag:
//! `v0.8.1` when HEAD is tagged, `v0.8.1-3-g1a2b3c4` when it is three commits
//! past the tag, `g1a2b3c4` when the repository has no tags at all. Missing
//! version information never fails a build: [`resolve_descriptor`] swaps any
//! failure for [`FALLBACK_DESCRIPTOR`].

use crate::defaults::{DESCRIBE_ABBREV, FALLBACK_DESCRIPTOR, UNTAGGED_PREFIX};
use crate::exceptions::{FwstampError, Result};
use anyhow::Context;
use log::{debug, trace, warn};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Why the fallback descriptor was used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    NotARepository,
    GitUnavailable,
    NoCommits,
    Other,
}

impl FallbackReason {
    fn from_error(err: &FwstampError) -> Self {
        match err {
            FwstampError::NotARepository(_) => FallbackReason::NotARepository,
            FwstampError::GitUnavailable(_) => FallbackReason::GitUnavailable,
            FwstampError::NoCommits(_) => FallbackReason::NoCommits,
            _ => FallbackReason::Other,
        }
    }
}

/// A resolved repository descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    raw: String,
    fallback: Option<FallbackReason>,
}

impl Descriptor {
    /// Wrap a descriptor string produced by a successful query
    pub fn new<S: Into<String>>(raw: S) -> Self {
        Self {
            raw: raw.into(),
            fallback: None,
        }
    }

    /// The sentinel descriptor, tagged with the reason it was needed
    pub fn fallback(reason: FallbackReason) -> Self {
        Self {
            raw: FALLBACK_DESCRIPTOR.to_string(),
            fallback: Some(reason),
        }
    }

    /// Full descriptor text
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Descriptor without its leading type character (`v`, `g`, ...)
    pub fn stripped(&self) -> &str {
        let mut chars = self.raw.chars();
        chars.next();
        chars.as_str()
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        self.fallback
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Describe the repository rooted exactly at `repo_root`
///
/// Parent directories are not searched: the root must contain `.git`.
pub fn describe(repo_root: &Path) -> Result<Descriptor> {
    if !repo_root.join(".git").exists() {
        return Err(FwstampError::NotARepository(repo_root.to_path_buf()));
    }

    let git = which::which("git").map_err(|e| FwstampError::GitUnavailable(e.to_string()))?;
    let runner = GitRunner::new(git, repo_root);

    let abbrev = format!("--abbrev={DESCRIBE_ABBREV}");
    if let Some(described) = runner.run(&["describe", "--tags", &abbrev])? {
        debug!("🔖 git describe: {}", described);
        return Ok(Descriptor::new(described));
    }

    // No reachable tag: fall back to the bare abbreviated hash
    let short = format!("--short={DESCRIBE_ABBREV}");
    match runner.run(&["rev-parse", &short, "HEAD"])? {
        Some(hash) => {
            debug!("🔖 untagged repository, HEAD is {}", hash);
            Ok(Descriptor::new(format!("{UNTAGGED_PREFIX}{hash}")))
        }
        None => Err(FwstampError::NoCommits(format!(
            "HEAD does not resolve in {}",
            repo_root.display()
        ))),
    }
}

/// Describe the repository, substituting the fallback sentinel on any failure
pub fn resolve_descriptor(repo_root: &Path) -> Descriptor {
    match describe(repo_root) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            let reason = FallbackReason::from_error(&e);
            warn!(
                "⚠️ Using fallback descriptor {} ({:?}): {}",
                FALLBACK_DESCRIPTOR, reason, e
            );
            Descriptor::fallback(reason)
        }
    }
}

struct GitRunner {
    git: PathBuf,
    repo_root: PathBuf,
}

impl GitRunner {
    fn new(git: PathBuf, repo_root: &Path) -> Self {
        Self {
            git,
            repo_root: repo_root.to_path_buf(),
        }
    }

    /// Run a git subcommand; `Ok(None)` when git ran but exited non-zero
    fn run(&self, args: &[&str]) -> anyhow::Result<Option<String>> {
        trace!("git -C {:?} {}", self.repo_root, args.join(" "));
        let output = Command::new(&self.git)
            .arg("-C")
            .arg(&self.repo_root)
            .args(args)
            .output()
            .with_context(|| format!("failed to run git {}", args.join(" ")))?;

        if !output.status.success() {
            trace!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(None);
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if text.is_empty() { None } else { Some(text) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_available() -> bool {
        which::which("git").is_ok()
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args([
                "-c",
                "user.name=fwstamp",
                "-c",
                "user.email=fwstamp@example.com",
                "-c",
                "commit.gpgsign=false",
                "-c",
                "tag.gpgsign=false",
            ])
            .args(args)
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    fn init_repo() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        git(temp_dir.path(), &["init", "-q"]);
        temp_dir
    }

    #[test]
    fn test_stripped_removes_leading_character() {
        assert_eq!(Descriptor::new("v0.8.1-3-g1a2b3c4").stripped(), "0.8.1-3-g1a2b3c4");
        assert_eq!(Descriptor::new("g1a2b3c4").stripped(), "1a2b3c4");
        assert_eq!(Descriptor::new("").stripped(), "");
    }

    #[test]
    fn test_fallback_descriptor() {
        let descriptor = Descriptor::fallback(FallbackReason::NotARepository);
        assert_eq!(descriptor.as_str(), "g0000000");
        assert_eq!(descriptor.stripped(), "0000000");
        assert!(descriptor.is_fallback());
    }

    #[test]
    fn test_plain_directory_is_not_a_repository() {
        let temp_dir = TempDir::new().unwrap();
        let err = describe(temp_dir.path()).unwrap_err();
        assert!(matches!(err, FwstampError::NotARepository(_)));
    }

    #[test]
    fn test_resolve_falls_back_outside_repository() {
        let temp_dir = TempDir::new().unwrap();
        let descriptor = resolve_descriptor(temp_dir.path());
        assert_eq!(descriptor.as_str(), FALLBACK_DESCRIPTOR);
        assert_eq!(
            descriptor.fallback_reason(),
            Some(FallbackReason::NotARepository)
        );
    }

    #[test]
    fn test_repository_without_commits_falls_back() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        let descriptor = resolve_descriptor(repo.path());
        assert_eq!(descriptor.fallback_reason(), Some(FallbackReason::NoCommits));
    }

    #[test]
    fn test_untagged_repository_uses_hash() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        git(repo.path(), &["commit", "-q", "--allow-empty", "-m", "initial"]);

        let descriptor = describe(repo.path()).unwrap();
        assert!(descriptor.as_str().starts_with('g'));
        assert_eq!(descriptor.stripped().len(), DESCRIBE_ABBREV);
        assert!(!descriptor.is_fallback());
    }

    #[test]
    fn test_tagged_repository() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        git(repo.path(), &["commit", "-q", "--allow-empty", "-m", "initial"]);
        git(repo.path(), &["tag", "v1.2.3"]);

        assert_eq!(describe(repo.path()).unwrap().as_str(), "v1.2.3");

        git(repo.path(), &["commit", "-q", "--allow-empty", "-m", "next"]);
        let descriptor = describe(repo.path()).unwrap();
        assert!(descriptor.as_str().starts_with("v1.2.3-1-g"));
        assert!(descriptor.stripped().starts_with("1.2.3-1-g"));
    }
}
