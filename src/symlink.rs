use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// What `reconcile_link` did to the link path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOutcome {
    /// Neither the target nor an existing entry was present.
    Skipped,
    Created,
    /// An existing file, directory placeholder or symlink was removed first.
    Replaced,
}

/// Points `link` at `target`, replacing whatever currently sits at `link`.
///
/// `target` is relative to the link's parent directory and is stored verbatim.
/// Nothing happens when the target does not resolve and the link path is free.
pub fn reconcile_link(link: &Path, target: &Path) -> Result<LinkOutcome> {
    // symlink_metadata does not follow the link, so broken links still count.
    let occupied = match fs::symlink_metadata(link) {
        Ok(meta) => Some(meta),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to inspect {}", link.display()));
        }
    };

    let resolved = match link.parent() {
        Some(dir) => resolve_lexically(dir, target),
        None => target.to_path_buf(),
    };
    if occupied.is_none() && !resolved.exists() {
        tracing::debug!(
            link = %link.display(),
            target = %resolved.display(),
            "target missing and link path free, skipping"
        );
        return Ok(LinkOutcome::Skipped);
    }

    let outcome = match occupied {
        Some(meta) => {
            let removed = if meta.file_type().is_dir() {
                fs::remove_dir(link)
            } else {
                fs::remove_file(link)
            };
            removed.with_context(|| format!("Failed to remove {}", link.display()))?;
            LinkOutcome::Replaced
        }
        None => LinkOutcome::Created,
    };

    std::os::unix::fs::symlink(target, link).with_context(|| {
        format!("Failed to link {} -> {}", link.display(), target.display())
    })?;

    tracing::info!(
        link = %link.display(),
        target = %target.display(),
        ?outcome,
        "compatibility link in place"
    );
    Ok(outcome)
}

/// Joins `target` onto `dir`, folding `.` and `..` without touching the filesystem.
///
/// The kernel refuses to walk `..` through a directory that does not exist, so a
/// missing link directory must not hide an existing target.
fn resolve_lexically(dir: &Path, target: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in dir.join(target).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
