//! Scoped ownership of the IR file the compiler writes next to a case.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Removes the artifact at `path` when dropped.
///
/// Held until the case outcome is known, so the file is gone afterwards
/// whether the case passed, mismatched, or the compiler failed half way
/// through writing it.
#[derive(Debug)]
pub struct ArtifactGuard {
    path: PathBuf,
}

impl ArtifactGuard {
    /// Take ownership of an artifact that already exists.
    pub fn adopt(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ArtifactGuard {
    fn drop(&mut self) {
        remove_artifact(&self.path);
    }
}

/// Modification time and length of a file.
type Stamp = (Option<SystemTime>, u64);

/// Records what sits at an artifact path before the compiler runs.
///
/// A file the compiler did not write (a hand-written expectation, output of
/// some other tool) is never claimed, so it survives the run untouched.
#[derive(Debug)]
pub struct ArtifactWatch {
    path: PathBuf,
    before: Option<Stamp>,
}

impl ArtifactWatch {
    pub fn before_compile(path: PathBuf) -> Self {
        let before = stamp(&path);
        Self { path, before }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Guard the artifact if the compiler created or rewrote it.
    pub fn claim(&self) -> Option<ArtifactGuard> {
        let after = stamp(&self.path)?;
        if self.before == Some(after) {
            log::debug!("leaving untouched file {}", self.path.display());
            return None;
        }
        Some(ArtifactGuard::adopt(self.path.clone()))
    }
}

fn stamp(path: &Path) -> Option<Stamp> {
    let meta = fs::metadata(path).ok().filter(|meta| meta.is_file())?;
    Some((meta.modified().ok(), meta.len()))
}

fn remove_artifact(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => log::debug!("removed artifact {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("failed to remove artifact {}: {e}", path.display()),
    }
}
