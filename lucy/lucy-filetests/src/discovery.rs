//! Finding and loading test case files.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::HarnessConfig;
use crate::error::FiletestError;
use crate::test_case::TestCase;

/// A case file that exists but could not be read as text.
#[derive(Debug)]
pub struct CaseReadError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl CaseReadError {
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl fmt::Display for CaseReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to read {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for CaseReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Case files of one directory, loaded one at a time as they are iterated.
#[derive(Debug)]
pub struct CaseFiles {
    paths: std::vec::IntoIter<PathBuf>,
    marker: String,
}

impl Iterator for CaseFiles {
    type Item = Result<TestCase, CaseReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.next()?;
        Some(load_case(path, &self.marker))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}

impl ExactSizeIterator for CaseFiles {}

/// List the case files directly inside `dir`, sorted by file name.
///
/// Only the listing happens here; each file is read when the iterator reaches it.
pub fn discover_cases(dir: &Path, config: &HarnessConfig) -> Result<CaseFiles, FiletestError> {
    if !dir.is_dir() {
        return Err(FiletestError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| FiletestError::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        // Follows symlinks, unlike entry.file_type()
        if !entry.path().is_file() {
            continue;
        }
        if config.selects(&entry.file_name().to_string_lossy()) {
            paths.push(entry.into_path());
        }
    }

    log::info!("found {} test cases in {}", paths.len(), dir.display());
    Ok(CaseFiles {
        paths: paths.into_iter(),
        marker: config.comment_marker.clone(),
    })
}

/// Read a single case file and extract its expected IR.
pub fn load_case(path: PathBuf, marker: &str) -> Result<TestCase, CaseReadError> {
    match fs::read_to_string(&path) {
        Ok(source) => Ok(TestCase::new(path, source, marker)),
        Err(source) => Err(CaseReadError { path, source }),
    }
}
