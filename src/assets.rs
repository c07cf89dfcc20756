//! Asset directory sync.
//!
//! Copies named asset subtrees (stylesheets, images, scripts) verbatim from
//! a source tree to an output tree, preserving relative structure.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

/// Asset sync errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Report of one sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Names of the asset directories actually copied.
    pub copied: Vec<String>,
}

/// Asset sync job: copy named subdirectories from a source tree to an
/// output tree.
///
/// All three inputs are optional; [`run`](AssetSync::run) is a no-op until
/// the output directory, the source directory, and at least one directory
/// name are all set.
#[derive(Debug, Clone, Default)]
pub struct AssetSync {
    output_dir: Option<PathBuf>,
    source_dir: Option<PathBuf>,
    dirs: Vec<String>,
}

impl AssetSync {
    /// Create an empty sync job.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the destination tree.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the source tree containing the asset subdirectories.
    #[must_use]
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    /// Set the subdirectory names to copy.
    #[must_use]
    pub fn dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Copy each named subdirectory that exists under the source tree.
    ///
    /// Returns without touching the filesystem when any input is unset.
    /// Names whose source directory is missing are skipped silently.
    pub fn run(&self) -> Result<SyncReport> {
        let (Some(output_dir), Some(source_dir)) = (&self.output_dir, &self.source_dir) else {
            return Ok(SyncReport::default());
        };
        if self.dirs.is_empty() {
            return Ok(SyncReport::default());
        }

        if !output_dir.exists() {
            fs::create_dir_all(output_dir)?;
        }

        let mut report = SyncReport::default();
        for name in &self.dirs {
            let src = source_dir.join(name);
            if !src.is_dir() {
                debug!(dir = %src.display(), "asset source missing, skipping");
                continue;
            }

            copy_dir_recursive(&src, &output_dir.join(name))?;
            info!(dir = %name, dest = %output_dir.display(), "assets updated");
            report.copied.push(name.clone());
        }

        Ok(report)
    }
}

/// Copy every entry of `src` into `dst`, creating `dst` if missing.
///
/// Subdirectories are copied to arbitrary depth; files are copied
/// byte-for-byte, overwriting any existing destination entry.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let path = entry.path();
        let dest = dst.join(entry.file_name());

        if path.is_dir() {
            copy_dir_recursive(&path, &dest)?;
        } else {
            fs::copy(&path, &dest)?;
            debug!(src = %path.display(), dest = %dest.display(), "copied asset");
        }
    }

    Ok(())
}
