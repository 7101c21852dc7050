//! Snapshot file storage
//!
//! The whole state is written as one JSON file. Saves take an exclusive lock
//! on a sidecar lock file and go through a temp file + rename.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::progress::HabitTracker;
use crate::snapshot::{LoadReport, Snapshot};

/// File-backed snapshot store
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
    pretty: bool,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: false,
        }
    }

    /// Write indented JSON instead of a single line
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the saved tracker, or `None` if nothing has been saved yet
    pub fn load(&self) -> Result<Option<(HabitTracker, LoadReport)>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read habit data: {}", self.path.display()))?;

        let (snapshot, report) = Snapshot::from_json_str(&content)
            .with_context(|| format!("Failed to load habit data: {}", self.path.display()))?;

        if !report.is_clean() {
            tracing::warn!(
                "Recovered habit data from {} (sections: {:?}, dropped habits: {:?}, dropped achievements: {:?})",
                self.path.display(),
                report.recovered_sections,
                report.skipped_habits,
                report.skipped_achievements
            );
        }

        Ok(Some((snapshot.into_tracker(), report)))
    }

    /// Save the tracker with file locking and an atomic write
    pub fn save(&self, tracker: &HabitTracker) -> Result<()> {
        let content = tracker
            .snapshot()
            .to_json_string(self.pretty)
            .context("Failed to serialize habit data")?;
        write_atomic(&self.path, content.as_bytes())?;
        tracing::debug!("Saved habit data to {}", self.path.display());
        Ok(())
    }

    /// Write an indented copy of the tracker to `dest`
    pub fn export(tracker: &HabitTracker, dest: &Path) -> Result<()> {
        let content = tracker
            .snapshot()
            .to_json_string(true)
            .context("Failed to serialize habit data")?;
        write_atomic(dest, content.as_bytes())
    }

    /// Delete the data file (no-op if absent)
    pub fn remove(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("Failed to delete habit data: {}", self.path.display()))?;
        }
        let lock_path = lock_path(&self.path);
        if lock_path.exists() {
            let _ = std::fs::remove_file(&lock_path);
        }
        Ok(())
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

/// Exclusive lock + temp file + rename, creating the parent directory if needed
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // Lock file is separate from the target so the rename does not drop the lock
    let lock_path = lock_path(path);
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| format!("Failed to acquire lock: {}", lock_path.display()))?;

    let mut temp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;

    temp_file
        .sync_all()
        .with_context(|| format!("Failed to sync {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename into place: {}", path.display()))?;

    // Lock is released when lock_file is dropped
    Ok(())
}
