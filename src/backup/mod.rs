//! Rotating slot-based backups.
//!
//! A `BackupManager` owns one backup directory and keeps at most `SLOT_COUNT`
//! snapshots of a data file in it, one per slot:
//! - snapshots are written to slots in order, wrapping around after the last
//! - writing to an occupied slot evicts the previous snapshot first
//! - the directory listing is the only index, rescanned on every call
//!
//! Mutating operations (creation and retention cleanup) are serialized by a lock
//! held by the manager. Lookups and listings are not, so a restore racing a creation
//! on the same slot may briefly see no snapshot.

mod index;
pub mod name;
mod reader;
mod writer;

pub use name::{parse_slot, SnapshotName, EXTENSION, NO_DESCRIPTION, SLOT_COUNT};
pub use reader::BackupEntry;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use parking_lot::{Mutex, MutexGuard};
use walkdir::WalkDir;

use crate::error::{BackupError, Result};

pub struct BackupManager {
    dir: PathBuf,
    // next slot to write, guards every directory mutation
    cursor: Mutex<usize>,
    remove: fn(&Path) -> io::Result<()>,
}

impl BackupManager {
    /// Open the backup directory at `dir`, creating it if needed, and recover
    /// the rotation cursor from the snapshots already there.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if dir.as_os_str().is_empty() {
            return Err(BackupError::EmptyDirectory);
        }

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|source| BackupError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            info!("created backup directory at: {}", dir.display());
        } else if !dir.is_dir() {
            return Err(BackupError::CreateDir {
                path: dir,
                source: io::Error::new(io::ErrorKind::AlreadyExists, "path exists and is not a directory"),
            });
        }

        let files = regular_files(&dir)?;
        let cursor = index::recover_cursor(&files);

        Ok(BackupManager {
            dir,
            cursor: Mutex::new(cursor),
            remove: delete_from_disk,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Slot the next backup will be written to.
    pub fn current_index(&self) -> usize {
        *self.cursor.lock()
    }

    /// Held for the duration of any operation that deletes or writes files.
    pub(crate) fn mutation_guard(&self) -> MutexGuard<'_, usize> {
        self.cursor.lock()
    }

    /// Delete one file on behalf of eviction or retention. A file that is already
    /// gone is not an error and yields `Ok(false)`.
    pub(crate) fn remove_file(&self, path: &Path) -> io::Result<bool> {
        match (self.remove)(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_remover(mut self, remove: fn(&Path) -> io::Result<()>) -> Self {
        self.remove = remove;
        self
    }
}

fn delete_from_disk(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

/// Regular files directly inside `dir`, in directory order.
/// Subdirectories and symlinks are skipped.
pub(crate) fn regular_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false);

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| BackupError::io(dir, io::Error::from(e)))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("backups");

        let manager = BackupManager::new(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(manager.dir(), dir.as_path());
        assert_eq!(manager.current_index(), 0);
    }

    #[test]
    fn empty_path_is_rejected() {
        let err = BackupManager::new("").err().unwrap();
        assert!(matches!(err, BackupError::EmptyDirectory));
    }

    #[test]
    fn path_occupied_by_a_file_fails() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();

        assert!(BackupManager::new(&file).is_err());
    }

    #[test]
    fn recovers_cursor_from_existing_snapshots() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("7_manual_2024-01-01_00-00-00-000.json"), "{}").unwrap();

        let manager = BackupManager::new(tmp.path()).unwrap();

        assert_eq!(manager.current_index(), 8);
    }

    #[test]
    fn stray_high_slot_counts_toward_recovery() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("42_stray_2024-01-01_00-00-00-000.json"), "{}").unwrap();
        fs::write(tmp.path().join("1_x_2024-01-01_00-00-00-000.json"), "{}").unwrap();

        let manager = BackupManager::new(tmp.path()).unwrap();

        assert_eq!(manager.current_index(), 3);
    }

    #[test]
    fn regular_files_skips_subdirectories() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("0_a_t.json"), "{}").unwrap();
        fs::create_dir(tmp.path().join("1_dir_t.json")).unwrap();

        let files = regular_files(tmp.path()).unwrap();

        assert_eq!(files, vec![tmp.path().join("0_a_t.json")]);
    }
}
