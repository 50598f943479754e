use std::fs;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use super::name::{parse_slot, SnapshotName};
use super::{regular_files, BackupManager};
use crate::error::{BackupError, Result};

/// A file in the backup directory, as shown by `slotback list`.
#[derive(Debug, Clone, Serialize)]
pub struct BackupEntry {
    pub path: PathBuf,
    /// `None` for files that don't follow the snapshot naming scheme.
    pub slot: Option<usize>,
    pub description: Option<String>,
    pub timestamp: Option<String>,
    pub size_bytes: u64,
    /// Last modification, seconds since the Unix epoch.
    pub modified: Option<i64>,
}

impl BackupManager {
    /// Locate the snapshot currently held in `slot`.
    ///
    /// Only the location is returned, copying it back over the live file is left
    /// to the caller.
    pub fn restore_backup_by_index(&self, slot: usize) -> Result<PathBuf> {
        regular_files(&self.dir)?
            .into_iter()
            .find(|path| parse_slot(path) == Some(slot))
            .ok_or(BackupError::NotFound(slot))
    }

    /// All files in the backup directory, ordered by slot.
    ///
    /// Files without a parsable slot come first. Equal slots are ordered by name.
    pub fn list_backups(&self) -> Result<Vec<PathBuf>> {
        Ok(self.keyed_files()?.into_iter().map(|(_, path)| path).collect())
    }

    /// Same ordering as `list_backups`, with each file's name fields and metadata.
    pub fn backup_entries(&self) -> Result<Vec<BackupEntry>> {
        let entries = self
            .keyed_files()?
            .into_iter()
            .map(|(slot, path)| {
                let name = SnapshotName::parse(&path);
                let metadata = fs::metadata(&path).ok();

                BackupEntry {
                    slot,
                    description: name.as_ref().and_then(|n| n.description().map(str::to_string)),
                    timestamp: name.map(|n| n.timestamp),
                    size_bytes: metadata.as_ref().map_or(0, |m| m.len()),
                    modified: metadata
                        .and_then(|m| m.modified().ok())
                        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                        .and_then(|d| i64::try_from(d.as_secs()).ok()),
                    path,
                }
            })
            .collect();

        Ok(entries)
    }

    // slot key for every file, sorted; `parse_slot` runs once per file
    fn keyed_files(&self) -> Result<Vec<(Option<usize>, PathBuf)>> {
        let mut keyed: Vec<(Option<usize>, PathBuf)> = regular_files(&self.dir)?
            .into_iter()
            .map(|path| (parse_slot(&path), path))
            .collect();

        keyed.sort();
        Ok(keyed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, BackupManager) {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("addressbook.json");
        fs::write(&source, "data").unwrap();
        let manager = BackupManager::new(tmp.path().join("backups")).unwrap();
        (tmp, source, manager)
    }

    #[test]
    fn restore_returns_existing_snapshot() {
        let (_tmp, source, manager) = setup();
        let slot = manager.create_indexed_backup(&source, Some("restoreTest")).unwrap();

        let path = manager.restore_backup_by_index(slot).unwrap();

        assert!(path.exists());
        assert_eq!(parse_slot(&path), Some(slot));
    }

    #[test]
    fn restore_missing_slot_is_not_found() {
        let (_tmp, _source, manager) = setup();

        let err = manager.restore_backup_by_index(9).unwrap_err();

        assert!(matches!(err, BackupError::NotFound(9)));
        assert_eq!(err.to_string(), "backup with index 9 not found");
    }

    #[test]
    fn restore_does_not_touch_the_snapshot() {
        let (_tmp, source, manager) = setup();
        manager.create_indexed_backup(&source, None).unwrap();
        fs::write(&source, "changed").unwrap();

        let path = manager.restore_backup_by_index(0).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "data");
        assert_eq!(fs::read_to_string(&source).unwrap(), "changed");
    }

    #[test]
    fn list_empty_directory() {
        let (_tmp, _source, manager) = setup();
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn list_orders_by_slot_with_foreign_files_first() {
        let (_tmp, _source, manager) = setup();
        for name in ["2_b_t.json", "0_a_t.json", "notes.txt", "10_c_t.json", "1_x_t.json"] {
            fs::write(manager.dir().join(name), "").unwrap();
        }

        let names: Vec<String> = manager
            .list_backups()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, ["notes.txt", "0_a_t.json", "1_x_t.json", "2_b_t.json", "10_c_t.json"]);
    }

    #[test]
    fn entries_carry_name_fields_and_size() {
        let (_tmp, source, manager) = setup();
        manager.create_indexed_backup(&source, Some("first")).unwrap();
        manager.create_indexed_backup(&source, None).unwrap();
        fs::write(manager.dir().join("README"), "hello").unwrap();

        let entries = manager.backup_entries().unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].slot, None);
        assert_eq!(entries[0].size_bytes, 5);
        assert_eq!(entries[1].slot, Some(0));
        assert_eq!(entries[1].description.as_deref(), Some("first"));
        assert_eq!(entries[1].size_bytes, 4);
        assert!(entries[1].timestamp.is_some());
        assert!(entries[1].modified.is_some());
        assert_eq!(entries[2].slot, Some(1));
        assert_eq!(entries[2].description, None);
    }

    #[test]
    fn entries_keep_listing_slot_for_loosely_named_files() {
        let (_tmp, _source, manager) = setup();
        for name in ["7_notes.txt", "x_y.json", "2_a_2024-01-01_00-00-00-000.json"] {
            fs::write(manager.dir().join(name), "").unwrap();
        }

        let entries = manager.backup_entries().unwrap();
        let paths: Vec<PathBuf> = entries.iter().map(|e| e.path.clone()).collect();
        let slots: Vec<Option<usize>> = entries.iter().map(|e| e.slot).collect();

        assert_eq!(paths, manager.list_backups().unwrap());
        assert_eq!(slots, [None, Some(2), Some(7)]);
        assert_eq!(entries[2].timestamp, None);
    }
}
