use std::fs;
use std::io;
use std::path::Path;

use chrono::Local;
use log::{info, warn};

use super::name::{parse_slot, snapshot_file_name, SLOT_COUNT};
use super::{regular_files, BackupManager};
use crate::error::{BackupError, Result};

impl BackupManager {
    /// Copy `source` into the next rotation slot and return the slot used.
    ///
    /// Whatever occupied the slot is deleted first. The cursor only advances once
    /// the copy has succeeded.
    pub fn create_indexed_backup(&self, source: &Path, description: Option<&str>) -> Result<usize> {
        let mut cursor = self.cursor.lock();
        let slot = *cursor;

        // refuse before evicting, a bad source must not cost us the old snapshot
        let metadata = fs::metadata(source).map_err(|e| BackupError::io(source, e))?;
        if !metadata.is_file() {
            return Err(BackupError::io(
                source,
                io::Error::new(io::ErrorKind::InvalidInput, "backup source is not a regular file"),
            ));
        }

        self.evict_slot(slot)?;

        let target = self.dir.join(snapshot_file_name(slot, description, Local::now()));
        fs::copy(source, &target).map_err(|e| BackupError::io(&target, e))?;
        info!("backup created with index {slot}: {}", target.display());

        *cursor = (slot + 1) % SLOT_COUNT;
        Ok(slot)
    }

    /// Delete every file occupying `slot`. Failing to delete one file is logged and
    /// skipped, a later retention pass can still pick it up.
    fn evict_slot(&self, slot: usize) -> Result<()> {
        for path in regular_files(&self.dir)? {
            if parse_slot(&path) != Some(slot) {
                continue;
            }

            match self.remove_file(&path) {
                Ok(true) => info!("deleted old backup at index {slot}: {}", path.display()),
                Ok(false) => {}
                Err(e) => warn!("failed to delete backup: {} - {e}", path.display()),
            }
        }

        Ok(())
    }
}
