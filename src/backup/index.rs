//! Rotation cursor recovery.
//!
//! The cursor is never persisted. On startup it is rebuilt from the highest slot
//! found among the files already in the backup directory.

use std::path::PathBuf;

use log::debug;

use super::name::{parse_slot, SLOT_COUNT};

/// Slot the next backup should occupy, given the files currently on disk.
pub(crate) fn recover_cursor(files: &[PathBuf]) -> usize {
    let highest = files
        .iter()
        .filter_map(|path| parse_slot(path))
        .max();

    match highest {
        Some(slot) => {
            let cursor = (slot % SLOT_COUNT + 1) % SLOT_COUNT;
            debug!("highest backup index on disk is {slot}, next index {cursor}");
            cursor
        }
        None => {
            debug!("no indexed backups on disk, starting at index 0");
            0
        }
    }
}
