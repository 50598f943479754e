//! Snapshot file naming.
//!
//! Snapshot files are named `{slot}_{description}_{timestamp}.json`, where the
//! timestamp is local time with millisecond resolution, e.g.
//! `3_delete-john_2024-05-01_14-03-22-481.json`.

use std::path::Path;

use chrono::{DateTime, Local};
use log::warn;

/// Number of rotation slots, indexed from 0.
pub const SLOT_COUNT: usize = 10;

/// Extension given to every snapshot file.
pub const EXTENSION: &str = "json";

/// Rendered in place of a missing description.
pub const NO_DESCRIPTION: &str = "null";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S-%3f";

/// Build the file name for a snapshot written to `slot` at `now`.
pub fn snapshot_file_name(slot: usize, description: Option<&str>, now: DateTime<Local>) -> String {
    let description = description
        .map(|d| d.replace(['/', '\\'], "-"))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    format!(
        "{slot}_{description}_{}.{EXTENSION}",
        now.format(TIMESTAMP_FORMAT)
    )
}

/// Extract the slot index from a snapshot path.
///
/// The slot is the text before the first underscore of the file name, read as a
/// non-negative base-10 integer. Anything else yields `None` and takes no part in
/// rotation.
pub fn parse_slot(path: &Path) -> Option<usize> {
    let name = path.file_name()?.to_string_lossy();
    let (prefix, _) = name.split_once('_')?;

    match prefix.parse::<usize>() {
        Ok(slot) => Some(slot),
        Err(_) => {
            warn!("invalid backup file index format: {name}");
            None
        }
    }
}

/// Fields recovered from a well-formed snapshot name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotName {
    pub slot: usize,
    pub description: String,
    pub timestamp: String,
}

impl SnapshotName {
    /// Split a snapshot file name into its parts.
    ///
    /// Descriptions may themselves contain underscores, so the timestamp is taken
    /// from the right: it always spans exactly two underscore-separated fields.
    pub fn parse(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let stem = name.strip_suffix(&format!(".{EXTENSION}"))?;

        let (slot, rest) = stem.split_once('_')?;
        let slot = slot.parse::<usize>().ok()?;

        let mut fields = rest.rsplitn(3, '_');
        let time = fields.next()?;
        let date = fields.next()?;
        let description = fields.next()?;

        Some(SnapshotName {
            slot,
            description: description.to_string(),
            timestamp: format!("{date}_{time}"),
        })
    }

    /// The description, or `None` when the placeholder was written.
    pub fn description(&self) -> Option<&str> {
        if self.description == NO_DESCRIPTION {
            None
        } else {
            Some(&self.description)
        }
    }
}
