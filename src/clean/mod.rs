//! Retention cleanup.
//!
//! Trims the backup directory to the most recently modified files:
//! - Execute mode (default): deletes everything past the retention count
//! - Dry run mode: reports what would be deleted
//!
//! Retention ignores slots entirely. A snapshot still occupying a live slot is
//! deleted if it is old enough, and files that are not snapshots count too.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};

use crate::backup::{regular_files, BackupManager};
use crate::error::{BackupError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanMode {
    DryRun,
    Execute,
}

#[derive(Debug, Default)]
pub struct CleanResult {
    pub deleted: Vec<PathBuf>,
    pub errors: Vec<String>,
    pub bytes_freed: u64,
}

struct Candidate {
    path: PathBuf,
    modified: SystemTime,
    size: u64,
}

impl BackupManager {
    /// Keep only the `max_kept` most recently modified files, deleting the rest.
    pub fn clean_old_backups(&self, max_kept: usize) -> Result<CleanResult> {
        self.clean(max_kept, CleanMode::Execute)
    }

    pub fn clean(&self, max_kept: usize, mode: CleanMode) -> Result<CleanResult> {
        if max_kept < 1 {
            return Err(BackupError::InvalidArgument(
                "retention count must be at least 1".to_string(),
            ));
        }

        // same lock as creation, so trimming never races an eviction
        let _guard = self.mutation_guard();

        let mut candidates: Vec<Candidate> = regular_files(self.dir())?
            .into_iter()
            .map(candidate)
            .collect();

        // newest first, name breaks ties
        candidates.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| a.path.cmp(&b.path))
        });

        let mut result = CleanResult::default();

        for old in candidates.into_iter().skip(max_kept) {
            match mode {
                CleanMode::DryRun => {
                    result.bytes_freed += old.size;
                    result.deleted.push(old.path);
                }
                CleanMode::Execute => match self.remove_file(&old.path) {
                    Ok(true) => {
                        info!("deleted old backup: {}", old.path.display());
                        result.bytes_freed += old.size;
                        result.deleted.push(old.path);
                    }
                    Ok(false) => {}
                    Err(e) => {
                        warn!("failed to delete old backup {}: {e}", old.path.display());
                        result.errors.push(format!("failed to delete {}: {e}", old.path.display()));
                    }
                },
            }
        }

        Ok(result)
    }
}

fn candidate(path: PathBuf) -> Candidate {
    match fs::metadata(&path) {
        Ok(metadata) => {
            let modified = metadata.modified().unwrap_or_else(|e| {
                warn!("failed to get modification time for {}: {e}", path.display());
                UNIX_EPOCH
            });
            Candidate { modified, size: metadata.len(), path }
        }
        Err(e) => {
            warn!("failed to get modification time for {}: {e}", path.display());
            Candidate { modified: UNIX_EPOCH, size: 0, path }
        }
    }
}
