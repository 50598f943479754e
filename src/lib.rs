//! Rotating slot-based backups for a single data file.
//!
//! ```no_run
//! use slotback::BackupManager;
//! use std::path::Path;
//!
//! let manager = BackupManager::new("data/backups")?;
//! let slot = manager.create_indexed_backup(Path::new("data/addressbook.json"), Some("delete_John"))?;
//! let snapshot = manager.restore_backup_by_index(slot)?;
//! manager.clean_old_backups(5)?;
//! # let _ = snapshot;
//! # Ok::<(), slotback::BackupError>(())
//! ```

pub mod backup;
pub mod clean;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod util;

pub use backup::{parse_slot, BackupEntry, BackupManager, SLOT_COUNT};
pub use clean::{CleanMode, CleanResult};
pub use error::{BackupError, Result};
