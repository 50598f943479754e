//! JSON output for backup listings.
//!
//! Serializes the entries for scripting and piping.

use crate::backup::BackupEntry;

pub fn render(entries: &[BackupEntry]) -> String {
    serde_json::to_string_pretty(entries).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
