//! Terminal table for backup listings.
//!
//! One row per file in slot order, foreign files marked with `-` in the slot
//! column, followed by a total size line.

use crate::backup::BackupEntry;
use crate::util::format_bytes;

pub fn render(entries: &[BackupEntry]) -> String {
    if entries.is_empty() {
        return String::from("No backups found.\n");
    }

    let mut output = String::new();

    output.push_str(&format!(
        "{:<6} {:<30} {:<24} {:>10}\n",
        "SLOT", "DESCRIPTION", "CREATED", "SIZE"
    ));
    output.push_str(&"-".repeat(73));
    output.push('\n');

    let mut total: u64 = 0;

    for entry in entries {
        total = total.saturating_add(entry.size_bytes);

        let slot = entry
            .slot
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());

        // foreign files have no description field, show their name instead
        let label = match (&entry.description, &entry.timestamp) {
            (Some(description), _) => description.clone(),
            (None, Some(_)) => String::new(),
            (None, None) => entry
                .path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        };

        output.push_str(&format!(
            "{:<6} {:<30} {:<24} {:>10}\n",
            slot,
            truncate(&label, 30),
            entry.timestamp.as_deref().unwrap_or(""),
            format_bytes(entry.size_bytes)
        ));
    }

    output.push_str(&format!(
        "\n{:>73}\n",
        format!("{} file(s), {}", entries.len(), format_bytes(total))
    ));

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}
