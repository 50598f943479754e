use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slotback")]
#[command(about = "Rotating slot-based backups for a single data file")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Backup directory (defaults to the config file value, then the platform data dir)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Copy a file into the next rotation slot
    Backup(BackupArgs),

    /// Locate the snapshot in a slot, optionally copying it back
    Restore(RestoreArgs),

    /// List snapshots in slot order
    List(ListArgs),

    /// Delete all but the most recently modified snapshots
    Clean(CleanArgs),
}

#[derive(Parser)]
pub struct BackupArgs {
    /// File to back up
    pub source: PathBuf,

    /// Label stored in the snapshot file name
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(Parser)]
pub struct RestoreArgs {
    /// Slot to restore
    pub slot: usize,

    /// Copy the snapshot over this file
    #[arg(long)]
    pub to: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Number of files to keep (defaults to the configured retention)
    #[arg(long)]
    pub keep: Option<usize>,

    /// Show what would be deleted without deleting
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
