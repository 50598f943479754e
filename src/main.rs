use std::fs;

use clap::Parser;
use env_logger::{Builder, Env};
use log::info;
use slotback::cli::{Cli, Command};
use slotback::config::Config;
use slotback::{clean, report, util, BackupError, BackupManager, Result};

fn init_logger(verbose: bool) {
    // RUST_LOG wins, otherwise info (debug with --verbose)
    let default_level = if verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_args(&cli.global)?;
    let manager = BackupManager::new(&config.backup_dir)?;

    match cli.command {
        Command::Backup(args) => {
            let slot = manager.create_indexed_backup(&args.source, args.description.as_deref())?;
            println!("{slot}");
        }
        Command::Restore(args) => {
            let snapshot = manager.restore_backup_by_index(args.slot)?;

            if let Some(target) = &args.to {
                fs::copy(&snapshot, target).map_err(|source| BackupError::Io {
                    path: target.clone(),
                    source,
                })?;
                info!("restored {} over {}", snapshot.display(), target.display());
            }

            println!("{}", snapshot.display());
        }
        Command::List(args) => {
            let entries = manager.backup_entries()?;
            report::print(&entries, args.json);
        }
        Command::Clean(args) => {
            let keep = args.keep.unwrap_or(config.retain);
            let mode = if args.dry_run {
                clean::CleanMode::DryRun
            } else {
                clean::CleanMode::Execute
            };

            let result = manager.clean(keep, mode)?;

            for path in &result.deleted {
                if args.dry_run {
                    println!("[dry-run] would delete: {}", path.display());
                } else {
                    println!("deleted: {}", path.display());
                }
            }

            if !result.errors.is_empty() {
                eprintln!("\nerrors encountered:");
                for error in &result.errors {
                    eprintln!("  {error}");
                }
            }

            if args.dry_run {
                println!("\nwould free: {}", util::format_bytes(result.bytes_freed));
            } else {
                println!("\nfreed: {}", util::format_bytes(result.bytes_freed));
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.global.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
