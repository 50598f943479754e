//! Runtime configuration.
//!
//! Values come from command-line flags first, then the TOML config file, then
//! defaults. The config file is optional unless named explicitly with `--config`:
//!
//! ```toml
//! backup_dir = "/home/me/.local/share/addressbook/backups"
//! retain = 10
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::backup::SLOT_COUNT;
use crate::cli::GlobalArgs;
use crate::error::{BackupError, Result};

const APP_NAME: &str = "slotback";

#[derive(Debug)]
pub struct Config {
    pub backup_dir: PathBuf,
    pub retain: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub backup_dir: Option<PathBuf>,
    pub retain: Option<usize>,
}

impl Config {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => load_file(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => load_file(&path)?,
                _ => FileConfig::default(),
            },
        };

        Ok(Config::merge(args, file))
    }

    fn merge(args: &GlobalArgs, file: FileConfig) -> Self {
        let defaults = Config::default();

        Config {
            backup_dir: args
                .dir
                .clone()
                .or(file.backup_dir)
                .unwrap_or(defaults.backup_dir),
            retain: file.retain.unwrap_or(defaults.retain),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let backup_dir = directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.data_dir().join("backups"))
            .unwrap_or_else(|| PathBuf::from("backups"));

        Config {
            backup_dir,
            retain: SLOT_COUNT,
        }
    }
}

/// `config.toml` in the platform config directory, e.g. `~/.config/slotback/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn load_file(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path).map_err(|e| BackupError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    toml::from_str(&text).map_err(|e| BackupError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
