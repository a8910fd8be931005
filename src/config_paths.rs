//! Where the inspection tool keeps its files
//!
//! One directory per user holds `config.yaml` (defaults for the CLI flags)
//! and `logs/`. It is `$XDG_CONFIG_HOME/reduced-model`, falling back to
//! `~/.config/reduced-model`, and `%APPDATA%\reduced-model` on Windows.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "reduced-model";
const CONFIG_FILE: &str = "config.yaml";
const LOGS_DIR: &str = "logs";

/// The per-user directory, or `None` when no home directory can be found
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|base| base.join(APP_DIR))
    }
}

/// Scan defaults read by [`crate::config::ScanConfig::load`]
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Daily log files written by [`crate::tracing::init`]
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(LOGS_DIR))
}

fn create(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("cannot create {}: {}", path.display(), e))
}

pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "no home directory to keep config in".to_string())?;
    create(&dir)?;
    Ok(dir)
}

/// Creates the log directory (and the config directory above it) if needed
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = ensure_config_dir()?.join(LOGS_DIR);
    create(&logs)?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_config_dir() {
        let Some(dir) = config_dir() else {
            return;
        };
        assert!(dir.ends_with(APP_DIR));
        assert_eq!(config_file(), Some(dir.join(CONFIG_FILE)));
        assert_eq!(logs_dir(), Some(dir.join(LOGS_DIR)));
    }
}
