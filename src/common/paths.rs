//! Configuration file locations

use std::path::{Path, PathBuf};

/// Name used for the per-user configuration directory
const APP_NAME: &str = "e2e-triage";

/// File name of a project-local configuration file
pub const LOCAL_CONFIG_FILE: &str = "e2e-triage.toml";

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/e2e-triage/`
/// - macOS: `~/Library/Application Support/e2e-triage/`
/// - Windows: `%APPDATA%\e2e-triage\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the per-user configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the path to the project-local configuration file under `dir`
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
}
