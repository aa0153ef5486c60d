//! Centralized path handling for the labelsync CLI
//!
//! Configuration lives under the platform config directory; the tagging
//! location comes from configuration and may use a `~` prefix.

use std::path::{Path, PathBuf};

/// The name of the application directory used across all platforms
const APP_DIR: &str = "labelsync";

/// Returns the configuration directory for the application
///
/// On Unix-like systems this follows XDG Base Directory conventions
/// (`~/.config/labelsync`); on Windows it is `%APPDATA%/labelsync`. Falls
/// back to `.labelsync` in the current directory if the platform
/// directory cannot be determined.
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".labelsync"))
}

/// Returns the path to the configuration file
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Expand a leading `~` to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    }

    if let Some(rest) = path.strip_prefix("~/") {
        return dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest);
    }

    Path::new(path).to_path_buf()
}
