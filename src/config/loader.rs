use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

const APP_DIR: &str = "themepick";

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path, must exist)
/// 2. `$THEMEPICK_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/themepick/config.toml`
/// 4. `~/.config/themepick/config.toml`
///
/// No config file at all means defaults.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit_path {
        return read_config(path);
    }
    match find_config() {
        Some(path) => read_config(&path),
        None => Ok(AppConfig::default()),
    }
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parsing TOML from {}", path.display()))
}

fn find_config() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("THEMEPICK_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }
    config_dir()
        .map(|dir| dir.join("config.toml"))
        .filter(|p| p.is_file())
}

/// `$XDG_CONFIG_HOME/themepick`, else `~/.config/themepick`.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join(APP_DIR));
    }
    home_dir().map(|home| home.join(".config").join(APP_DIR))
}

/// Theme search path: configured directories first, then the user theme
/// directory. Bundled themes are consulted after all of these.
pub fn theme_dirs(config: &AppConfig) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = config.theme_dirs.iter().map(|d| expand_tilde(d)).collect();
    if let Some(dir) = config_dir() {
        dirs.push(dir.join("themes"));
    }
    dirs
}

/// Where the committed theme is recorded.
pub fn state_path(config: &AppConfig) -> Option<PathBuf> {
    match &config.state_file {
        Some(path) => Some(expand_tilde(path)),
        None => config_dir().map(|dir| dir.join("state.toml")),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

pub(crate) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
