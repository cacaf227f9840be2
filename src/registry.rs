//! Where theme definitions come from.
//!
//! A theme is loadable when a `<name>.toml` exists in one of the search
//! directories or when it is bundled with the binary. Files on disk shadow
//! bundled themes of the same name.

use std::path::PathBuf;

use crate::catalog::ThemeId;
use crate::config::builtin_themes;
use crate::config::loader;
use crate::config::types::{AppConfig, ThemeFile};
use crate::error::LoadError;

/// Where a theme definition was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSource {
    File(PathBuf),
    Bundled,
}

/// A parsed theme definition.
#[derive(Debug, Clone)]
pub struct LoadedTheme {
    pub id: ThemeId,
    pub source: ThemeSource,
    pub file: ThemeFile,
}

#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    search_dirs: Vec<PathBuf>,
}

impl ThemeRegistry {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(loader::theme_dirs(config))
    }

    /// Registry with the bundled themes only.
    pub fn bundled_only() -> Self {
        Self::default()
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    pub fn is_loadable(&self, id: &ThemeId) -> bool {
        self.locate(id).is_some()
    }

    /// Find a theme without reading it.
    pub fn locate(&self, id: &ThemeId) -> Option<ThemeSource> {
        if !is_plain_name(id.as_str()) {
            return None;
        }
        self.find_file(id.as_str())
            .map(ThemeSource::File)
            .or_else(|| builtin_themes::get(id.as_str()).map(|_| ThemeSource::Bundled))
    }

    /// Read and parse a theme definition.
    pub fn load(&self, id: &ThemeId) -> Result<LoadedTheme, LoadError> {
        let not_found = || LoadError::NotFound { theme: id.clone() };
        let source = self.locate(id).ok_or_else(not_found)?;

        let file = match &source {
            ThemeSource::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
                    path: path.clone(),
                    source,
                })?;
                parse(id, &text)?
            }
            ThemeSource::Bundled => parse(id, builtin_themes::get(id.as_str()).ok_or_else(not_found)?)?,
        };

        tracing::debug!(theme = %id, source = ?source, "theme definition loaded");
        Ok(LoadedTheme {
            id: id.clone(),
            source,
            file,
        })
    }

    fn find_file(&self, name: &str) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .map(|dir| dir.join(format!("{name}.toml")))
            .find(|p| p.is_file())
    }
}

fn parse(id: &ThemeId, text: &str) -> Result<ThemeFile, LoadError> {
    toml::from_str(text).map_err(|source| LoadError::Parse {
        theme: id.clone(),
        source,
    })
}

/// Theme names must be bare file stems: no separators, no parent hops.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}
