use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::types::CatalogConfig;

// ---------------------------------------------------------------------------
// Theme identifiers
// ---------------------------------------------------------------------------

/// Name of a theme, as listed in a catalog and as looked up on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeId(String);

impl ThemeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThemeId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl PartialEq<str> for ThemeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

// ---------------------------------------------------------------------------
// Catalog kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Dark,
    Light,
    Other,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [CatalogKind::Dark, CatalogKind::Light, CatalogKind::Other];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Other => "other",
        }
    }

    /// Prompt shown in front of the query input.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Dark => "Dark theme:",
            Self::Light => "Light theme:",
            Self::Other => "Other theme:",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Catalog set
// ---------------------------------------------------------------------------

/// The three ordered theme lists. Built once at startup, read-only afterwards.
#[derive(Debug, Clone)]
pub struct CatalogSet {
    dark: Vec<ThemeId>,
    light: Vec<ThemeId>,
    other: Vec<ThemeId>,
}

impl CatalogSet {
    /// The compiled-in lists only.
    pub fn builtin() -> Self {
        Self {
            dark: to_ids(DARK),
            light: to_ids(LIGHT),
            other: to_ids(OTHER),
        }
    }

    /// Compiled-in lists with the operator's `[catalog]` entries appended.
    ///
    /// Entries keep their order; duplicates are kept as-is.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let mut set = Self::builtin();
        set.dark.extend(config.dark.iter().map(|n| ThemeId::new(n.as_str())));
        set.light.extend(config.light.iter().map(|n| ThemeId::new(n.as_str())));
        set.other.extend(config.other.iter().map(|n| ThemeId::new(n.as_str())));
        set
    }

    pub fn get(&self, kind: CatalogKind) -> &[ThemeId] {
        match kind {
            CatalogKind::Dark => &self.dark,
            CatalogKind::Light => &self.light,
            CatalogKind::Other => &self.other,
        }
    }

    /// Which catalog lists `name`, if any (first match wins).
    pub fn kind_of(&self, name: &str) -> Option<CatalogKind> {
        CatalogKind::ALL
            .into_iter()
            .find(|kind| self.get(*kind).iter().any(|id| id == name))
    }
}

fn to_ids(names: &[&str]) -> Vec<ThemeId> {
    names.iter().map(|n| ThemeId::from(*n)).collect()
}

// ---------------------------------------------------------------------------
// Compiled-in lists
// ---------------------------------------------------------------------------

const DARK: &[&str] = &[
    "ayu-dark",
    "ayu-mirage",
    "base16-ocean",
    "catppuccin-frappe",
    "catppuccin-macchiato",
    "catppuccin-mocha",
    "doom-one",
    "dracula",
    "everforest-dark",
    "github-dark",
    "gruvbox-dark",
    "iceberg-dark",
    "kanagawa-dragon",
    "kanagawa-wave",
    "material-darker",
    "modus-vivendi",
    "monokai",
    "monokai-pro",
    "moonfly",
    "night-owl",
    "nightfox",
    "nord",
    "oceanic-next",
    "one-dark",
    "onehalf-dark",
    "oxocarbon",
    "palenight",
    "rose-pine",
    "rose-pine-moon",
    "solarized-dark",
    "sonokai",
    "spacegray",
    "srcery",
    "tokyo-night",
    "tokyo-night-storm",
    "tomorrow-night",
    "vesper",
    "zenburn",
];

const LIGHT: &[&str] = &[
    "alabaster",
    "ayu-light",
    "catppuccin-latte",
    "dayfox",
    "everforest-light",
    "github-light",
    "gruvbox-light",
    "iceberg-light",
    "kanagawa-lotus",
    "leuven",
    "modus-operandi",
    "one-light",
    "onehalf-light",
    "papercolor-light",
    "rose-pine-dawn",
    "solarized-light",
    "tokyo-night-day",
    "tomorrow",
];

const OTHER: &[&str] = &[
    "amber-crt",
    "base16-default",
    "cyberpunk",
    "flexoki",
    "green-crt",
    "high-contrast",
    "monochrome",
    "retrobox",
    "selenized",
    "solarized-16",
    "synthwave-84",
    "zenwritten",
];
