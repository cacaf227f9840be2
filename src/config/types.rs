use serde::Deserialize;

use crate::color::Color;
use crate::config::keybindings::Keybinding;
use crate::theme::Background;

// ---------------------------------------------------------------------------
// Custom Color deserialization
// ---------------------------------------------------------------------------

/// Deserialize an `Option<Color>` from a TOML string value.
pub(crate) mod color_de {
    use serde::{self, Deserialize, Deserializer};

    use crate::color::Color;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        s.map(|s| Color::parse(&s, "<theme>"))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Extra directories searched for `<name>.toml`, in order, before the
    /// default user theme directory and the bundled themes.
    pub theme_dirs: Vec<String>,
    /// Where the committed theme is recorded. Defaults to `state.toml` in
    /// the config directory.
    pub state_file: Option<String>,
    pub catalog: CatalogConfig,
    pub picker: PickerConfig,
    pub keybindings: Vec<Keybinding>,
}

/// Operator additions to the compiled-in catalogs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub dark: Vec<String>,
    pub light: Vec<String>,
    pub other: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Only allow confirming an entry of the list.
    pub require_match: bool,
    /// Show the preview pane next to the list.
    pub show_preview: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            require_match: true,
            show_preview: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Theme files
// ---------------------------------------------------------------------------

/// Schema of a `<name>.toml` theme definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeFile {
    /// Display name; the file stem is used when absent.
    pub name: Option<String>,
    /// Which terminal background the theme was designed for. Decides the
    /// fallback for unset colours.
    pub background: Option<Background>,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub foreground: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub background: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub accent: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub muted: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub selection: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub border: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub success: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub warning: Option<Color>,
    #[serde(default, deserialize_with = "color_de::deserialize")]
    pub error: Option<Color>,
}
