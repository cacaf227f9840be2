use serde::Deserialize;

use crate::color::Color;
use crate::config::types::ThemeFile;

/// Terminal (or theme) background brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    Dark,
    Light,
}

impl Background {
    /// Detect whether the terminal has a dark or light background.
    ///
    /// Heuristic: check `COLORFGBG` (format "fg;bg"), fall back to dark.
    pub fn detect() -> Self {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|val| Self::from_colorfgbg(&val))
            .unwrap_or(Background::Dark)
    }

    fn from_colorfgbg(val: &str) -> Option<Self> {
        let bg: u8 = val.rsplit(';').next()?.parse().ok()?;
        // ANSI colors 0-6 and 8 are dark backgrounds.
        Some(if bg > 6 && bg != 8 {
            Background::Light
        } else {
            Background::Dark
        })
    }
}

/// A fully resolved palette: every slot has a concrete `Color`, either from
/// the theme file or from the defaults for its background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub name: String,
    pub background: Background,
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub selection: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl ResolvedTheme {
    /// Build a palette from a theme file.
    ///
    /// The background comes from the file; when the file does not say, it
    /// is inferred from the background colour, then from `fallback`.
    pub fn resolve(name: &str, file: &ThemeFile, fallback: Background) -> Self {
        let c = &file.colors;
        let background = file
            .background
            .or_else(|| {
                c.background.map(|bg| {
                    if bg.luminance() > 128 {
                        Background::Light
                    } else {
                        Background::Dark
                    }
                })
            })
            .unwrap_or(fallback);
        let d = Defaults::for_background(background);

        Self {
            name: file.name.clone().unwrap_or_else(|| name.to_owned()),
            background,
            fg: c.foreground.unwrap_or(d.fg),
            bg: c.background.unwrap_or(d.bg),
            accent: c.accent.unwrap_or(d.accent),
            muted: c.muted.unwrap_or(d.muted),
            selection: c.selection.unwrap_or(d.selection),
            border: c.border.or(c.muted).unwrap_or(d.border),
            success: c.success.unwrap_or(d.success),
            warning: c.warning.unwrap_or(d.warning),
            error: c.error.unwrap_or(d.error),
        }
    }

    /// Palette used while no theme is active.
    pub fn plain(background: Background) -> Self {
        Self::resolve("none", &ThemeFile::default(), background)
    }
}

/// Default color values for a given background.
struct Defaults {
    fg: Color,
    bg: Color,
    accent: Color,
    muted: Color,
    selection: Color,
    border: Color,
    success: Color,
    warning: Color,
    error: Color,
}

impl Defaults {
    fn for_background(bg: Background) -> Self {
        match bg {
            Background::Dark => Self {
                fg: Color::Ansi256(7),
                bg: Color::Ansi256(0),
                accent: Color::Ansi256(6),       // cyan
                muted: Color::Ansi256(243),      // gray
                selection: Color::Ansi256(237),
                border: Color::Ansi256(241),
                success: Color::Ansi256(10),
                warning: Color::Ansi256(11),
                error: Color::Ansi256(1),
            },
            Background::Light => Self {
                fg: Color::Ansi256(0),
                bg: Color::Ansi256(15),
                accent: Color::Ansi256(4),       // blue
                muted: Color::Ansi256(245),
                selection: Color::Ansi256(254),
                border: Color::Ansi256(248),
                success: Color::Ansi256(2),
                warning: Color::Ansi256(3),
                error: Color::Ansi256(1),
            },
        }
    }
}
