use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A colour as written in a theme file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Ansi256(u8),
    Hex { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    #[default]
    TrueColor,
    Color256,
    Color16,
}

#[derive(Debug, Error)]
#[error("invalid color value for \"{slot}\": \"{value}\"")]
pub struct ColorParseError {
    pub slot: String,
    pub value: String,
}

impl Color {
    /// Parse `"#rrggbb"`, `"#rgb"` or a decimal ANSI-256 index.
    ///
    /// `slot` names the theme field being parsed and ends up in the error.
    pub fn parse(s: &str, slot: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError {
            slot: slot.to_owned(),
            value: s.to_owned(),
        };

        let Some(hex) = s.strip_prefix('#') else {
            return s.parse::<u8>().map(Color::Ansi256).map_err(|_| invalid());
        };
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Color::Hex {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            // #abc is shorthand for #aabbcc.
            3 => Ok(Color::Hex {
                r: channel(&hex[0..1])? * 0x11,
                g: channel(&hex[1..2])? * 0x11,
                b: channel(&hex[2..3])? * 0x11,
            }),
            _ => Err(invalid()),
        }
    }

    /// Render at the terminal's colour depth.
    ///
    /// ANSI indices below 16 keep their named variants so the terminal's own
    /// palette applies.
    pub fn to_crossterm_color(self, depth: ColorDepth) -> crossterm::style::Color {
        use crossterm::style::Color as Term;
        match (self, depth) {
            (Color::Hex { r, g, b }, ColorDepth::TrueColor) => Term::Rgb { r, g, b },
            (Color::Hex { r, g, b }, ColorDepth::Color256) => Term::AnsiValue(nearest_ansi256(r, g, b)),
            (Color::Ansi256(n), ColorDepth::TrueColor | ColorDepth::Color256) => named_or_indexed(n),
            (color, ColorDepth::Color16) => {
                let (r, g, b) = color.rgb();
                named_or_indexed(nearest_ansi16(r, g, b))
            }
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Hex { r, g, b } => (r, g, b),
            Color::Ansi256(n) => ansi256_rgb(n),
        }
    }

    /// Perceived brightness in 0..=255 (ITU-R BT.601 weights).
    pub fn luminance(self) -> u8 {
        let (r, g, b) = self.rgb();
        let y = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
        u8::try_from(y / 1000).unwrap_or(u8::MAX)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Ansi256(n) => write!(f, "{n}"),
            Color::Hex { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s, "<color>")
    }
}

impl ColorDepth {
    /// Guess the colour depth from `COLORTERM` and `TERM`.
    pub fn detect() -> Self {
        Self::from_env(
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
        )
    }

    fn from_env(colorterm: Option<&str>, term: Option<&str>) -> Self {
        if matches!(colorterm, Some("truecolor" | "24bit")) {
            ColorDepth::TrueColor
        } else if term.is_some_and(|t| t.contains("256color")) {
            ColorDepth::Color256
        } else {
            ColorDepth::Color16
        }
    }
}

// ---------------------------------------------------------------------------
// Palette math
// ---------------------------------------------------------------------------

/// xterm's default values for the 16 base colours.
const BASE16: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn named_or_indexed(n: u8) -> crossterm::style::Color {
    use crossterm::style::Color as Term;
    const NAMED: [Term; 16] = [
        Term::Black,
        Term::DarkRed,
        Term::DarkGreen,
        Term::DarkYellow,
        Term::DarkBlue,
        Term::DarkMagenta,
        Term::DarkCyan,
        Term::Grey,
        Term::DarkGrey,
        Term::Red,
        Term::Green,
        Term::Yellow,
        Term::Blue,
        Term::Magenta,
        Term::Cyan,
        Term::White,
    ];
    NAMED.get(usize::from(n)).copied().unwrap_or(Term::AnsiValue(n))
}

fn ansi256_rgb(n: u8) -> (u8, u8, u8) {
    match n {
        0..=15 => BASE16[usize::from(n)],
        16..=231 => {
            let i = n - 16;
            (
                CUBE_LEVELS[usize::from(i / 36)],
                CUBE_LEVELS[usize::from((i / 6) % 6)],
                CUBE_LEVELS[usize::from(i % 6)],
            )
        }
        232..=255 => {
            let v = 8 + 10 * (n - 232);
            (v, v, v)
        }
    }
}

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| {
        let v = i32::from(x) - i32::from(y);
        v.unsigned_abs() * v.unsigned_abs()
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

/// Closest index in the 6x6x6 cube or the grey ramp.
fn nearest_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let level = |v: u8| {
        CUBE_LEVELS
            .iter()
            .enumerate()
            .min_by_key(|(_, l)| (i32::from(**l) - i32::from(v)).unsigned_abs())
            .map_or(0, |(i, _)| i as u8)
    };
    let (ri, gi, bi) = (level(r), level(g), level(b));
    let cube = 16 + 36 * ri + 6 * gi + bi;

    let avg = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
    let grey = 232 + (avg.saturating_sub(3) / 10).min(23);

    let target = (r, g, b);
    if distance(ansi256_rgb(grey), target) < distance(ansi256_rgb(cube), target) {
        grey
    } else {
        cube
    }
}

fn nearest_ansi16(r: u8, g: u8, b: u8) -> u8 {
    BASE16
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| distance(**c, (r, g, b)))
        .map_or(7, |(i, _)| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_from_env() {
        assert_eq!(ColorDepth::from_env(Some("truecolor"), None), ColorDepth::TrueColor);
        assert_eq!(ColorDepth::from_env(Some("24bit"), Some("xterm")), ColorDepth::TrueColor);
        assert_eq!(
            ColorDepth::from_env(None, Some("xterm-256color")),
            ColorDepth::Color256
        );
        assert_eq!(ColorDepth::from_env(None, Some("linux")), ColorDepth::Color16);
        assert_eq!(ColorDepth::from_env(None, None), ColorDepth::Color16);
    }

    #[test]
    fn cube_and_grey_lookup() {
        assert_eq!(ansi256_rgb(16), (0, 0, 0));
        assert_eq!(ansi256_rgb(231), (255, 255, 255));
        assert_eq!(ansi256_rgb(196), (255, 0, 0));
        assert_eq!(ansi256_rgb(232), (8, 8, 8));
        assert_eq!(ansi256_rgb(255), (238, 238, 238));
    }

    #[test]
    fn nearest_256_exact_cube_hit() {
        assert_eq!(nearest_ansi256(255, 0, 0), 196);
        assert_eq!(nearest_ansi256(0, 135, 255), 33);
    }

    #[test]
    fn nearest_256_prefers_grey_ramp_for_greys() {
        let idx = nearest_ansi256(0x58, 0x58, 0x58);
        assert!((232..=255).contains(&idx), "got {idx}");
    }

    #[test]
    fn nearest_16_primaries() {
        assert_eq!(nearest_ansi16(0, 0, 0), 0);
        assert_eq!(nearest_ansi16(255, 255, 255), 15);
        assert_eq!(nearest_ansi16(250, 10, 10), 9);
    }

    #[test]
    fn luminance_orders_black_and_white() {
        assert_eq!(Color::Hex { r: 0, g: 0, b: 0 }.luminance(), 0);
        assert_eq!(
            Color::Hex {
                r: 255,
                g: 255,
                b: 255
            }
            .luminance(),
            255
        );
    }
}
