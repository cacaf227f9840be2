/// Look up a bundled theme by name, returning its TOML source.
///
/// Theme names correspond to files in `themes/`.
/// Pass a bare name (e.g. `"dracula"`), not the full filename.
pub fn get(name: &str) -> Option<&'static str> {
    match name {
        "amber-crt" => Some(include_str!("../../themes/amber-crt.toml")),
        "base16-default" => Some(include_str!("../../themes/base16-default.toml")),
        "catppuccin-latte" => Some(include_str!("../../themes/catppuccin-latte.toml")),
        "catppuccin-mocha" => Some(include_str!("../../themes/catppuccin-mocha.toml")),
        "dracula" => Some(include_str!("../../themes/dracula.toml")),
        "github-light" => Some(include_str!("../../themes/github-light.toml")),
        "gruvbox-dark" => Some(include_str!("../../themes/gruvbox-dark.toml")),
        "gruvbox-light" => Some(include_str!("../../themes/gruvbox-light.toml")),
        "high-contrast" => Some(include_str!("../../themes/high-contrast.toml")),
        "modus-operandi" => Some(include_str!("../../themes/modus-operandi.toml")),
        "monochrome" => Some(include_str!("../../themes/monochrome.toml")),
        "nord" => Some(include_str!("../../themes/nord.toml")),
        "one-dark" => Some(include_str!("../../themes/one-dark.toml")),
        "solarized-dark" => Some(include_str!("../../themes/solarized-dark.toml")),
        "solarized-light" => Some(include_str!("../../themes/solarized-light.toml")),
        "tokyo-night" => Some(include_str!("../../themes/tokyo-night.toml")),
        "zenburn" => Some(include_str!("../../themes/zenburn.toml")),
        _ => None,
    }
}

/// List all bundled theme names in alphabetical order.
pub fn list() -> &'static [&'static str] {
    &[
        "amber-crt",
        "base16-default",
        "catppuccin-latte",
        "catppuccin-mocha",
        "dracula",
        "github-light",
        "gruvbox-dark",
        "gruvbox-light",
        "high-contrast",
        "modus-operandi",
        "monochrome",
        "nord",
        "one-dark",
        "solarized-dark",
        "solarized-light",
        "tokyo-night",
        "zenburn",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSet;
    use crate::config::types::ThemeFile;

    #[test]
    fn every_listed_theme_is_embedded_and_parses() {
        for name in list() {
            let src = get(name).unwrap_or_else(|| panic!("{name} listed but not embedded"));
            let file: ThemeFile =
                toml::from_str(src).unwrap_or_else(|e| panic!("{name} does not parse: {e}"));
            assert_eq!(file.name.as_deref(), Some(*name));
            assert!(file.colors.foreground.is_some(), "{name} has no foreground");
        }
    }

    #[test]
    fn every_bundled_theme_is_in_a_catalog() {
        let catalogs = CatalogSet::builtin();
        for name in list() {
            assert!(catalogs.kind_of(name).is_some(), "{name} is not cataloged");
        }
    }

    #[test]
    fn list_is_sorted() {
        let names = list();
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }
}
