use iocraft::prelude::*;

use crate::color::ColorDepth;
use crate::theme::{Background, ResolvedTheme};

// ---------------------------------------------------------------------------
// Pre-rendered palette preview
// ---------------------------------------------------------------------------

pub struct Swatch {
    pub slot: &'static str,
    pub value: String,
    pub color: Color,
}

pub struct RenderedPreview {
    pub title: String,
    pub subtitle: String,
    pub swatches: Vec<Swatch>,
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

impl RenderedPreview {
    pub fn build(palette: &ResolvedTheme, depth: ColorDepth) -> Self {
        let c = |color: crate::color::Color| color.to_crossterm_color(depth);
        let swatches = [
            ("foreground", palette.fg),
            ("background", palette.bg),
            ("accent", palette.accent),
            ("muted", palette.muted),
            ("selection", palette.selection),
            ("border", palette.border),
            ("success", palette.success),
            ("warning", palette.warning),
            ("error", palette.error),
        ]
        .into_iter()
        .map(|(slot, color)| Swatch {
            slot,
            value: color.to_string(),
            color: c(color),
        })
        .collect();

        Self {
            title: palette.name.clone(),
            subtitle: match palette.background {
                Background::Dark => "dark background".to_owned(),
                Background::Light => "light background".to_owned(),
            },
            swatches,
            fg: c(palette.fg),
            bg: c(palette.bg),
            accent: c(palette.accent),
            muted: c(palette.muted),
            selection: c(palette.selection),
            border: c(palette.border),
            success: c(palette.success),
            warning: c(palette.warning),
            error: c(palette.error),
        }
    }
}

// ---------------------------------------------------------------------------
// Preview component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct PreviewProps {
    pub preview: Option<RenderedPreview>,
}

#[component]
pub fn Preview(props: &mut PreviewProps) -> impl Into<AnyElement<'static>> {
    let Some(p) = props.preview.take() else {
        return element! { View }.into_any();
    };

    let sample = vec![
        MixedTextContent::new("fn ").color(p.accent).weight(Weight::Bold),
        MixedTextContent::new("main").color(p.fg),
        MixedTextContent::new("() { ").color(p.fg),
        MixedTextContent::new("// comment").color(p.muted),
        MixedTextContent::new(" }").color(p.fg),
    ];
    let states = vec![
        MixedTextContent::new("\u{2714} passed").color(p.success),
        MixedTextContent::new("   "),
        MixedTextContent::new("\u{25b2} warning").color(p.warning),
        MixedTextContent::new("   "),
        MixedTextContent::new("\u{2716} failed").color(p.error),
    ];

    element! {
        View(
            flex_grow: 1.0,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: p.border,
            background_color: p.bg,
            padding_left: 1,
            padding_right: 1,
        ) {
            Text(content: p.title, color: p.accent, weight: Weight::Bold, wrap: TextWrap::NoWrap)
            Text(content: p.subtitle, color: p.muted, wrap: TextWrap::NoWrap)
            View(height: 1)
            MixedText(contents: sample, wrap: TextWrap::NoWrap)
            View(background_color: p.selection) {
                Text(content: "selected line", color: p.fg, wrap: TextWrap::NoWrap)
            }
            MixedText(contents: states, wrap: TextWrap::NoWrap)
            View(height: 1)
            #(p.swatches.into_iter().map(|s| {
                element! {
                    View(key: s.slot) {
                        Text(content: "\u{2588}\u{2588} ", color: s.color, wrap: TextWrap::NoWrap)
                        Text(content: format!("{:<11}", s.slot), color: p.fg, wrap: TextWrap::NoWrap)
                        Text(content: s.value, color: p.muted, wrap: TextWrap::NoWrap)
                    }
                }
            }))
        }
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_lists_every_slot() {
        let palette = ResolvedTheme::plain(Background::Light);
        let preview = RenderedPreview::build(&palette, ColorDepth::Color256);
        assert_eq!(preview.swatches.len(), 9);
        assert_eq!(preview.swatches[0].slot, "foreground");
        assert_eq!(preview.subtitle, "light background");
        assert_eq!(preview.title, "none");
    }
}
