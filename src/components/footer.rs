use iocraft::prelude::*;

use crate::color::ColorDepth;
use crate::config::keybindings::{MergedBindings, PickerAction};
use crate::theme::ResolvedTheme;

// ---------------------------------------------------------------------------
// Footer component: position, active theme, status and key hints
// ---------------------------------------------------------------------------

pub struct RenderedFooter {
    pub position: String,
    pub active_text: String,
    pub status: Option<String>,
    pub hints: String,
    pub text_fg: Color,
    pub status_fg: Color,
    pub border_fg: Color,
    pub separator_fg: Color,
}

impl RenderedFooter {
    pub fn build(
        cursor: usize,
        matched: usize,
        active: Option<&str>,
        status: Option<String>,
        bindings: &MergedBindings,
        palette: &ResolvedTheme,
        depth: ColorDepth,
    ) -> Self {
        let text_fg = palette.muted.to_crossterm_color(depth);
        Self {
            position: format_position(cursor, matched),
            active_text: format!("active: {}", active.unwrap_or("none")),
            status,
            hints: key_hints(bindings),
            text_fg,
            status_fg: palette.warning.to_crossterm_color(depth),
            border_fg: palette.border.to_crossterm_color(depth),
            separator_fg: text_fg,
        }
    }
}

/// "3/12", or "0/0" when nothing matches.
pub fn format_position(cursor: usize, matched: usize) -> String {
    if matched == 0 {
        "0/0".to_owned()
    } else {
        format!("{}/{matched}", cursor.min(matched - 1) + 1)
    }
}

/// Short hints for the confirm, cancel and preview toggle keys.
pub fn key_hints(bindings: &MergedBindings) -> String {
    [
        (PickerAction::Confirm, "apply"),
        (PickerAction::Cancel, "cancel"),
        (PickerAction::TogglePreview, "preview"),
    ]
    .iter()
    .filter_map(|(action, label)| bindings.key_for(*action).map(|key| format!("{key} {label}")))
    .collect::<Vec<_>>()
    .join("  ")
}

#[derive(Default, Props)]
pub struct FooterProps {
    pub footer: Option<RenderedFooter>,
}

#[component]
pub fn Footer(props: &mut FooterProps) -> impl Into<AnyElement<'static>> {
    let Some(f) = props.footer.take() else {
        return element! { View }.into_any();
    };

    let mut middle = vec![MixedTextContent::new(&f.active_text).color(f.text_fg)];
    if let Some(status) = &f.status {
        middle.push(MixedTextContent::new("  \u{2022}  ").color(f.separator_fg));
        middle.push(MixedTextContent::new(status).color(f.status_fg));
    }

    element! {
        View(
            border_style: BorderStyle::Single,
            border_edges: Edges::Top,
            border_color: f.border_fg,
            padding_left: 1,
            padding_right: 1,
        ) {
            Text(content: f.position.clone(), color: f.text_fg, wrap: TextWrap::NoWrap)
            Text(content: " \u{2502} ", color: f.separator_fg, wrap: TextWrap::NoWrap)
            View(flex_grow: 1.0) {
                MixedText(contents: middle, wrap: TextWrap::NoWrap)
            }
            Text(content: " \u{2502} ", color: f.separator_fg, wrap: TextWrap::NoWrap)
            Text(content: f.hints.clone(), color: f.text_fg, wrap: TextWrap::NoWrap)
        }
    }
    .into_any()
}
