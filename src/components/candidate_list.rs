use std::ops::Range;

use iocraft::prelude::*;
use unicode_width::UnicodeWidthStr;

use crate::color::ColorDepth;
use crate::theme::ResolvedTheme;

// ---------------------------------------------------------------------------
// Windowing
// ---------------------------------------------------------------------------

/// Rows of a `total`-long list to show in `height` rows so that `cursor`
/// stays visible, roughly centred.
pub fn visible_window(cursor: usize, total: usize, height: usize) -> Range<usize> {
    if total <= height {
        return 0..total;
    }
    let max_start = total - height;
    let start = cursor.saturating_sub(height / 2).min(max_start);
    start..start + height
}

/// Cut `label` to `width` columns, marking the cut with an ellipsis.
pub fn truncate_label(label: &str, width: usize) -> String {
    if label.width() <= width {
        return label.to_owned();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('\u{2026}');
    out
}

// ---------------------------------------------------------------------------
// Pre-rendered list
// ---------------------------------------------------------------------------

pub struct CandidateRow {
    pub label: String,
    pub is_cursor: bool,
    pub is_active: bool,
}

pub struct RenderedCandidateList {
    pub rows: Vec<CandidateRow>,
    pub empty_message: Option<String>,
    pub item_fg: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
    pub active_fg: Color,
    pub muted_fg: Color,
}

/// Configuration for building the candidate list.
pub struct CandidateListBuildConfig<'a> {
    pub candidates: &'a [String],
    /// Indices into `candidates` that match the query.
    pub matches: &'a [usize],
    /// Position of the highlight within `matches`.
    pub cursor: usize,
    pub active: Option<&'a str>,
    pub height: usize,
    pub width: usize,
    pub palette: &'a ResolvedTheme,
    pub depth: ColorDepth,
}

impl RenderedCandidateList {
    pub fn build(cfg: &CandidateListBuildConfig<'_>) -> Self {
        let label_width = cfg.width.saturating_sub(4);
        let rows = visible_window(cfg.cursor, cfg.matches.len(), cfg.height)
            .map(|pos| {
                let name = &cfg.candidates[cfg.matches[pos]];
                CandidateRow {
                    label: truncate_label(name, label_width),
                    is_cursor: pos == cfg.cursor,
                    is_active: cfg.active == Some(name.as_str()),
                }
            })
            .collect();

        let p = cfg.palette;
        Self {
            rows,
            empty_message: cfg.matches.is_empty().then(|| "No matching theme".to_owned()),
            item_fg: p.fg.to_crossterm_color(cfg.depth),
            cursor_fg: p.accent.to_crossterm_color(cfg.depth),
            cursor_bg: p.selection.to_crossterm_color(cfg.depth),
            active_fg: p.success.to_crossterm_color(cfg.depth),
            muted_fg: p.muted.to_crossterm_color(cfg.depth),
        }
    }
}

// ---------------------------------------------------------------------------
// CandidateList component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct CandidateListProps {
    pub list: Option<RenderedCandidateList>,
}

#[component]
pub fn CandidateList(props: &mut CandidateListProps) -> impl Into<AnyElement<'static>> {
    let Some(list) = props.list.take() else {
        return element! { View }.into_any();
    };

    if let Some(message) = list.empty_message {
        return element! {
            View(flex_grow: 1.0, padding_left: 1) {
                Text(content: message, color: list.muted_fg, wrap: TextWrap::NoWrap)
            }
        }
        .into_any();
    }

    element! {
        View(
            flex_grow: 1.0,
            flex_direction: FlexDirection::Column,
            overflow: Overflow::Hidden,
        ) {
            #(list.rows.into_iter().enumerate().map(|(i, row)| {
                let fg = if row.is_cursor { list.cursor_fg } else { list.item_fg };
                let bg = if row.is_cursor { list.cursor_bg } else { Color::Reset };
                let marker = if row.is_cursor { "\u{25b6} " } else { "  " };
                let weight = if row.is_cursor { Weight::Bold } else { Weight::Normal };
                let active_mark = if row.is_active { " \u{25cf}" } else { "" };
                element! {
                    View(key: i, background_color: bg, padding_left: 1) {
                        Text(
                            content: format!("{marker}{}", row.label),
                            color: fg,
                            weight,
                            wrap: TextWrap::NoWrap,
                        )
                        Text(content: active_mark, color: list.active_fg, wrap: TextWrap::NoWrap)
                    }
                }.into_any()
            }))
        }
    }
    .into_any()
}
