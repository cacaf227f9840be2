use iocraft::prelude::*;

use crate::color::ColorDepth;
use crate::theme::ResolvedTheme;

// ---------------------------------------------------------------------------
// Pre-rendered query line
// ---------------------------------------------------------------------------

pub struct RenderedQueryInput {
    pub prompt: String,
    pub text: String,
    pub match_count: String,
    pub prompt_fg: Color,
    pub text_fg: Color,
    pub count_fg: Color,
    pub border_fg: Color,
}

impl RenderedQueryInput {
    pub fn build(
        prompt: &str,
        query: &str,
        matched: usize,
        total: usize,
        palette: &ResolvedTheme,
        depth: ColorDepth,
    ) -> Self {
        Self {
            prompt: prompt.to_owned(),
            text: format!("{query}\u{2588}"), // block cursor
            match_count: format!("{matched}/{total}"),
            prompt_fg: palette.accent.to_crossterm_color(depth),
            text_fg: palette.fg.to_crossterm_color(depth),
            count_fg: palette.muted.to_crossterm_color(depth),
            border_fg: palette.border.to_crossterm_color(depth),
        }
    }
}

// ---------------------------------------------------------------------------
// QueryInput component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct QueryInputProps {
    pub input: Option<RenderedQueryInput>,
}

#[component]
pub fn QueryInput(props: &mut QueryInputProps) -> impl Into<AnyElement<'static>> {
    let Some(input) = props.input.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(
            flex_direction: FlexDirection::Row,
            border_style: BorderStyle::Single,
            border_edges: Edges::Bottom,
            border_color: input.border_fg,
            padding_left: 1,
            padding_right: 1,
        ) {
            Text(content: input.prompt, color: input.prompt_fg, weight: Weight::Bold, wrap: TextWrap::NoWrap)
            Text(content: " ", color: input.text_fg)
            View(flex_grow: 1.0) {
                Text(content: input.text, color: input.text_fg, wrap: TextWrap::NoWrap)
            }
            Text(content: input.match_count, color: input.count_fg, wrap: TextWrap::NoWrap)
        }
    }
    .into_any()
}
