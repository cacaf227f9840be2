//! The fullscreen list UI behind [`Picker`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use iocraft::prelude::*;

use crate::color::ColorDepth;
use crate::components::candidate_list::{CandidateList, CandidateListBuildConfig, RenderedCandidateList};
use crate::components::footer::{Footer, RenderedFooter};
use crate::components::preview::{Preview, RenderedPreview};
use crate::components::query_input::{QueryInput, RenderedQueryInput};
use crate::config::keybindings::{MergedBindings, PickerAction, key_event_to_string};
use crate::filter::filter_by_query;
use crate::host::{ActiveThemes, ThemeHost};
use crate::selector::{HighlightFn, PickOutcome, PickRequest, Picker};

// ---------------------------------------------------------------------------
// List model
// ---------------------------------------------------------------------------

/// Query and highlight position of the list, independent of rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerModel {
    pub query: String,
    /// Position within the current matches.
    pub cursor: usize,
    pub show_preview: bool,
}

/// What a key press asks of the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue,
    Finish(PickOutcome),
    Refuse(&'static str),
}

impl PickerModel {
    pub fn new(request: &PickRequest, show_preview: bool) -> Self {
        Self {
            query: String::new(),
            cursor: request.default_index(),
            show_preview,
        }
    }

    pub fn matches(&self, request: &PickRequest) -> Vec<usize> {
        filter_by_query(&request.candidates, &self.query)
    }

    pub fn highlighted<'a>(&self, request: &'a PickRequest) -> Option<&'a str> {
        self.matches(request)
            .get(self.cursor)
            .map(|&i| request.candidates[i].as_str())
    }

    /// Extend the query; the highlight goes back to the first match.
    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.cursor = 0;
    }

    pub fn apply(&mut self, action: PickerAction, request: &PickRequest, page: usize) -> Step {
        let last = self.matches(request).len().saturating_sub(1);
        match action {
            PickerAction::MoveDown => self.cursor = (self.cursor + 1).min(last),
            PickerAction::MoveUp => self.cursor = self.cursor.saturating_sub(1),
            PickerAction::PageDown => self.cursor = (self.cursor + page.max(1)).min(last),
            PickerAction::PageUp => self.cursor = self.cursor.saturating_sub(page.max(1)),
            PickerAction::First => self.cursor = 0,
            PickerAction::Last => self.cursor = last,
            PickerAction::Confirm => return self.confirm(request),
            PickerAction::Cancel => return Step::Finish(PickOutcome::Cancelled),
            PickerAction::DeleteChar => {
                if self.query.pop().is_some() {
                    self.cursor = 0;
                }
            }
            PickerAction::ClearQuery => {
                if !self.query.is_empty() {
                    self.query.clear();
                    self.cursor = 0;
                }
            }
            PickerAction::TogglePreview => self.show_preview = !self.show_preview,
        }
        Step::Continue
    }

    fn confirm(&self, request: &PickRequest) -> Step {
        if let Some(name) = self.highlighted(request) {
            return Step::Finish(PickOutcome::Chosen(name.to_owned()));
        }
        let typed = self.query.trim();
        if !request.require_match && !typed.is_empty() {
            return Step::Finish(PickOutcome::Chosen(typed.to_owned()));
        }
        Step::Refuse("No match")
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn notify(handler: Option<&Arc<Mutex<HighlightFn>>>, name: Option<&str>) -> Option<String> {
    let handler = handler?;
    let mut f = lock(handler);
    (*f)(name)
}

// ---------------------------------------------------------------------------
// ThemePicker component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct ThemePickerProps {
    pub request: Option<Arc<PickRequest>>,
    pub on_highlight: Option<Arc<Mutex<HighlightFn>>>,
    pub outcome: Option<Arc<Mutex<Option<PickOutcome>>>>,
    pub active: Option<ActiveThemes>,
    pub bindings: Option<Arc<MergedBindings>>,
    pub depth: ColorDepth,
    pub show_preview: bool,
}

#[component]
pub fn ThemePicker(props: &ThemePickerProps, mut hooks: Hooks) -> impl Into<AnyElement<'static>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();

    let request = props.request.clone().unwrap_or_default();
    let bindings = props.bindings.clone().unwrap_or_default();
    let depth = props.depth;

    let initial = PickerModel::new(&request, props.show_preview);
    let mut model = hooks.use_state(move || initial);
    let mut status = hooks.use_state(|| Option::<String>::None);
    let mut started = hooks.use_state(|| false);
    let mut done = hooks.use_state(|| false);

    // The entry highlighted on open is previewed like any other.
    if !started.get() {
        started.set(true);
        let first = model.read().highlighted(&request).map(str::to_owned);
        status.set(notify(props.on_highlight.as_ref(), first.as_deref()));
    }

    if done.get() {
        system.exit();
    }

    // Query line and footer take two rows each.
    let list_height = usize::from(height.saturating_sub(4)).max(1);

    hooks.use_terminal_events({
        let request = Arc::clone(&request);
        let bindings = Arc::clone(&bindings);
        let on_highlight = props.on_highlight.clone();
        let outcome = props.outcome.clone();
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => {
                if done.get() {
                    return;
                }
                let mut m = model.read().clone();
                let before = m.highlighted(&request).map(str::to_owned);

                let action = key_event_to_string(code, modifiers, kind)
                    .and_then(|key| bindings.resolve(&key));
                let step = match (action, code) {
                    (Some(action), _) => m.apply(action, &request, list_height),
                    (None, KeyCode::Char(c))
                        if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                    {
                        m.push_char(c);
                        Step::Continue
                    }
                    _ => return,
                };

                let after = m.highlighted(&request).map(str::to_owned);
                model.set(m);
                match step {
                    Step::Finish(picked) => {
                        tracing::debug!(outcome = ?picked, "picker closed");
                        if let Some(slot) = &outcome {
                            *lock(slot) = Some(picked);
                        }
                        done.set(true);
                    }
                    Step::Refuse(message) => status.set(Some(message.to_owned())),
                    Step::Continue => {
                        if before != after {
                            status.set(notify(on_highlight.as_ref(), after.as_deref()));
                        }
                    }
                }
            }
            _ => {}
        }
    });

    // Paint with whatever is active now, so the preview covers the whole UI.
    let active = props.active.as_ref();
    let palette = active.map_or_else(
        || crate::theme::ResolvedTheme::plain(crate::theme::Background::detect()),
        ActiveThemes::palette_or_plain,
    );
    let active_name = active.and_then(|a| a.current());

    let m = model.read().clone();
    let matches = m.matches(&request);
    let show_preview = m.show_preview;
    let list_width = if show_preview {
        usize::from(width) * 2 / 5
    } else {
        usize::from(width)
    };

    let query_input = RenderedQueryInput::build(
        &request.prompt,
        &m.query,
        matches.len(),
        request.candidates.len(),
        &palette,
        depth,
    );
    let list = RenderedCandidateList::build(&CandidateListBuildConfig {
        candidates: &request.candidates,
        matches: &matches,
        cursor: m.cursor,
        active: active_name.as_ref().map(|id| id.as_str()),
        height: list_height,
        width: list_width,
        palette: &palette,
        depth,
    });
    let preview = show_preview.then(|| RenderedPreview::build(&palette, depth));
    let footer = RenderedFooter::build(
        m.cursor,
        matches.len(),
        active_name.as_ref().map(|id| id.as_str()),
        status.read().clone(),
        &bindings,
        &palette,
        depth,
    );

    element! {
        View(
            width: u32::from(width),
            height: u32::from(height),
            flex_direction: FlexDirection::Column,
            background_color: palette.bg.to_crossterm_color(depth),
        ) {
            QueryInput(input: query_input)
            View(flex_grow: 1.0, flex_direction: FlexDirection::Row) {
                View(width: u32::try_from(list_width).unwrap_or(u32::MAX)) {
                    CandidateList(list)
                }
                #(preview.map(|p| element! {
                    View(flex_grow: 1.0) {
                        Preview(preview: p)
                    }
                }))
            }
            Footer(footer)
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal picker
// ---------------------------------------------------------------------------

/// [`Picker`] drawn fullscreen in the terminal.
pub struct TuiPicker {
    active: ActiveThemes,
    bindings: Arc<MergedBindings>,
    depth: ColorDepth,
    show_preview: bool,
}

impl TuiPicker {
    pub fn new(
        active: ActiveThemes,
        bindings: MergedBindings,
        depth: ColorDepth,
        show_preview: bool,
    ) -> Self {
        Self {
            active,
            bindings: Arc::new(bindings),
            depth,
            show_preview,
        }
    }
}

impl Picker for TuiPicker {
    fn pick(
        &mut self,
        request: PickRequest,
        on_highlight: HighlightFn,
    ) -> std::io::Result<PickOutcome> {
        let slot = Arc::new(Mutex::new(None));
        smol::block_on(
            element! {
                ThemePicker(
                    request: Some(Arc::new(request)),
                    on_highlight: Some(Arc::new(Mutex::new(on_highlight))),
                    outcome: Some(Arc::clone(&slot)),
                    active: Some(self.active.clone()),
                    bindings: Some(Arc::clone(&self.bindings)),
                    depth: self.depth,
                    show_preview: self.show_preview,
                )
            }
            .fullscreen(),
        )?;
        // Closing the terminal without an answer counts as a cancel.
        Ok(lock(&slot).take().unwrap_or(PickOutcome::Cancelled))
    }
}
