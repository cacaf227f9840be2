//! Choose a theme with live preview.
//!
//! A session snapshots the active theme, narrows a catalog to the loadable
//! entries and hands them to a [`Picker`]. Every highlight change is applied
//! right away as a preview. Confirming keeps the choice; cancelling puts the
//! snapshot back.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::catalog::{CatalogKind, CatalogSet, ThemeId};
use crate::error::{LoadError, SelectError};
use crate::filter::filter_loadable;
use crate::host::ThemeHost;

// ---------------------------------------------------------------------------
// Picker seam
// ---------------------------------------------------------------------------

/// What the list UI is asked to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickRequest {
    pub prompt: String,
    /// Display names, in catalog order.
    pub candidates: Vec<String>,
    /// Entry to highlight first; `None` means the first entry.
    pub default: Option<String>,
    /// Only entries of `candidates` can be confirmed.
    pub require_match: bool,
}

impl PickRequest {
    /// Position of `default` among the candidates, or 0.
    pub fn default_index(&self) -> usize {
        self.default
            .as_deref()
            .and_then(|d| self.candidates.iter().position(|c| c == d))
            .unwrap_or(0)
    }
}

/// How the list UI ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Chosen(String),
    Cancelled,
}

/// Called on every highlight change, `None` when nothing is highlighted.
/// Returns a status line for the UI to show, if any.
pub type HighlightFn = Box<dyn FnMut(Option<&str>) -> Option<String> + Send>;

/// An interactive list: prompt, default, live highlight callback, and a
/// final confirm or cancel.
pub trait Picker {
    fn pick(
        &mut self,
        request: PickRequest,
        on_highlight: HighlightFn,
    ) -> std::io::Result<PickOutcome>;
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Something the user should be told about after (or during) a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LoadFailed { theme: ThemeId, cause: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LoadFailed { theme, cause } => {
                write!(f, "failed to load theme {theme}: {cause}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed(ThemeId),
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Browsing,
    Ended,
}

/// Result of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub kind: CatalogKind,
    pub outcome: Outcome,
    pub original: Option<ThemeId>,
    pub last_previewed: Option<ThemeId>,
    pub notices: Vec<Notice>,
}

impl SessionReport {
    /// The committed theme, if it is the one now active.
    pub fn kept(&self, active: Option<&ThemeId>) -> Option<&ThemeId> {
        match &self.outcome {
            Outcome::Committed(id) if active == Some(id) => Some(id),
            _ => None,
        }
    }
}

/// One browse-preview-commit/rollback cycle over a catalog.
pub struct Session<H> {
    host: H,
    kind: CatalogKind,
    original: Option<ThemeId>,
    candidates: Vec<ThemeId>,
    last_previewed: Option<ThemeId>,
    notices: Vec<Notice>,
    state: SessionState,
}

impl<H: ThemeHost> Session<H> {
    /// Snapshot the active theme and narrow `catalog` to what can load.
    ///
    /// Fails with `NoCandidates` before touching any state when nothing in
    /// the catalog is loadable.
    pub fn start(host: H, kind: CatalogKind, catalog: &[ThemeId]) -> Result<Self, SelectError> {
        let original = host.current();
        let candidates = filter_loadable(catalog, |id| host.is_loadable(id));
        if candidates.is_empty() {
            return Err(SelectError::NoCandidates { kind });
        }
        tracing::debug!(
            %kind,
            original = ?original,
            candidates = candidates.len(),
            "session started"
        );
        Ok(Self {
            host,
            kind,
            original,
            candidates,
            last_previewed: None,
            notices: Vec::new(),
            state: SessionState::Browsing,
        })
    }

    pub fn is_browsing(&self) -> bool {
        self.state == SessionState::Browsing
    }

    /// The list request for this session.
    pub fn request(&self, require_match: bool) -> PickRequest {
        let default = self
            .original
            .as_ref()
            .filter(|id| self.candidates.contains(id))
            .map(ToString::to_string);
        PickRequest {
            prompt: self.kind.prompt().to_owned(),
            candidates: self.candidates.iter().map(ToString::to_string).collect(),
            default,
            require_match,
        }
    }

    /// React to the highlighted entry changing.
    ///
    /// Returns the notice raised by this preview, if it failed.
    pub fn highlight(&mut self, name: Option<&str>) -> Option<&Notice> {
        if !self.is_browsing() {
            return None;
        }
        let name = name?;
        let id = ThemeId::from(name);
        if self.host.current().as_ref() == Some(&id) {
            return None;
        }
        tracing::debug!(theme = %id, "preview");
        if self.apply(&id) {
            self.last_previewed = Some(id);
            None
        } else {
            self.notices.last()
        }
    }

    /// End the session with the picker's outcome.
    pub fn finish(&mut self, outcome: PickOutcome) -> SessionReport {
        let resolved = match &outcome {
            PickOutcome::Chosen(name) => self.candidates.iter().find(|id| *id == name.as_str()).cloned(),
            PickOutcome::Cancelled => None,
        };
        if self.is_browsing() {
            if let Some(id) = &resolved {
                self.commit(id);
            }
            self.rollback_unless_kept(resolved.as_ref());
            self.state = SessionState::Ended;
        }

        let outcome = match resolved {
            Some(id) => Outcome::Committed(id),
            None => Outcome::Aborted,
        };
        tracing::debug!(kind = %self.kind, outcome = ?outcome, "session ended");
        SessionReport {
            kind: self.kind,
            outcome,
            original: self.original.clone(),
            last_previewed: self.last_previewed.clone(),
            notices: self.notices.clone(),
        }
    }

    fn commit(&mut self, id: &ThemeId) {
        if self.host.current().as_ref() == Some(id) {
            return;
        }
        tracing::debug!(theme = %id, "commit");
        self.apply(id);
    }

    /// Put the original theme back, unless the active theme already is the
    /// original or the session resolved to one of its candidates.
    fn rollback_unless_kept(&mut self, resolved: Option<&ThemeId>) {
        let current = self.host.current();
        let kept = current == self.original || resolved.is_some_and(|id| self.candidates.contains(id));
        if kept {
            return;
        }
        tracing::debug!(from = ?current, to = ?self.original, "rollback");
        self.host.deactivate_all();
        if let Some(original) = self.original.clone() {
            self.apply(&original);
        }
    }

    /// Apply a theme; a failure becomes a notice.
    fn apply(&mut self, id: &ThemeId) -> bool {
        match self.host.apply_theme(id) {
            Ok(()) => true,
            Err(e) => {
                self.report(id, &e);
                false
            }
        }
    }

    fn report(&mut self, id: &ThemeId, error: &LoadError) {
        let cause = error.describe();
        tracing::warn!(theme = %id, error = %cause, "theme failed to load");
        self.notices.push(Notice::LoadFailed {
            theme: id.clone(),
            cause,
        });
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SelectorOptions {
    pub require_match: bool,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            require_match: true,
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run one session over `catalog` with `picker` as the list UI.
///
/// A UI failure still rolls the preview back before the error is returned.
pub fn run_selector<H, P>(
    host: H,
    kind: CatalogKind,
    catalog: &[ThemeId],
    picker: &mut P,
    options: &SelectorOptions,
) -> Result<SessionReport, SelectError>
where
    H: ThemeHost + Send + 'static,
    P: Picker + ?Sized,
{
    let session = Session::start(host, kind, catalog)?;
    let request = session.request(options.require_match);
    let shared = Arc::new(Mutex::new(session));

    let on_highlight: HighlightFn = {
        let shared = Arc::clone(&shared);
        Box::new(move |name| lock(&shared).highlight(name).map(ToString::to_string))
    };

    let picked = picker.pick(request, on_highlight);
    let mut session = lock(&shared);
    match picked {
        Ok(outcome) => Ok(session.finish(outcome)),
        Err(e) => {
            session.finish(PickOutcome::Cancelled);
            Err(SelectError::Ui(e))
        }
    }
}

/// Choose among the dark themes.
pub fn select_dark<H, P>(
    host: H,
    catalogs: &CatalogSet,
    picker: &mut P,
    options: &SelectorOptions,
) -> Result<SessionReport, SelectError>
where
    H: ThemeHost + Send + 'static,
    P: Picker + ?Sized,
{
    select(host, CatalogKind::Dark, catalogs, picker, options)
}

/// Choose among the light themes.
pub fn select_light<H, P>(
    host: H,
    catalogs: &CatalogSet,
    picker: &mut P,
    options: &SelectorOptions,
) -> Result<SessionReport, SelectError>
where
    H: ThemeHost + Send + 'static,
    P: Picker + ?Sized,
{
    select(host, CatalogKind::Light, catalogs, picker, options)
}

/// Choose among the themes that are neither dark nor light.
pub fn select_other<H, P>(
    host: H,
    catalogs: &CatalogSet,
    picker: &mut P,
    options: &SelectorOptions,
) -> Result<SessionReport, SelectError>
where
    H: ThemeHost + Send + 'static,
    P: Picker + ?Sized,
{
    select(host, CatalogKind::Other, catalogs, picker, options)
}

/// Dispatch on a kind chosen at runtime.
pub fn select<H, P>(
    host: H,
    kind: CatalogKind,
    catalogs: &CatalogSet,
    picker: &mut P,
    options: &SelectorOptions,
) -> Result<SessionReport, SelectError>
where
    H: ThemeHost + Send + 'static,
    P: Picker + ?Sized,
{
    run_selector(host, kind, catalogs.get(kind), picker, options)
}
