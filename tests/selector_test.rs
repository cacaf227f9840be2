use std::sync::{Arc, Mutex};

use themepick::catalog::{CatalogKind, CatalogSet, ThemeId};
use themepick::config::types::CatalogConfig;
use themepick::error::{LoadError, SelectError};
use themepick::host::ThemeHost;
use themepick::selector::{
    HighlightFn, Notice, Outcome, PickOutcome, PickRequest, Picker, SelectorOptions, Session,
    run_selector, select_dark, select_light, select_other,
};

// ---------------------------------------------------------------------------
// Recording host
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Deactivate,
    Apply(String),
}

#[derive(Default)]
struct HostState {
    active: Vec<ThemeId>,
    calls: Vec<Call>,
    loadable: Vec<String>,
    failing: Vec<String>,
}

/// In-memory host that records every mutation. Clones share state.
#[derive(Clone, Default)]
struct RecordingHost(Arc<Mutex<HostState>>);

impl RecordingHost {
    fn new(loadable: &[&str]) -> Self {
        let host = Self::default();
        host.0.lock().unwrap().loadable = loadable.iter().map(|s| (*s).to_owned()).collect();
        host
    }

    fn failing(self, names: &[&str]) -> Self {
        self.0.lock().unwrap().failing = names.iter().map(|s| (*s).to_owned()).collect();
        self
    }

    fn with_active(self, name: &str) -> Self {
        self.0.lock().unwrap().active = vec![ThemeId::from(name)];
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().calls.clone()
    }

    fn apply_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Apply(_)))
            .count()
    }

    fn active(&self) -> Option<ThemeId> {
        self.current()
    }
}

impl ThemeHost for RecordingHost {
    fn is_loadable(&self, id: &ThemeId) -> bool {
        self.0.lock().unwrap().loadable.iter().any(|n| id == n.as_str())
    }

    fn list_active(&self) -> Vec<ThemeId> {
        self.0.lock().unwrap().active.clone()
    }

    fn deactivate_all(&mut self) {
        let mut s = self.0.lock().unwrap();
        s.calls.push(Call::Deactivate);
        s.active.clear();
    }

    fn apply_theme(&mut self, id: &ThemeId) -> Result<(), LoadError> {
        let mut s = self.0.lock().unwrap();
        s.calls.push(Call::Apply(id.to_string()));
        s.active.clear();
        if s.failing.iter().any(|n| id == n.as_str()) {
            return Err(LoadError::NotFound { theme: id.clone() });
        }
        s.active = vec![id.clone()];
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Scripted picker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Step {
    Highlight(Option<&'static str>),
    Confirm(&'static str),
    Cancel,
    Crash,
}

#[derive(Default)]
struct ScriptedPicker {
    steps: Vec<Step>,
    seen: Option<PickRequest>,
    statuses: Vec<Option<String>>,
}

impl ScriptedPicker {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }
}

impl Picker for ScriptedPicker {
    fn pick(
        &mut self,
        request: PickRequest,
        mut on_highlight: HighlightFn,
    ) -> std::io::Result<PickOutcome> {
        self.seen = Some(request);
        for step in self.steps.clone() {
            match step {
                Step::Highlight(name) => self.statuses.push(on_highlight(name)),
                Step::Confirm(name) => return Ok(PickOutcome::Chosen(name.to_owned())),
                Step::Cancel => return Ok(PickOutcome::Cancelled),
                Step::Crash => return Err(std::io::Error::other("terminal went away")),
            }
        }
        Ok(PickOutcome::Cancelled)
    }
}

fn ids(names: &[&str]) -> Vec<ThemeId> {
    names.iter().map(|n| ThemeId::from(*n)).collect()
}

fn run(
    host: &RecordingHost,
    catalog: &[&str],
    steps: Vec<Step>,
) -> (Result<themepick::selector::SessionReport, SelectError>, ScriptedPicker) {
    let mut picker = ScriptedPicker::new(steps);
    let result = run_selector(
        host.clone(),
        CatalogKind::Dark,
        &ids(catalog),
        &mut picker,
        &SelectorOptions::default(),
    );
    (result, picker)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn unloadable_entry_is_hidden_and_confirm_does_not_reapply() {
    let host = RecordingHost::new(&["x"]);
    let (result, picker) = run(
        &host,
        &["x", "y"],
        vec![Step::Highlight(Some("x")), Step::Confirm("x")],
    );
    let report = result.unwrap();

    assert_eq!(picker.seen.unwrap().candidates, vec!["x".to_owned()]);
    assert_eq!(host.calls(), vec![Call::Apply("x".to_owned())]);
    assert_eq!(host.active(), Some(ThemeId::from("x")));
    assert_eq!(report.outcome, Outcome::Committed(ThemeId::from("x")));
}

#[test]
fn cancel_without_original_leaves_nothing_active() {
    let host = RecordingHost::new(&["x", "y"]);
    let (result, _) = run(
        &host,
        &["x", "y"],
        vec![
            Step::Highlight(Some("x")),
            Step::Highlight(Some("y")),
            Step::Cancel,
        ],
    );
    let report = result.unwrap();

    assert_eq!(
        host.calls(),
        vec![
            Call::Apply("x".to_owned()),
            Call::Apply("y".to_owned()),
            Call::Deactivate,
        ]
    );
    assert_eq!(host.active(), None);
    assert_eq!(report.outcome, Outcome::Aborted);
    assert_eq!(report.last_previewed, Some(ThemeId::from("y")));
}

#[test]
fn failed_preview_is_reported_and_browsing_continues() {
    let host = RecordingHost::new(&["x"]).failing(&["x"]);
    let mut session = Session::start(host.clone(), CatalogKind::Dark, &ids(&["x"])).unwrap();

    let notice = session.highlight(Some("x")).cloned();
    assert!(matches!(
        notice,
        Some(Notice::LoadFailed { ref theme, .. }) if theme == "x"
    ));
    assert!(session.is_browsing());
    assert_eq!(host.active(), None);

    let report = session.finish(PickOutcome::Cancelled);
    assert_eq!(report.notices.len(), 1);
    assert_eq!(report.last_previewed, None);
    assert_eq!(host.calls(), vec![Call::Apply("x".to_owned())]);
}

#[test]
fn failed_preview_status_reaches_the_picker() {
    let host = RecordingHost::new(&["x", "y"]).failing(&["x"]);
    let (result, picker) = run(
        &host,
        &["x", "y"],
        vec![
            Step::Highlight(Some("x")),
            Step::Highlight(Some("y")),
            Step::Cancel,
        ],
    );
    result.unwrap();

    assert!(picker.statuses[0].as_deref().unwrap().contains('x'));
    assert_eq!(picker.statuses[1], None);
}

#[test]
fn empty_catalog_reports_no_candidates_without_side_effects() {
    let host = RecordingHost::new(&["x"]);
    let mut picker = ScriptedPicker::new(vec![Step::Confirm("x")]);
    let catalogs = CatalogSet::from_config(&CatalogConfig::default());

    let err = select_light(host.clone(), &catalogs, &mut picker, &SelectorOptions::default())
        .unwrap_err();

    assert!(matches!(
        err,
        SelectError::NoCandidates {
            kind: CatalogKind::Light
        }
    ));
    assert_eq!(err.to_string(), "no light themes are installed");
    assert!(picker.seen.is_none());
    assert!(host.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn committing_the_default_issues_no_apply() {
    let host = RecordingHost::new(&["x", "y"]).with_active("y");
    let (result, picker) = run(
        &host,
        &["x", "y"],
        vec![Step::Highlight(Some("y")), Step::Confirm("y")],
    );
    let report = result.unwrap();

    assert_eq!(picker.seen.unwrap().default.as_deref(), Some("y"));
    assert_eq!(host.apply_count(), 0);
    assert!(host.calls().is_empty());
    assert_eq!(report.outcome, Outcome::Committed(ThemeId::from("y")));
    assert_eq!(report.original, Some(ThemeId::from("y")));
}

#[test]
fn cancel_always_restores_original() {
    let sequences: Vec<Vec<Step>> = vec![
        vec![],
        vec![Step::Highlight(Some("a"))],
        vec![Step::Highlight(Some("a")), Step::Highlight(Some("bad"))],
        vec![Step::Highlight(Some("bad"))],
        vec![
            Step::Highlight(Some("bad")),
            Step::Highlight(None),
            Step::Highlight(Some("b")),
            Step::Highlight(Some("orig")),
        ],
    ];
    for steps in sequences {
        let mut steps = steps;
        steps.push(Step::Cancel);
        let host = RecordingHost::new(&["a", "b", "bad", "orig"])
            .failing(&["bad"])
            .with_active("orig");
        let (result, _) = run(&host, &["a", "b", "bad", "orig"], steps.clone());

        assert_eq!(result.unwrap().outcome, Outcome::Aborted);
        assert_eq!(host.active(), Some(ThemeId::from("orig")), "after {steps:?}");
    }
}

#[test]
fn cancel_restores_original_outside_the_catalog() {
    let host = RecordingHost::new(&["a", "elsewhere"]).with_active("elsewhere");
    let (result, picker) = run(
        &host,
        &["a"],
        vec![Step::Highlight(Some("a")), Step::Cancel],
    );
    result.unwrap();

    assert_eq!(picker.seen.unwrap().default, None);
    assert_eq!(host.active(), Some(ThemeId::from("elsewhere")));
    assert_eq!(
        host.calls(),
        vec![
            Call::Apply("a".to_owned()),
            Call::Deactivate,
            Call::Apply("elsewhere".to_owned()),
        ]
    );
}

#[test]
fn repeated_highlight_applies_once() {
    let host = RecordingHost::new(&["x", "y"]);
    let (result, _) = run(
        &host,
        &["x", "y"],
        vec![
            Step::Highlight(Some("x")),
            Step::Highlight(Some("x")),
            Step::Highlight(Some("x")),
            Step::Confirm("x"),
        ],
    );
    result.unwrap();
    assert_eq!(host.apply_count(), 1);
}

#[test]
fn empty_highlight_is_skipped() {
    let host = RecordingHost::new(&["x"]);
    let (result, _) = run(
        &host,
        &["x"],
        vec![Step::Highlight(None), Step::Cancel],
    );
    result.unwrap();
    assert!(host.calls().is_empty());
}

#[test]
fn confirming_an_unpreviewed_entry_applies_it() {
    let host = RecordingHost::new(&["x", "y"]).with_active("x");
    let (result, _) = run(&host, &["x", "y"], vec![Step::Confirm("y")]);

    assert_eq!(result.unwrap().outcome, Outcome::Committed(ThemeId::from("y")));
    assert_eq!(host.calls(), vec![Call::Apply("y".to_owned())]);
    assert_eq!(host.active(), Some(ThemeId::from("y")));
}

#[test]
fn confirming_free_text_aborts_and_restores() {
    let host = RecordingHost::new(&["x", "y"]).with_active("x");
    let mut picker = ScriptedPicker::new(vec![Step::Highlight(Some("y")), Step::Confirm("zzz")]);
    let options = SelectorOptions {
        require_match: false,
    };
    let report = run_selector(
        host.clone(),
        CatalogKind::Other,
        &ids(&["x", "y"]),
        &mut picker,
        &options,
    )
    .unwrap();

    assert!(!picker.seen.unwrap().require_match);
    assert_eq!(report.outcome, Outcome::Aborted);
    assert_eq!(host.active(), Some(ThemeId::from("x")));
}

#[test]
fn failed_commit_is_a_notice_not_an_error() {
    let host = RecordingHost::new(&["x", "y"]).failing(&["y"]).with_active("x");
    let (result, _) = run(&host, &["x", "y"], vec![Step::Confirm("y")]);
    let report = result.unwrap();

    assert_eq!(report.outcome, Outcome::Committed(ThemeId::from("y")));
    assert_eq!(report.notices.len(), 1);
    assert_eq!(host.active(), None);
}

#[test]
fn ui_failure_rolls_back_then_errors() {
    let host = RecordingHost::new(&["x", "y"]).with_active("x");
    let (result, _) = run(
        &host,
        &["x", "y"],
        vec![Step::Highlight(Some("y")), Step::Crash],
    );

    assert!(matches!(result, Err(SelectError::Ui(_))));
    assert_eq!(host.active(), Some(ThemeId::from("x")));
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

#[test]
fn entry_points_differ_only_in_catalog_and_prompt() {
    let catalogs = CatalogSet::from_config(&CatalogConfig {
        dark: vec!["my-dark".to_owned()],
        light: vec!["my-light".to_owned()],
        other: vec!["my-other".to_owned()],
    });
    let host = RecordingHost::new(&["my-dark", "my-light", "my-other"]);
    let options = SelectorOptions::default();

    let mut picker = ScriptedPicker::new(vec![Step::Cancel]);
    select_dark(host.clone(), &catalogs, &mut picker, &options).unwrap();
    let seen = picker.seen.unwrap();
    assert_eq!(seen.prompt, "Dark theme:");
    assert_eq!(seen.candidates, vec!["my-dark".to_owned()]);

    let mut picker = ScriptedPicker::new(vec![Step::Cancel]);
    select_light(host.clone(), &catalogs, &mut picker, &options).unwrap();
    assert_eq!(picker.seen.unwrap().prompt, "Light theme:");

    let mut picker = ScriptedPicker::new(vec![Step::Confirm("my-other")]);
    let report = select_other(host.clone(), &catalogs, &mut picker, &options).unwrap();
    assert_eq!(picker.seen.unwrap().candidates, vec!["my-other".to_owned()]);
    assert_eq!(report.kind, CatalogKind::Other);
    assert_eq!(host.active(), Some(ThemeId::from("my-other")));
}
