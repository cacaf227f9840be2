use serde::Deserialize;

use iocraft::prelude::{KeyCode, KeyEventKind, KeyModifiers};

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// A single key binding: maps a key chord to a picker action.
#[derive(Debug, Clone, Deserialize)]
pub struct Keybinding {
    pub key: String,
    pub builtin: String,
    pub name: Option<String>,
}

/// What a key does inside the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerAction {
    MoveDown,
    MoveUp,
    PageDown,
    PageUp,
    First,
    Last,
    Confirm,
    Cancel,
    DeleteChar,
    ClearQuery,
    TogglePreview,
}

impl PickerAction {
    /// Parse an action name from the config string.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "move_down" => Self::MoveDown,
            "move_up" => Self::MoveUp,
            "page_down" => Self::PageDown,
            "page_up" => Self::PageUp,
            "first" => Self::First,
            "last" => Self::Last,
            "confirm" => Self::Confirm,
            "cancel" => Self::Cancel,
            "delete_char" => Self::DeleteChar,
            "clear_query" => Self::ClearQuery,
            "toggle_preview" => Self::TogglePreview,
            _ => return None,
        })
    }
}

// ---------------------------------------------------------------------------
// Key string conversion
// ---------------------------------------------------------------------------

/// Canonical key string for a terminal key event.
///
/// Examples: `"j"`, `"G"`, `"ctrl+n"`, `"alt+b"`, `"enter"`, `"pagedown"`.
/// Releases and keys without a name yield `None`.
pub fn key_event_to_string(
    code: KeyCode,
    modifiers: KeyModifiers,
    kind: KeyEventKind,
) -> Option<String> {
    if kind == KeyEventKind::Release {
        return None;
    }

    let name: String = match code {
        // Shift is already encoded in the char ('G' vs 'g').
        KeyCode::Char(' ') => "space".into(),
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::CONTROL) => {
            c.to_ascii_lowercase().to_string()
        }
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("f{n}"),
        other => named_key(other)?.into(),
    };

    let ctrl = if modifiers.contains(KeyModifiers::CONTROL) { "ctrl+" } else { "" };
    let alt = if modifiers.contains(KeyModifiers::ALT) { "alt+" } else { "" };
    Some(format!("{ctrl}{alt}{name}"))
}

fn named_key(code: KeyCode) -> Option<&'static str> {
    Some(match code {
        KeyCode::Enter => "enter",
        KeyCode::Esc => "esc",
        KeyCode::Backspace => "backspace",
        KeyCode::Tab => "tab",
        KeyCode::BackTab => "backtab",
        KeyCode::Delete => "delete",
        KeyCode::Up => "up",
        KeyCode::Down => "down",
        KeyCode::Left => "left",
        KeyCode::Right => "right",
        KeyCode::PageUp => "pageup",
        KeyCode::PageDown => "pagedown",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        _ => return None,
    })
}

// ---------------------------------------------------------------------------
// Default keybindings
// ---------------------------------------------------------------------------

fn kb(key: &str, builtin: &str, name: &str) -> Keybinding {
    Keybinding {
        key: key.to_owned(),
        builtin: builtin.to_owned(),
        name: Some(name.to_owned()),
    }
}

/// Default picker bindings. Plain printable keys are left free for typing.
pub fn default_picker() -> Vec<Keybinding> {
    vec![
        kb("down", "move_down", "Next candidate"),
        kb("ctrl+n", "move_down", "Next candidate"),
        kb("tab", "move_down", "Next candidate"),
        kb("up", "move_up", "Previous candidate"),
        kb("ctrl+p", "move_up", "Previous candidate"),
        kb("backtab", "move_up", "Previous candidate"),
        kb("pagedown", "page_down", "Page down"),
        kb("ctrl+d", "page_down", "Page down"),
        kb("pageup", "page_up", "Page up"),
        kb("ctrl+b", "page_up", "Page up"),
        kb("home", "first", "First candidate"),
        kb("end", "last", "Last candidate"),
        kb("enter", "confirm", "Use highlighted theme"),
        kb("esc", "cancel", "Cancel and restore"),
        kb("ctrl+c", "cancel", "Cancel and restore"),
        kb("ctrl+g", "cancel", "Cancel and restore"),
        kb("backspace", "delete_char", "Delete last query char"),
        kb("ctrl+u", "clear_query", "Clear query"),
        kb("ctrl+t", "toggle_preview", "Toggle preview pane"),
    ]
}

// ---------------------------------------------------------------------------
// Merged keybinding set
// ---------------------------------------------------------------------------

/// Defaults merged with user overrides.
#[derive(Debug, Clone)]
pub struct MergedBindings {
    pub bindings: Vec<Keybinding>,
}

impl MergedBindings {
    /// User bindings for a key replace the default for that key; new keys
    /// are appended.
    pub fn from_config(overrides: &[Keybinding]) -> Self {
        Self {
            bindings: merge_lists(&default_picker(), overrides),
        }
    }

    /// Resolve a key string. Bindings naming an unknown action resolve to
    /// nothing, which also lets a user unbind a default.
    pub fn resolve(&self, key: &str) -> Option<PickerAction> {
        self.bindings
            .iter()
            .find(|b| b.key == key)
            .and_then(|b| PickerAction::from_name(&b.builtin))
    }

    /// First key bound to `action`, for the footer hint.
    pub fn key_for(&self, action: PickerAction) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| PickerAction::from_name(&b.builtin) == Some(action))
            .map(|b| b.key.as_str())
    }
}

impl Default for MergedBindings {
    fn default() -> Self {
        Self::from_config(&[])
    }
}

fn merge_lists(defaults: &[Keybinding], overrides: &[Keybinding]) -> Vec<Keybinding> {
    let mut result: Vec<Keybinding> = defaults
        .iter()
        .filter(|d| !overrides.iter().any(|o| o.key == d.key))
        .cloned()
        .collect();
    result.extend(overrides.iter().cloned());
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
