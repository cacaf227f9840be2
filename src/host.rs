//! The active-theme service.
//!
//! `ThemeHost` is the only way the selector touches the process-wide active
//! theme. `ActiveThemes` is the real implementation: a cheaply cloneable
//! handle around the active list and the palette the UI paints with.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::catalog::ThemeId;
use crate::config::state::PersistedState;
use crate::error::LoadError;
use crate::registry::ThemeRegistry;
use crate::theme::{Background, ResolvedTheme};

/// Operations the selector needs from whatever owns the active theme.
pub trait ThemeHost {
    /// Whether `id` could be activated in this environment.
    fn is_loadable(&self, id: &ThemeId) -> bool;

    /// Currently active themes, most significant first.
    fn list_active(&self) -> Vec<ThemeId>;

    /// Deactivate every active theme.
    fn deactivate_all(&mut self);

    /// Deactivate everything, then activate `id`.
    ///
    /// On error nothing is active.
    fn apply_theme(&mut self, id: &ThemeId) -> Result<(), LoadError>;

    /// The single theme that counts as "current".
    fn current(&self) -> Option<ThemeId> {
        self.list_active().into_iter().next()
    }
}

#[derive(Debug, Default)]
struct ActiveState {
    active: Vec<ThemeId>,
    palette: Option<ResolvedTheme>,
}

/// Handle to the process-wide active theme.
///
/// Cheaply cloneable; clones share the same state.
#[derive(Debug, Clone)]
pub struct ActiveThemes {
    registry: Arc<ThemeRegistry>,
    background: Background,
    state: Arc<Mutex<ActiveState>>,
}

impl ActiveThemes {
    pub fn new(registry: Arc<ThemeRegistry>, background: Background) -> Self {
        Self {
            registry,
            background,
            state: Arc::new(Mutex::new(ActiveState::default())),
        }
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    /// Palette of the active theme, if any.
    pub fn palette(&self) -> Option<ResolvedTheme> {
        self.lock().palette.clone()
    }

    /// Palette to paint with: the active one, or plain terminal colours.
    pub fn palette_or_plain(&self) -> ResolvedTheme {
        self.palette()
            .unwrap_or_else(|| ResolvedTheme::plain(self.background))
    }

    /// Re-activate the theme recorded in `state`.
    ///
    /// A recorded theme that no longer loads is dropped with a warning.
    pub fn restore(&mut self, state: &PersistedState) {
        let Some(id) = &state.active else {
            self.deactivate_all();
            return;
        };
        if let Err(e) = self.apply_theme(id) {
            tracing::warn!(theme = %id, error = %e.describe(), "recorded theme no longer loads");
        }
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            active: self.current(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ActiveState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ThemeHost for ActiveThemes {
    fn is_loadable(&self, id: &ThemeId) -> bool {
        self.registry.is_loadable(id)
    }

    fn list_active(&self) -> Vec<ThemeId> {
        self.lock().active.clone()
    }

    fn deactivate_all(&mut self) {
        let mut state = self.lock();
        if !state.active.is_empty() {
            tracing::debug!(themes = ?state.active, "deactivating");
        }
        state.active.clear();
        state.palette = None;
    }

    fn apply_theme(&mut self, id: &ThemeId) -> Result<(), LoadError> {
        self.deactivate_all();
        let loaded = self.registry.load(id)?;
        let palette = ResolvedTheme::resolve(id.as_str(), &loaded.file, self.background);

        let mut state = self.lock();
        state.active = vec![id.clone()];
        state.palette = Some(palette);
        tracing::debug!(theme = %id, "activated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> ActiveThemes {
        ActiveThemes::new(Arc::new(ThemeRegistry::bundled_only()), Background::Dark)
    }

    #[test]
    fn apply_replaces_previous_theme() {
        let mut h = host();
        h.apply_theme(&ThemeId::from("nord")).unwrap();
        h.apply_theme(&ThemeId::from("dracula")).unwrap();
        assert_eq!(h.list_active(), vec![ThemeId::from("dracula")]);
        assert_eq!(h.palette().map(|p| p.name), Some("dracula".to_owned()));
    }

    #[test]
    fn failed_apply_leaves_nothing_active() {
        let mut h = host();
        h.apply_theme(&ThemeId::from("nord")).unwrap();
        assert!(h.apply_theme(&ThemeId::from("not-installed")).is_err());
        assert!(h.list_active().is_empty());
        assert!(h.palette().is_none());
    }

    #[test]
    fn clones_share_state() {
        let mut h = host();
        let view = h.clone();
        h.apply_theme(&ThemeId::from("zenburn")).unwrap();
        assert_eq!(view.current(), Some(ThemeId::from("zenburn")));
    }

    #[test]
    fn restore_and_snapshot() {
        let mut h = host();
        h.restore(&PersistedState {
            active: Some(ThemeId::from("solarized-light")),
        });
        assert_eq!(h.snapshot().active, Some(ThemeId::from("solarized-light")));

        h.restore(&PersistedState {
            active: Some(ThemeId::from("gone")),
        });
        assert_eq!(h.snapshot(), PersistedState::default());
    }

    #[test]
    fn plain_palette_when_nothing_active() {
        let h = host();
        assert_eq!(h.palette_or_plain().name, "none");
    }
}
