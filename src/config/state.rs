use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::ThemeId;

/// The committed theme, as recorded between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub active: Option<ThemeId>,
}

/// Read the state file. A missing file is an empty state.
pub fn load_state(path: &Path) -> Result<PersistedState> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(PersistedState::default());
        }
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    toml::from_str(&contents).with_context(|| format!("parsing TOML from {}", path.display()))
}

/// Read the state file, falling back to an empty state when it cannot be
/// read or parsed. A later save overwrites the bad file.
pub fn load_state_or_default(path: &Path) -> PersistedState {
    load_state(path).unwrap_or_else(|e| {
        tracing::warn!(
            path = %path.display(),
            error = %format!("{e:#}"),
            "ignoring unreadable state file"
        );
        PersistedState::default()
    })
}

/// Write the state file, creating its directory if needed.
pub fn save_state(path: &Path, state: &PersistedState) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let contents = toml::to_string(state).context("serializing state")?;
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), active = ?state.active, "state saved");
    Ok(())
}
