use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{CatalogKind, ThemeId};

/// Why a theme could not be activated.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("theme {theme} is not installed")]
    NotFound { theme: ThemeId },
    #[error("reading theme file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing theme {theme}")]
    Parse {
        theme: ThemeId,
        #[source]
        source: toml::de::Error,
    },
}

impl LoadError {
    /// The message plus its underlying cause, on one line.
    pub fn describe(&self) -> String {
        match std::error::Error::source(self) {
            Some(cause) => format!("{self}: {}", cause.to_string().trim()),
            None => self.to_string(),
        }
    }
}

/// Why a selector session did not run to an outcome.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("no {kind} themes are installed")]
    NoCandidates { kind: CatalogKind },
    #[error("terminal UI failed")]
    Ui(#[from] std::io::Error),
}
