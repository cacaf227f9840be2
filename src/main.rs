use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use themepick::catalog::{CatalogKind, CatalogSet, ThemeId};
use themepick::color::ColorDepth;
use themepick::config::keybindings::MergedBindings;
use themepick::config::loader;
use themepick::config::state::{self, PersistedState};
use themepick::config::types::AppConfig;
use themepick::error::SelectError;
use themepick::host::{ActiveThemes, ThemeHost};
use themepick::picker::TuiPicker;
use themepick::registry::{ThemeRegistry, ThemeSource};
use themepick::selector::{self, Outcome, SelectorOptions};
use themepick::theme::Background;

#[derive(Parser)]
#[command(name = "themepick", version, about = "Terminal theme picker with live preview")]
struct Cli {
    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging to debug.log.
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a dark theme.
    Dark,
    /// Pick a light theme.
    Light,
    /// Pick a theme that is neither dark nor light.
    Other,
    /// List catalog entries that can be loaded.
    List {
        /// Only this catalog.
        kind: Option<CatalogKind>,
        /// Include entries that are not installed.
        #[arg(long)]
        all: bool,
        /// Print JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Print the recorded active theme.
    Current,
    /// Activate and record a theme without the picker.
    Apply {
        /// Theme name.
        name: String,
    },
    /// Deactivate every theme and record that.
    Clear,
}

#[derive(Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    kind: CatalogKind,
    loadable: bool,
    bundled: bool,
}

fn main() -> Result<()> {
    // Install a panic hook that writes to a file, since the fullscreen TUI
    // swallows stderr.
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("{info}\n\n{backtrace}");
        let _ = std::fs::write("panic.log", &msg);
        eprintln!("{msg}");
    }));

    let cli = Cli::parse();

    // Set up tracing.
    if cli.debug {
        let file = std::fs::File::create("debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    // Load config.
    let config = loader::load_config(cli.config.as_deref())?;
    let catalogs = CatalogSet::from_config(&config.catalog);
    let background = Background::detect();
    let registry = Arc::new(ThemeRegistry::from_config(&config));
    let state_path = loader::state_path(&config);

    // Bring back the theme recorded by the previous run.
    let mut host = ActiveThemes::new(Arc::clone(&registry), background);
    if let Some(path) = &state_path {
        host.restore(&state::load_state_or_default(path));
    }

    tracing::info!(
        search_dirs = ?registry.search_dirs(),
        active = ?host.current(),
        "themepick starting"
    );

    let kind = match cli.command {
        Some(Commands::Dark) => CatalogKind::Dark,
        Some(Commands::Light) => CatalogKind::Light,
        Some(Commands::Other) => CatalogKind::Other,
        None => match background {
            Background::Dark => CatalogKind::Dark,
            Background::Light => CatalogKind::Light,
        },
        Some(Commands::List { kind, all, json }) => {
            return list(&catalogs, &registry, kind, all, json);
        }
        Some(Commands::Current) => {
            if let Some(id) = host.current() {
                println!("{id}");
            }
            return Ok(());
        }
        Some(Commands::Apply { name }) => {
            let id = ThemeId::new(name);
            host.apply_theme(&id)
                .with_context(|| format!("applying theme {id}"))?;
            save(state_path.as_deref(), &host.snapshot())?;
            tracing::info!(theme = %id, kind = ?catalogs.kind_of(id.as_str()), "applied");
            println!("{id}");
            return Ok(());
        }
        Some(Commands::Clear) => {
            host.deactivate_all();
            return save(state_path.as_deref(), &host.snapshot());
        }
    };

    pick(&config, &catalogs, host, kind, state_path.as_deref())
}

/// Run one interactive session and record a committed choice.
fn pick(
    config: &AppConfig,
    catalogs: &CatalogSet,
    host: ActiveThemes,
    kind: CatalogKind,
    state_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut picker = TuiPicker::new(
        host.clone(),
        MergedBindings::from_config(&config.keybindings),
        ColorDepth::detect(),
        config.picker.show_preview,
    );
    let options = SelectorOptions {
        require_match: config.picker.require_match,
    };

    let report = match selector::select(host.clone(), kind, catalogs, &mut picker, &options) {
        Ok(report) => report,
        Err(e @ SelectError::NoCandidates { .. }) => {
            eprintln!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e).context("running the picker"),
    };

    for notice in &report.notices {
        eprintln!("{notice}");
    }
    match &report.outcome {
        Outcome::Committed(_) => {
            save(state_path, &host.snapshot())?;
            // A commit whose theme failed to load leaves only its notice.
            if let Some(id) = report.kept(host.current().as_ref()) {
                println!("{id}");
            }
        }
        Outcome::Aborted => tracing::info!(%kind, "selection cancelled"),
    }
    Ok(())
}

fn save(path: Option<&std::path::Path>, snapshot: &PersistedState) -> Result<()> {
    match path {
        Some(path) => state::save_state(path, snapshot),
        None => {
            tracing::warn!("no config directory; active theme not recorded");
            Ok(())
        }
    }
}

fn list(
    catalogs: &CatalogSet,
    registry: &ThemeRegistry,
    kind: Option<CatalogKind>,
    all: bool,
    json: bool,
) -> Result<()> {
    let kinds = kind.map_or_else(|| CatalogKind::ALL.to_vec(), |k| vec![k]);
    let entries: Vec<ListEntry<'_>> = kinds
        .iter()
        .flat_map(|&kind| {
            catalogs.get(kind).iter().map(move |id| {
                let source = registry.locate(id);
                ListEntry {
                    name: id.as_str(),
                    kind,
                    loadable: source.is_some(),
                    bundled: source == Some(ThemeSource::Bundled),
                }
            })
        })
        .filter(|entry| all || entry.loadable)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for entry in &entries {
        if kind.is_some() {
            println!("{}", entry.name);
        } else {
            println!("{}\t{}", entry.kind, entry.name);
        }
    }
    Ok(())
}
