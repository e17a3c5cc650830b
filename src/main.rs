use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::Parser;
use deskgrid::layout::{Display, ItemId, Layout, PersistedLayout};
use deskgrid::utils::Rectangle;
use deskgrid_config::Config;
use directories::ProjectDirs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Sub};

mod cli;

fn main() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "deskgrid=debug".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    let _client = tracy_client::Client::start();

    let cli = Cli::parse();

    match cli.subcommand {
        Sub::Validate { config } => {
            let path = config_path(config)?;
            Config::load(&path).map_err(|err| anyhow!("{err:?}"))?;
            info!("config is valid");
            Ok(())
        }
        Sub::Simulate {
            config,
            screens,
            items,
            restore,
            save,
        } => simulate(config, screens, items, restore, save),
    }
}

fn simulate(
    config: Option<PathBuf>,
    screens: Vec<Rectangle>,
    items: usize,
    restore: Option<PathBuf>,
    save: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = load_config(config);
    let mut layout = Layout::new(&config).context("invalid layout options")?;

    let displays = screens
        .into_iter()
        .enumerate()
        .map(|(idx, geometry)| Display::new(format!("screen-{idx}"), geometry))
        .collect();
    layout
        .rebuild_displays(displays)
        .context("error setting up screens")?;

    if let Some(path) = restore {
        let saved = read_layout(&path)?;
        info!("restoring {} saved positions", saved.len());
        layout.restore_layout(&saved);
    }

    for n in 1..=items {
        layout.insert_item(ItemId::new(format!("item-{n}")));
    }

    if let Some(path) = save {
        layout.confirm_positions();
        let saved = serde_json::to_string_pretty(&layout.export_layout())
            .context("error serializing layout")?;
        fs::write(&path, saved).with_context(|| format!("error writing {path:?}"))?;
    }

    let snapshot =
        serde_json::to_string_pretty(&layout.snapshot()).context("error serializing snapshot")?;
    println!("{snapshot}");
    Ok(())
}

fn read_layout(path: &Path) -> anyhow::Result<PersistedLayout> {
    let contents = fs::read_to_string(path).with_context(|| format!("error reading {path:?}"))?;
    serde_json::from_str(&contents).with_context(|| format!("error parsing {path:?}"))
}

fn config_path(path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = path {
        return Ok(path);
    }

    let dirs = ProjectDirs::from("", "", "deskgrid")
        .context("error retrieving home directory")?;
    Ok(dirs.config_dir().join("config.kdl"))
}

/// Loads the config, falling back to the defaults on any error.
fn load_config(path: Option<PathBuf>) -> Config {
    let explicit = path.is_some();
    let path = match config_path(path) {
        Ok(path) => path,
        Err(err) => {
            warn!("{err:?}");
            return Config::default();
        }
    };

    if !explicit && !path.exists() {
        info!("no config at {path:?}, using the defaults");
        return Config::default();
    }

    Config::load(&path).unwrap_or_else(|err| {
        warn!("{err:?}");
        Config::default()
    })
}
