//! Configuration for the desktop icon grid.
//!
//! The config is a KDL document:
//!
//! ```kdl
//! grid {
//!     cell-size width=100 height=150
//!     icon-padding 5
//! }
//!
//! panel-margins bottom=40
//! ```

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use miette::{Context, IntoDiagnostic};
use tracing::debug;

pub mod grid;

pub use crate::grid::{CellSize, GridConfig, PanelMargins};

#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    #[knuffel(child, default)]
    pub grid: GridConfig,
    #[knuffel(child, default)]
    pub panel_margins: PanelMargins,
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let _span = tracy_client::span!("Config::load");
        Self::load_internal(path).context("error loading config")
    }

    fn load_internal(path: &Path) -> miette::Result<Self> {
        let contents = fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let config = Self::parse(
            path.file_name()
                .and_then(OsStr::to_str)
                .unwrap_or("config.kdl"),
            &contents,
        )
        .context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracy_client::span!("Config::parse");
        knuffel::parse(filename, text)
    }
}
