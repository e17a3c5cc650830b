use std::path::PathBuf;

use clap::{Parser, Subcommand};
use deskgrid::utils::Rectangle;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(subcommand_value_name = "SUBCOMMAND")]
#[command(subcommand_help_heading = "Subcommands")]
pub struct Cli {
    #[command(subcommand)]
    pub subcommand: Sub,
}

#[derive(Subcommand)]
pub enum Sub {
    /// Validate the config file.
    Validate {
        /// Path to config file (default: `$XDG_CONFIG_HOME/deskgrid/config.kdl`).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Lay out items on a set of screens and print the result as JSON.
    Simulate {
        /// Path to config file (default: `$XDG_CONFIG_HOME/deskgrid/config.kdl`).
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Screen geometry as `WxH+X+Y`, primary screen first. Can be repeated.
        #[arg(short, long = "screen", value_name = "GEOMETRY", required = true)]
        screens: Vec<Rectangle>,
        /// Number of items to place.
        #[arg(short, long, default_value_t = 0)]
        items: usize,
        /// Saved layout to restore before placing the items.
        #[arg(long, value_name = "FILE")]
        restore: Option<PathBuf>,
        /// Confirm the resulting positions and save them to this file.
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },
}
