//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "deskpaper", version)]
#[command(about = "Get or set the desktop wallpaper and its layout style", long_about = None)]
pub struct Cli {
    /// Image to set as the wallpaper. Prints the current wallpaper when omitted.
    pub path: Option<PathBuf>,

    /// Layout style: current (default), fill, fit, stretch, center, tile.
    #[arg(short, long)]
    pub style: Option<String>,

    /// Screen identifier to target (see --list).
    #[arg(long)]
    pub screen: Option<String>,

    /// Print every screen with its current wallpaper.
    #[arg(short, long, conflicts_with = "path")]
    pub list: bool,

    /// Print the --list output as JSON.
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Configuration file (defaults to ~/.deskpaper/config.yaml).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log diagnostics to stderr.
    #[arg(short, long)]
    pub debug: bool,
}
