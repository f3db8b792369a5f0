//! Command line arguments
//!
//! Only ambient options live here; everything about the window and its
//! plugins comes from the configuration file.

use clap::{ArgAction, Parser};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "guikit")]
#[command(about = "Plugin-driven desktop application shell")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file; bare names go to the per-user log directory
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored output
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,
}

impl Args {
    /// Resolve colour: flags first, then the config value, then TTY detection
    pub fn use_color(&self, configured: Option<bool>) -> bool {
        if self.no_color {
            return false;
        }
        if self.color {
            return true;
        }
        configured.unwrap_or_else(|| std::io::stderr().is_terminal())
    }
}
