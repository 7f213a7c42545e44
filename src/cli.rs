// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "viewport", // Command name users type
    author,
    version,
    about = "Scaffolds Scroll Viewport theme projects and manages target-environment profiles.",
    long_about = None
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Increase verbosity level (e.g., -v, -vv)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  #[arg(long)] // Configures the --templates-dir command-line flag
  #[clap(env = "VIEWPORT_TEMPLATES_DIR")] // Configures the environment variable fallback
  pub templates_dir: Option<PathBuf>,

  /// Path of the environment store file (defaults to ~/.vpconfig.json)
  #[arg(long)]
  #[clap(env = "VIEWPORT_CONFIG_FILE")]
  pub config_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Set up or maintain Scroll Viewport target environments
  Config,
  /// Create a new local theme project from a template
  Create,
  /// List configured environments and available templates
  List,
}
