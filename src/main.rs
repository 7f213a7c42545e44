// src/main.rs
mod cli;
mod configure;
mod create;
mod error;
mod list;
mod prompt;
mod schema;
mod store;
mod term;

use clap::Parser;
use cli::{Cli, Commands};
use directories::BaseDirs;
use error::ViewportError;
use log::LevelFilter;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
  let cli = Cli::parse();

  // Setup logging based on verbosity
  let log_level = match cli.verbose {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };
  env_logger::Builder::new().filter_level(log_level).init();

  log::debug!("CLI args: {:?}", cli);

  term::show_welcome();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      term::show_error(&e);
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<(), ViewportError> {
  let store_path = determine_store_path(cli.config_file)?;
  log::debug!("Using environment store: {}", store_path.display());

  match cli.command {
    Commands::Config => {
      configure::run_config(&store_path)?;
    }
    Commands::Create => {
      let templates_path = determine_templates_dir(cli.templates_dir)?;
      log::info!("Using templates directory: {}", templates_path.display());
      create::run_create(&templates_path, &store_path)?;
    }
    Commands::List => {
      let templates_path = determine_templates_dir(cli.templates_dir)?;
      list::run_list(&templates_path, &store_path)?;
    }
  }

  Ok(())
}

/// Determines the environment-store file path.
/// Order of preference:
/// 1. --config-file CLI argument / VIEWPORT_CONFIG_FILE environment variable
/// 2. .vpconfig.json in the invoking user's home directory
fn determine_store_path(cli_path: Option<PathBuf>) -> Result<PathBuf, ViewportError> {
  if let Some(path) = cli_path {
    return Ok(path);
  }
  let base_dirs = BaseDirs::new().ok_or(ViewportError::CannotDetermineHomeDir)?;
  Ok(base_dirs.home_dir().join(store::STORE_FILE_NAME))
}

/// Determines the templates directory path.
/// Order of preference:
/// 1. --templates-dir CLI argument
/// 2. VIEWPORT_TEMPLATES_DIR environment variable
/// 3. templates/ subdirectory relative to the executable
/// 4. templates/ subdirectory relative to the current working directory (fallback)
fn determine_templates_dir(cli_path: Option<PathBuf>) -> Result<PathBuf, ViewportError> {
  if let Some(path) = cli_path {
    if path.is_dir() {
      return Ok(path);
    } else {
      log::warn!(
        "Provided --templates-dir path does not exist or is not a directory: {}",
        path.display()
      );
    }
  }

  // Env variable check happens automatically via clap's `env` attribute

  // Relative to executable
  if let Ok(mut exe_path) = env::current_exe() {
    exe_path.pop(); // Remove the executable name
    let path = exe_path.join("templates");
    if path.is_dir() {
      return Ok(path);
    }
  }

  // Relative to current working directory as a last resort
  let path = PathBuf::from("templates");
  if path.is_dir() {
    return Ok(path);
  }

  Err(ViewportError::CannotDetermineTemplatesDir)
}
