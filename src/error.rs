// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewportError {
  #[error("IO Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON Parsing Error: {0}")]
  JsonParse(#[from] serde_json::Error),

  #[error("No target environments configured yet. Please run 'viewport config' first.")]
  ConfigFirst,

  #[error("Could not read environment store '{store_path}': {source}")]
  StoreReadError {
    store_path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Could not parse environment store '{store_path}': {source}")]
  StoreParseError {
    store_path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Encountered error while writing to disk ('{store_path}'): {source}")]
  StoreWriteError {
    store_path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Environment store '{store_path}' contains an invalid record for '{env_name}'")]
  InvalidStoreRecord { store_path: PathBuf, env_name: String },

  #[error("Target environment '{0}' does not exist in the store")]
  MissingEnvironment(String),

  #[error("Templates directory not found at path: {0}")]
  TemplateDirNotFound(PathBuf),

  #[error("Can't copy template since source folder '{0}' doesn't exist")]
  TemplateSourceMissing(PathBuf),

  #[error("Can't create folder with name '{0}' since it already exists")]
  DestinationExists(PathBuf),

  #[error("Error during theme creation: {0}")]
  CreationError(String),

  #[error("Error walking template directory '{path}': {source}")]
  WalkDirError {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },

  #[error("User interaction failed: {0}")]
  DialoguerError(#[from] dialoguer::Error),

  #[error("Could not determine templates directory")]
  CannotDetermineTemplatesDir,

  #[error("Could not determine home directory for the environment store")]
  CannotDetermineHomeDir,
}
