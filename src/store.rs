// src/store.rs
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ViewportError;
use crate::schema::{self, EnvTemplate};

/// Menu sentinel offered alongside environment names; reserved, so no
/// environment may ever be named this.
pub const ADD_SENTINEL: &str = "add...";
/// Menu sentinel for the delete flow; reserved like [`ADD_SENTINEL`].
pub const DELETE_SENTINEL: &str = "delete...";

/// File name of the environment store inside the user's home directory.
pub const STORE_FILE_NAME: &str = ".vpconfig.json";

/// One target-environment connection profile.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentRecord {
  pub env_name: String,
  pub confluence_base_url: String,
  pub username: String,
  pub password: String,
  pub space_key: String,
}

impl EnvironmentRecord {
  /// The record as a flat JSON object, as persisted on disk.
  pub fn to_json_map(&self) -> Map<String, Value> {
    match serde_json::to_value(self) {
      Ok(Value::Object(map)) => map,
      // A struct of plain string fields always serializes to an object.
      _ => unreachable!("EnvironmentRecord serializes to a JSON object"),
    }
  }
}

/// The on-disk set of named target environments.
///
/// The store path is injected at construction so tests can point it at a
/// temporary directory. The backing file holds one JSON object keyed by
/// environment name; an absent file means "no environments configured".
/// An empty store is never written out as `{}`, the file is removed
/// instead.
#[derive(Debug)]
pub struct EnvironmentStore {
  path: PathBuf,
  envs: BTreeMap<String, EnvironmentRecord>,
}

impl EnvironmentStore {
  /// Opens the store at `path`, treating a missing file as an empty store.
  pub fn open(path: &Path) -> Result<Self, ViewportError> {
    if !path.is_file() {
      debug!("No store file at {}, starting empty.", path.display());
      return Ok(EnvironmentStore {
        path: path.to_path_buf(),
        envs: BTreeMap::new(),
      });
    }

    let content = fs::read_to_string(path).map_err(|e| ViewportError::StoreReadError {
      store_path: path.to_path_buf(),
      source: e,
    })?;
    let envs: BTreeMap<String, EnvironmentRecord> =
      serde_json::from_str(&content).map_err(|e| ViewportError::StoreParseError {
        store_path: path.to_path_buf(),
        source: e,
      })?;
    debug!(
      "Loaded {} environment(s) from {}",
      envs.len(),
      path.display()
    );
    Ok(EnvironmentStore {
      path: path.to_path_buf(),
      envs,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn is_empty(&self) -> bool {
    self.envs.is_empty()
  }

  pub fn len(&self) -> usize {
    self.envs.len()
  }

  /// All configured environment names, in stable (sorted) order.
  pub fn env_names(&self) -> Vec<String> {
    self.envs.keys().cloned().collect()
  }

  pub fn get(&self, env_name: &str) -> Option<&EnvironmentRecord> {
    self.envs.get(env_name)
  }

  /// Checks every record against the schema template. A store touched only
  /// by this tool always passes; a failure means the file was edited or
  /// corrupted outside of it.
  pub fn validate_all(&self, template: &EnvTemplate) -> Result<(), ViewportError> {
    for (env_name, record) in &self.envs {
      if !schema::validate(template, &record.to_json_map()) {
        return Err(ViewportError::InvalidStoreRecord {
          store_path: self.path.clone(),
          env_name: env_name.clone(),
        });
      }
    }
    Ok(())
  }

  /// Inserts or overwrites the record under its own `envName` key.
  pub fn insert(&mut self, record: EnvironmentRecord) {
    self.envs.insert(record.env_name.clone(), record);
  }

  /// Removes a record by name. Failing to find the key is an invariant
  /// violation: selection menus only ever offer existing names.
  pub fn remove(&mut self, env_name: &str) -> Result<EnvironmentRecord, ViewportError> {
    self
      .envs
      .remove(env_name)
      .ok_or_else(|| ViewportError::MissingEnvironment(env_name.to_string()))
  }

  /// Writes the whole store back to disk as one JSON object, or removes
  /// the backing file entirely when the store is empty.
  pub fn persist(&self) -> Result<(), ViewportError> {
    if self.envs.is_empty() {
      if self.path.is_file() {
        fs::remove_file(&self.path).map_err(|e| ViewportError::StoreWriteError {
          store_path: self.path.clone(),
          source: e,
        })?;
        info!("Removed empty store file {}", self.path.display());
      }
      return Ok(());
    }

    // Whole-object overwrite; never serializes an invalid record because
    // every mutation path validates its input first.
    let content = serde_json::to_string_pretty(&self.envs)?;
    fs::write(&self.path, content).map_err(|e| ViewportError::StoreWriteError {
      store_path: self.path.clone(),
      source: e,
    })?;
    info!(
      "Persisted {} environment(s) to {}",
      self.envs.len(),
      self.path.display()
    );
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  fn record(env_name: &str) -> EnvironmentRecord {
    EnvironmentRecord {
      env_name: env_name.to_string(),
      confluence_base_url: "http://localhost:8090/confluence".to_string(),
      username: "admin".to_string(),
      password: "admin".to_string(),
      space_key: String::new(),
    }
  }

  #[test]
  fn missing_file_opens_as_empty_store() {
    let dir = tempdir().unwrap();
    let store = EnvironmentStore::open(&dir.path().join(STORE_FILE_NAME)).unwrap();
    assert!(store.is_empty());
    assert!(store.env_names().is_empty());
  }

  #[test]
  fn first_add_creates_file_with_single_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(STORE_FILE_NAME);

    let mut store = EnvironmentStore::open(&path).unwrap();
    store.insert(record("DEV"));
    store.persist().unwrap();

    assert!(path.is_file());
    let reread = EnvironmentStore::open(&path).unwrap();
    assert_eq!(reread.env_names(), vec!["DEV".to_string()]);
    assert_eq!(reread.get("DEV"), Some(&record("DEV")));
  }

  #[test]
  fn round_trip_preserves_all_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(STORE_FILE_NAME);

    let mut store = EnvironmentStore::open(&path).unwrap();
    let mut prod = record("PROD");
    prod.confluence_base_url = "https://wiki.example.com".to_string();
    prod.username = "deployer".to_string();
    prod.password = "s3cret".to_string();
    prod.space_key = "DOCS".to_string();
    store.insert(record("DEV"));
    store.insert(prod.clone());
    store.persist().unwrap();

    let reread = EnvironmentStore::open(&path).unwrap();
    assert_eq!(reread.len(), 2);
    assert_eq!(reread.get("PROD"), Some(&prod));
    assert_eq!(reread.get("DEV"), Some(&record("DEV")));
  }

  #[test]
  fn deleting_non_last_environment_keeps_remaining_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(STORE_FILE_NAME);

    let mut store = EnvironmentStore::open(&path).unwrap();
    store.insert(record("DEV"));
    store.insert(record("PROD"));
    store.persist().unwrap();

    let mut store = EnvironmentStore::open(&path).unwrap();
    store.remove("DEV").unwrap();
    store.persist().unwrap();

    assert!(path.is_file());
    let reread = EnvironmentStore::open(&path).unwrap();
    assert_eq!(reread.env_names(), vec!["PROD".to_string()]);
  }

  #[test]
  fn deleting_last_environment_removes_backing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(STORE_FILE_NAME);

    let mut store = EnvironmentStore::open(&path).unwrap();
    store.insert(record("DEV"));
    store.persist().unwrap();
    assert!(path.is_file());

    let mut store = EnvironmentStore::open(&path).unwrap();
    store.remove("DEV").unwrap();
    store.persist().unwrap();
    assert!(!path.exists());
  }

  #[test]
  fn removing_unknown_key_is_an_invariant_error() {
    let dir = tempdir().unwrap();
    let mut store = EnvironmentStore::open(&dir.path().join(STORE_FILE_NAME)).unwrap();
    store.insert(record("DEV"));

    let err = store.remove("STAGING").unwrap_err();
    assert!(matches!(err, ViewportError::MissingEnvironment(name) if name == "STAGING"));
    assert_eq!(store.len(), 1);
  }

  #[test]
  fn edit_rename_replaces_old_key_with_new() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(STORE_FILE_NAME);

    let mut store = EnvironmentStore::open(&path).unwrap();
    store.insert(record("DEV"));
    store.persist().unwrap();

    // Rename DEV -> STAGING the way the edit flow does it.
    let mut store = EnvironmentStore::open(&path).unwrap();
    store.remove("DEV").unwrap();
    store.insert(record("STAGING"));
    store.persist().unwrap();

    let reread = EnvironmentStore::open(&path).unwrap();
    assert_eq!(reread.env_names(), vec!["STAGING".to_string()]);
    assert!(reread.get("DEV").is_none());
  }

  #[test]
  fn validate_all_flags_corrupted_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(STORE_FILE_NAME);
    fs::write(
      &path,
      r#"{"DEV":{"envName":"DEV","confluenceBaseUrl":"http://localhost:8090/confluence/","username":"admin","password":"admin","spaceKey":""}}"#,
    )
    .unwrap();

    let store = EnvironmentStore::open(&path).unwrap();
    let template = EnvTemplate::standard();
    let err = store.validate_all(&template).unwrap_err();
    assert!(matches!(
      err,
      ViewportError::InvalidStoreRecord { env_name, .. } if env_name == "DEV"
    ));
  }

  #[test]
  fn unknown_fields_in_store_fail_to_parse() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(STORE_FILE_NAME);
    fs::write(
      &path,
      r#"{"DEV":{"envName":"DEV","confluenceBaseUrl":"http://x.io","username":"a","password":"a","spaceKey":"","extra":"y"}}"#,
    )
    .unwrap();

    let err = EnvironmentStore::open(&path).unwrap_err();
    assert!(matches!(err, ViewportError::StoreParseError { .. }));
  }
}
