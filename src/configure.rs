// src/configure.rs
use std::path::Path;

use log::{debug, info};

use crate::error::ViewportError;
use crate::prompt;
use crate::schema::EnvTemplate;
use crate::store::{EnvironmentStore, ADD_SENTINEL, DELETE_SENTINEL};
use crate::term;

/// The `config` workflow: with no store yet, go straight to adding the
/// first environment; otherwise show the select menu and dispatch to
/// add, edit, or delete.
pub fn run_config(store_path: &Path) -> Result<(), ViewportError> {
  info!("Running config command...");
  debug!("Store path: {}", store_path.display());

  let template = EnvTemplate::standard();
  let mut store = EnvironmentStore::open(store_path)?;
  store.validate_all(&template)?;

  if store.is_empty() {
    info!("Store is empty, adding the first environment.");
    return add_environment(&mut store, &template);
  }

  let choice = prompt::choose_environment(&store.env_names())?;
  debug!("Menu choice: '{}'", choice);
  match choice.as_str() {
    ADD_SENTINEL => add_environment(&mut store, &template),
    DELETE_SENTINEL => delete_environment(&mut store),
    env_name => edit_environment(&mut store, &template, env_name),
  }
}

fn add_environment(
  store: &mut EnvironmentStore,
  template: &EnvTemplate,
) -> Result<(), ViewportError> {
  let existing = store.env_names();
  let record = prompt::ask_environment(template, &existing, None)?;
  let env_name = record.env_name.clone();

  store.insert(record);
  store.persist()?;
  term::show_added_config(&env_name);
  Ok(())
}

fn edit_environment(
  store: &mut EnvironmentStore,
  template: &EnvTemplate,
  env_name: &str,
) -> Result<(), ViewportError> {
  let current = store
    .get(env_name)
    .cloned()
    .ok_or_else(|| ViewportError::MissingEnvironment(env_name.to_string()))?;

  // The record's own name is exempted from the collision check so a
  // no-op rename stays valid.
  let existing = store.env_names();
  let record = prompt::ask_environment(template, &existing, Some(&current))?;
  let new_name = record.env_name.clone();

  if new_name != env_name {
    info!("Renaming environment '{}' to '{}'", env_name, new_name);
    store.remove(env_name)?;
  }
  store.insert(record);
  store.persist()?;
  term::show_edited_config(&new_name);
  Ok(())
}

fn delete_environment(store: &mut EnvironmentStore) -> Result<(), ViewportError> {
  let target = prompt::choose_delete_target(&store.env_names())?;
  store.remove(&target)?;
  store.persist()?;
  term::show_deleted_config(&target);
  Ok(())
}
