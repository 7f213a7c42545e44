// src/prompt.rs
use std::path::Path;

use dialoguer::{theme::ColorfulTheme, Input, Select};
use log::debug;
use regex::Regex;

use crate::create::ThemeProject;
use crate::error::ViewportError;
use crate::schema::EnvTemplate;
use crate::store::{EnvironmentRecord, ADD_SENTINEL, DELETE_SENTINEL};

const DEFAULT_ENV_NAME: &str = "DEV";
const DEFAULT_BASE_URL: &str = "http://localhost:8090/confluence";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";

const DEFAULT_THEME_NAME: &str = "my-viewport-theme";
const DEFAULT_THEME_VERSION: &str = "1.0.0";
const DEFAULT_THEME_DESCRIPTION: &str = "My awesome Scroll Viewport theme.";

const THEME_NAME_RULE: &str = r"(?i)^[a-z][a-z0-9_-]*$";
const THEME_VERSION_RULE: &str = r"^(\d+\.)?(\d+\.)?(\d+)$";

/// Presents the config menu: every existing environment name plus the
/// add/delete sentinels. Pure selection, no store side effects.
pub fn choose_environment(env_names: &[String]) -> Result<String, ViewportError> {
  let mut items: Vec<&str> = vec![ADD_SENTINEL, DELETE_SENTINEL];
  items.extend(env_names.iter().map(String::as_str));

  let selection = Select::with_theme(&ColorfulTheme::default())
    .with_prompt("Choose an existing target environment to edit, or 'add...' / 'delete...'")
    .items(&items)
    .default(0)
    .interact()?;
  Ok(items[selection].to_string())
}

/// Asks which environment to delete, from existing names only.
pub fn choose_delete_target(env_names: &[String]) -> Result<String, ViewportError> {
  let selection = Select::with_theme(&ColorfulTheme::default())
    .with_prompt("Choose a target environment to delete")
    .items(env_names)
    .default(0)
    .interact()?;
  Ok(env_names[selection].clone())
}

/// Interactively collects one environment record, re-prompting per field
/// until the value passes its format rule.
///
/// `existing_names` drives the collision check; during an edit, `current`
/// seeds the defaults and exempts the record's own name from collision.
pub fn ask_environment(
  template: &EnvTemplate,
  existing_names: &[String],
  current: Option<&EnvironmentRecord>,
) -> Result<EnvironmentRecord, ViewportError> {
  let theme = ColorfulTheme::default();

  let name_rule = template
    .rule("envName")
    .expect("standard template defines envName")
    .clone();
  let existing: Vec<String> = existing_names.to_vec();
  let current_name = current.map(|r| r.env_name.clone());

  let env_name: String = Input::with_theme(&theme)
    .with_prompt("Enter name of target environment")
    .default(
      current
        .map(|r| r.env_name.clone())
        .unwrap_or_else(|| DEFAULT_ENV_NAME.to_string()),
    )
    .validate_with(move |value: &String| {
      check_env_name(value, &existing, current_name.as_deref(), &name_rule)
    })
    .interact_text()?;

  let confluence_base_url = ask_field(
    &theme,
    template,
    "confluenceBaseUrl",
    "Enter URL of Confluence Server",
    current
      .map(|r| r.confluence_base_url.clone())
      .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
    "Enter a valid URL. It should not contain a trailing slash.",
  )?;

  let username = ask_field(
    &theme,
    template,
    "username",
    "Enter username for Confluence Server",
    current
      .map(|r| r.username.clone())
      .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
    "Enter a valid username.",
  )?;

  let password = ask_field(
    &theme,
    template,
    "password",
    "Enter password for Confluence Server",
    current
      .map(|r| r.password.clone())
      .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
    "Enter a valid password.",
  )?;

  let space_key = ask_field(
    &theme,
    template,
    "spaceKey",
    "Enter space key to scope (empty for global)",
    current.map(|r| r.space_key.clone()).unwrap_or_default(),
    "Enter a valid space key.",
  )?;

  let record = EnvironmentRecord {
    env_name,
    confluence_base_url,
    username,
    password,
    space_key,
  };
  debug!("Collected environment record for '{}'", record.env_name);
  Ok(record)
}

fn ask_field(
  theme: &ColorfulTheme,
  template: &EnvTemplate,
  field: &str,
  prompt: &str,
  default: String,
  error_message: &str,
) -> Result<String, ViewportError> {
  let rule = template
    .rule(field)
    .expect("standard template defines all prompted fields")
    .clone();
  let error_message = error_message.to_string();

  let value = Input::with_theme(theme)
    .with_prompt(prompt)
    .default(default)
    .allow_empty(true)
    .validate_with(move |value: &String| -> Result<(), String> {
      if rule.is_match(value) {
        Ok(())
      } else {
        Err(error_message.clone())
      }
    })
    .interact_text()?;
  Ok(value)
}

/// Interactively collects the properties of a new theme project.
pub fn ask_theme(
  template_list: &[String],
  env_names: &[String],
  base_dir: &Path,
) -> Result<ThemeProject, ViewportError> {
  let theme = ColorfulTheme::default();

  // Static rules, compiling them cannot fail.
  let name_rule = Regex::new(THEME_NAME_RULE).unwrap();
  let version_rule = Regex::new(THEME_VERSION_RULE).unwrap();

  let base = base_dir.to_path_buf();
  let name: String = Input::with_theme(&theme)
    .with_prompt("Enter a name for your theme")
    .default(DEFAULT_THEME_NAME.to_string())
    .validate_with(move |value: &String| check_theme_name(value, &name_rule, &base))
    .interact_text()?;

  let version: String = Input::with_theme(&theme)
    .with_prompt("Enter a version for your theme")
    .default(DEFAULT_THEME_VERSION.to_string())
    .validate_with(move |value: &String| -> Result<(), String> {
      if version_rule.is_match(value) {
        Ok(())
      } else {
        Err("Please enter a valid version. Must be one to three numbers separated by dots.".into())
      }
    })
    .interact_text()?;

  let description: String = Input::with_theme(&theme)
    .with_prompt("Enter a description for your theme")
    .default(DEFAULT_THEME_DESCRIPTION.to_string())
    .allow_empty(true)
    .interact_text()?;

  let template_selection = Select::with_theme(&theme)
    .with_prompt("Select a template for your theme")
    .items(template_list)
    .default(0)
    .interact()?;

  let env_selection = Select::with_theme(&theme)
    .with_prompt("Select a target environment for your theme")
    .items(env_names)
    .default(0)
    .interact()?;

  Ok(ThemeProject {
    name,
    version,
    description,
    template: template_list[template_selection].clone(),
    env_name: env_names[env_selection].clone(),
  })
}

/// Environment-name rule: reserved sentinels are always rejected, an
/// existing name collides unless it is the record being edited, and the
/// value must satisfy the template's format rule.
pub(crate) fn check_env_name(
  value: &str,
  existing_names: &[String],
  current_name: Option<&str>,
  rule: &Regex,
) -> Result<(), String> {
  for sentinel in [ADD_SENTINEL, DELETE_SENTINEL] {
    if value.eq_ignore_ascii_case(sentinel) {
      return Err(format!(
        "Please choose a different name because '{}' is used internally.",
        sentinel
      ));
    }
  }
  if existing_names.iter().any(|name| name == value) && current_name != Some(value) {
    return Err(format!(
      "Target environment with name '{}' already exists. Please choose a different name.",
      value
    ));
  }
  if rule.is_match(value) {
    Ok(())
  } else {
    Err("Enter a valid name.".to_string())
  }
}

/// Theme-name rule: valid identifier, and no existing path under
/// `base_dir` with the same name.
pub(crate) fn check_theme_name(
  value: &str,
  rule: &Regex,
  base_dir: &Path,
) -> Result<(), String> {
  if !rule.is_match(value) {
    return Err(
      "Please enter a valid name. Must start with a letter and can contain only alpha-numeric \
       characters, '-', and '_'."
        .to_string(),
    );
  }
  if base_dir.join(value).exists() {
    return Err(format!(
      "Folder with name '{}' already exists. Use a different name.",
      value
    ));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::EnvTemplate;
  use tempfile::tempdir;

  fn name_rule() -> Regex {
    EnvTemplate::standard().rule("envName").unwrap().clone()
  }

  #[test]
  fn reserved_sentinels_are_always_rejected() {
    let rule = name_rule();
    assert!(check_env_name("add...", &[], None, &rule).is_err());
    assert!(check_env_name("delete...", &[], None, &rule).is_err());
    // Case-insensitive, as in the interactive menu.
    assert!(check_env_name("ADD...", &[], None, &rule).is_err());
  }

  #[test]
  fn colliding_name_is_rejected_when_adding() {
    let rule = name_rule();
    let existing = vec!["DEV".to_string()];
    assert!(check_env_name("DEV", &existing, None, &rule).is_err());
    assert!(check_env_name("PROD", &existing, None, &rule).is_ok());
  }

  #[test]
  fn keeping_own_name_during_edit_is_allowed() {
    let rule = name_rule();
    let existing = vec!["DEV".to_string(), "PROD".to_string()];
    assert!(check_env_name("DEV", &existing, Some("DEV"), &rule).is_ok());
    // Renaming onto a different existing name still collides.
    assert!(check_env_name("PROD", &existing, Some("DEV"), &rule).is_err());
  }

  #[test]
  fn empty_env_name_fails_the_format_rule() {
    let rule = name_rule();
    assert!(check_env_name("", &[], None, &rule).is_err());
  }

  #[test]
  fn theme_name_must_be_an_identifier() {
    let rule = Regex::new(THEME_NAME_RULE).unwrap();
    let dir = tempdir().unwrap();
    assert!(check_theme_name("my-theme_2", &rule, dir.path()).is_ok());
    assert!(check_theme_name("2theme", &rule, dir.path()).is_err());
    assert!(check_theme_name("my theme", &rule, dir.path()).is_err());
  }

  #[test]
  fn theme_name_colliding_with_existing_path_is_rejected() {
    let rule = Regex::new(THEME_NAME_RULE).unwrap();
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("taken")).unwrap();
    assert!(check_theme_name("taken", &rule, dir.path()).is_err());
  }

  #[test]
  fn theme_version_rule_accepts_one_to_three_segments() {
    let rule = Regex::new(THEME_VERSION_RULE).unwrap();
    assert!(rule.is_match("1"));
    assert!(rule.is_match("1.0"));
    assert!(rule.is_match("1.0.0"));
    assert!(!rule.is_match("1.0.0.0"));
    assert!(!rule.is_match("v1.0"));
  }
}
