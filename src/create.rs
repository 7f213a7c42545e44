// src/create.rs
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::{env, fs};

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use regex::Regex;
use serde_json::Value;
use walkdir::WalkDir;

use crate::error::ViewportError;
use crate::prompt;
use crate::schema::EnvTemplate;
use crate::store::{EnvironmentRecord, EnvironmentStore};
use crate::term;

/// The injected identifier the build template declares; its value is
/// replaced with the chosen environment's data.
const THEME_DATA_PATTERN: &str = r"(?i)(const\s+themeData\s*=\s*)(.*)(;)";

/// Properties of a theme project collected from the operator.
#[derive(Debug, Clone)]
pub struct ThemeProject {
  pub name: String,
  pub version: String,
  pub description: String,
  pub template: String,
  pub env_name: String,
}

/// The `create` workflow: scaffold a new theme project from a template,
/// wired to one configured target environment.
pub fn run_create(templates_dir: &Path, store_path: &Path) -> Result<(), ViewportError> {
  info!("Running create command...");
  debug!(
    "Templates dir: {}, store path: {}",
    templates_dir.display(),
    store_path.display()
  );

  let store = EnvironmentStore::open(store_path)?;
  if store.is_empty() {
    return Err(ViewportError::ConfigFirst);
  }
  store.validate_all(&EnvTemplate::standard())?;

  let template_list = directory_list(templates_dir)?;
  if template_list.is_empty() {
    return Err(ViewportError::CreationError(format!(
      "No templates found in '{}'.",
      templates_dir.display()
    )));
  }

  let cwd = env::current_dir()?;
  let theme = prompt::ask_theme(&template_list, &store.env_names(), &cwd)?;
  info!(
    "Creating theme '{}' from template '{}' for environment '{}'",
    theme.name, theme.template, theme.env_name
  );

  let src_path = templates_dir.join(&theme.template);
  let dest_path = cwd.join(&theme.name);
  // The name prompt already rejects existing paths, but the directory
  // may have appeared since.
  if dest_path.exists() {
    return Err(ViewportError::DestinationExists(dest_path));
  }
  if !src_path.is_dir() {
    return Err(ViewportError::TemplateSourceMissing(src_path));
  }

  copy_template_dir(&src_path, &dest_path)?;

  rewrite_package_json(&dest_path.join("package.json"), &theme)?;

  let record = store
    .get(&theme.env_name)
    .ok_or_else(|| ViewportError::MissingEnvironment(theme.env_name.clone()))?;
  let substituted = inject_theme_data(&dest_path.join("gulpfile.js"), &theme.name, record)?;
  if !substituted {
    warn!(
      "gulpfile.js in template '{}' contains no 'const themeData = ...;' declaration, \
       no environment data was injected.",
      theme.template
    );
  }

  term::show_finished_create(&theme.name);
  Ok(())
}

/// Names of the immediate subdirectories of `parent`, sorted.
pub(crate) fn directory_list(parent: &Path) -> Result<Vec<String>, ViewportError> {
  if !parent.is_dir() {
    return Err(ViewportError::TemplateDirNotFound(parent.to_path_buf()));
  }
  let mut names = Vec::new();
  for entry in fs::read_dir(parent)? {
    let entry = entry?;
    if entry.path().is_dir() {
      names.push(entry.file_name().to_string_lossy().to_string());
    }
  }
  names.sort();
  Ok(names)
}

/// Recursively copies the template directory, with a progress bar over
/// the file count.
pub(crate) fn copy_template_dir(
  template_path: &Path,
  output_path: &Path,
) -> Result<(), ViewportError> {
  debug!(
    "Copying template from {} to {}",
    template_path.display(),
    output_path.display()
  );

  // Pass 1: count files for the progress bar.
  let mut file_count: u64 = 0;
  for entry_result in WalkDir::new(template_path) {
    let entry = entry_result.map_err(|e| ViewportError::WalkDirError {
      path: template_path.to_path_buf(),
      source: e,
    })?;
    if entry.file_type().is_file() {
      file_count += 1;
    }
  }
  debug!("Total files to copy: {}", file_count);

  let pb = ProgressBar::new(file_count);
  pb.set_style(
    ProgressStyle::default_bar()
      .template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
      )
      .expect("Failed to set progress bar style")
      .progress_chars("#>-"),
  );
  pb.set_message("Copying files...");

  // Pass 2: copy.
  for entry_result in WalkDir::new(template_path) {
    let entry = entry_result.map_err(|e| ViewportError::WalkDirError {
      path: template_path.to_path_buf(),
      source: e,
    })?;
    let current_path = entry.path();
    if current_path == template_path {
      continue;
    }
    let relative_path = match current_path.strip_prefix(template_path) {
      Ok(p) => p,
      Err(e) => {
        warn!(
          "Failed to strip prefix {} from {}: {}. Skipping.",
          template_path.display(),
          current_path.display(),
          e
        );
        continue;
      }
    };
    let output_entry_path: PathBuf = output_path.join(relative_path);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&output_entry_path)?;
    } else if entry.file_type().is_file() {
      pb.set_message(format!("Copying {}", relative_path.display()));
      if let Some(parent) = output_entry_path.parent() {
        if !parent.exists() {
          fs::create_dir_all(parent)?;
        }
      }
      fs::copy(current_path, &output_entry_path)?;
      pb.inc(1);
    } else {
      debug!(
        "Skipping non-file/non-directory entry: {}",
        current_path.display()
      );
    }
  }

  pb.finish_with_message("File copy complete.");
  Ok(())
}

/// Sets name, version, and description in the copied package descriptor.
pub(crate) fn rewrite_package_json(
  package_json_path: &Path,
  theme: &ThemeProject,
) -> Result<(), ViewportError> {
  let content = fs::read_to_string(package_json_path).map_err(|e| {
    ViewportError::CreationError(format!(
      "Template is missing a readable package.json ('{}'): {}",
      package_json_path.display(),
      e
    ))
  })?;
  let mut package: Value = serde_json::from_str(&content)?;

  let map = package.as_object_mut().ok_or_else(|| {
    ViewportError::CreationError(format!(
      "package.json at '{}' is not a JSON object",
      package_json_path.display()
    ))
  })?;
  map.insert("name".to_string(), Value::String(theme.name.clone()));
  map.insert("version".to_string(), Value::String(theme.version.clone()));
  map.insert(
    "description".to_string(),
    Value::String(theme.description.clone()),
  );

  fs::write(package_json_path, serde_json::to_string_pretty(&package)?)?;
  Ok(())
}

/// Replaces the value of the `const themeData = ...;` declaration in the
/// copied build template with `{themeName, envName, ...environment}`.
///
/// Returns whether a declaration was found; a zero-match substitution is
/// a no-op for the caller to report.
pub(crate) fn inject_theme_data(
  gulpfile_path: &Path,
  theme_name: &str,
  record: &EnvironmentRecord,
) -> Result<bool, ViewportError> {
  let content = fs::read_to_string(gulpfile_path).map_err(|e| {
    ViewportError::CreationError(format!(
      "Template is missing a readable gulpfile.js ('{}'): {}",
      gulpfile_path.display(),
      e
    ))
  })?;

  let mut data = record.to_json_map();
  data.insert(
    "themeName".to_string(),
    Value::String(theme_name.to_string()),
  );
  let data_literal = serde_json::to_string(&Value::Object(data))?;

  // Static pattern, compiling it cannot fail.
  let re = Regex::new(THEME_DATA_PATTERN).unwrap();
  let replaced = re.replace(&content, |caps: &regex::Captures| {
    format!("{}{}{}", &caps[1], data_literal, &caps[3])
  });

  match replaced {
    Cow::Borrowed(_) => Ok(false),
    Cow::Owned(new_content) => {
      fs::write(gulpfile_path, new_content)?;
      Ok(true)
    }
  }
}
