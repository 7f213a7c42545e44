// src/list.rs
use std::path::Path;

use log::warn;

use crate::create::directory_list;
use crate::error::ViewportError;
use crate::store::EnvironmentStore;

/// Read-only overview of configured environments and available templates.
pub fn run_list(templates_dir: &Path, store_path: &Path) -> Result<(), ViewportError> {
  let store = EnvironmentStore::open(store_path)?;

  println!("Configured target environments:");
  if store.is_empty() {
    println!("  (none - run 'viewport config' to add one)");
  } else {
    println!("{:<20} | {:<40} | {}", "Name", "Confluence URL", "Space");
    println!("{:-<20}-+-{:-<40}-+-{:-<10}", "", "", "");
    for name in store.env_names() {
      // env_names only returns keys that exist in the store.
      if let Some(record) = store.get(&name) {
        let space = if record.space_key.is_empty() {
          "(global)"
        } else {
          record.space_key.as_str()
        };
        println!(
          "{:<20} | {:<40} | {}",
          record.env_name, record.confluence_base_url, space
        );
      }
    }
  }

  println!();
  println!("Available theme templates:");
  match directory_list(templates_dir) {
    Ok(templates) if !templates.is_empty() => {
      for template in templates {
        println!("  {}", template);
      }
    }
    Ok(_) => println!("  (none found in '{}')", templates_dir.display()),
    Err(e) => {
      warn!("Could not list templates: {}", e);
      println!("  (templates directory not found)");
    }
  }

  Ok(())
}
