// src/term.rs
use console::style;

pub fn show_welcome() {
  println!("{}", style("viewport-tools").yellow().bold());
}

pub fn show_error(error: &dyn std::fmt::Display) {
  eprintln!("{}", style(format!("Ups, something failed! {}", error)).red());
}

pub fn show_added_config(env_name: &str) {
  println!(
    "{}",
    style(format!(
      "The target environment '{}' has been saved successfully.",
      env_name
    ))
    .green()
  );
}

pub fn show_edited_config(env_name: &str) {
  println!(
    "{}",
    style(format!(
      "The target environment '{}' has been edited successfully.",
      env_name
    ))
    .green()
  );
}

pub fn show_deleted_config(env_name: &str) {
  println!(
    "{}",
    style(format!(
      "The target environment '{}' has been deleted successfully.",
      env_name
    ))
    .green()
  );
}

pub fn show_finished_create(theme_name: &str) {
  let lines = [
    format!("Your theme '{}' has been successfully created.", theme_name),
    "Please do the following steps:".to_string(),
    format!("1. Switch into your theme directory 'cd {}'.", theme_name),
    "2. Run 'npm install' to install gulp.".to_string(),
    "3. Write some code.".to_string(),
    "4. Run the provided gulp tasks to build and upload your theme to Scroll Viewport.".to_string(),
  ];
  for line in lines {
    println!("{}", style(line).green());
  }
}
