//! Find and list command implementations

use std::path::Path;

use colored::Colorize;

use projview_core::ViewManager;

use crate::error::{CliError, Result};

/// Run the find command
///
/// Without a project name, looks for the project named after `cwd`.
pub fn run_find(manager: &ViewManager, cwd: &Path, project: Option<&str>) -> Result<()> {
    let project = match project {
        Some(name) => name.to_string(),
        None => cwd
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| CliError::user("Cannot infer a project name from this directory"))?,
    };

    let found = manager.find(&project)?;
    if found.is_empty() {
        println!("No view locations found for {}", project.cyan());
        return Ok(());
    }

    println!("{} {} appears in:", "=>".blue().bold(), project.cyan());
    for path in found {
        println!("   {}", path);
    }
    Ok(())
}

/// Run the list command
pub fn run_list(manager: &ViewManager, json: bool) -> Result<()> {
    let mapping = manager.load_mapping();

    if json {
        println!("{}", serde_json::to_string_pretty(&mapping)?);
        return Ok(());
    }

    if mapping.is_empty() {
        println!(
            "Record is empty. Use {} or {} to add projects.",
            "projview link".cyan(),
            "projview save".cyan()
        );
        return Ok(());
    }

    for (project, dirs) in mapping.iter() {
        let exists = manager.layout().storage_root().join(project).is_dir();
        if exists {
            println!("{}", project.green().bold());
        } else {
            println!("{} {}", project.red().bold(), "(missing from storage)".dimmed());
        }
        for dir in dirs {
            let shown = if dir.is_empty() { "." } else { dir.as_str() };
            println!("   {} {}", "-".dimmed(), shown);
        }
    }
    Ok(())
}
