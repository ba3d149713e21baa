//! Link and link-to command implementations

use std::path::Path;

use colored::Colorize;

use projview_core::ViewManager;

use crate::commands::sync::print_report;
use crate::error::Result;
use crate::interactive;

/// Run the link command
///
/// Appends the current directory to the project's view directories. With no
/// project given, the user picks one of the storage folders.
pub fn run_link(manager: &ViewManager, cwd: &Path, project: Option<&str>) -> Result<()> {
    let project = match project {
        Some(name) => name.to_string(),
        None => interactive::select_project(&manager.storage_projects()?)?,
    };

    println!(
        "{} Linking {} into {}",
        "=>".blue().bold(),
        project.cyan(),
        cwd.display()
    );
    let report = manager.link(cwd, &project)?;
    print_report(&report);
    Ok(())
}

/// Run the link-to command
pub fn run_link_to(manager: &ViewManager, cwd: &Path, target: &str) -> Result<()> {
    println!(
        "{} Linking {} into {}",
        "=>".blue().bold(),
        cwd.display(),
        target.cyan()
    );
    let report = manager.link_to(cwd, target)?;
    print_report(&report);
    Ok(())
}
