//! Convert command implementation

use std::path::Path;

use colored::Colorize;

use projview_core::{ConvertTarget, ViewManager};

use crate::commands::sync::print_report;
use crate::error::Result;

/// Run the convert command
pub fn run_convert(manager: &ViewManager, cwd: &Path, project: &str) -> Result<()> {
    let target = ConvertTarget::from(project);
    let report = manager.convert(cwd, &target)?;

    if report.converted.is_empty() {
        println!("{} Nothing to convert.", "OK".green().bold());
    }
    for converted in &report.converted {
        let view_dir = if converted.view_dir.is_empty() {
            ".".to_string()
        } else {
            converted.view_dir.to_string()
        };
        if converted.moved {
            println!(
                "{} Moved {} into storage, linking into {}",
                "=>".blue().bold(),
                converted.project.cyan(),
                view_dir.cyan()
            );
        } else {
            println!(
                "{} {} is already in storage, linking into {}",
                "=>".blue().bold(),
                converted.project.cyan(),
                view_dir.cyan()
            );
        }
    }
    if !report.converted.is_empty() {
        print_report(&report.sync);
    }

    if let Some(leftover) = &report.leftover {
        let name = leftover
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| leftover.display().to_string());
        println!("{} Must manually delete \"{}\"", "NOTE".yellow().bold(), name);
    }
    Ok(())
}
