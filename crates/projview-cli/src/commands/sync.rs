//! Load and save command implementations
//!
//! `load` pushes the record onto the view, `save` pulls the view into the
//! record.

use colored::Colorize;

use projview_core::{SyncAction, SyncOptions, SyncReport, ViewManager};

use crate::error::Result;

/// Run the load command
pub fn run_load(manager: &ViewManager, dry_run: bool) -> Result<()> {
    println!("{} Reconciling view with record...", "=>".blue().bold());

    let options = SyncOptions { dry_run };
    let report = manager.reconcile(&options)?;
    print_report(&report);

    Ok(())
}

/// Run the save command
pub fn run_save(manager: &ViewManager) -> Result<()> {
    println!("{} Capturing links from the view...", "=>".blue().bold());

    let mapping = manager.save()?;
    let links: usize = mapping.iter().map(|(_, dirs)| dirs.len()).sum();

    println!(
        "{} Saved {} links for {} projects to {}",
        "OK".green().bold(),
        links,
        mapping.len(),
        manager.store().path().as_str().cyan()
    );
    Ok(())
}

/// Print the actions and warnings of a reconciliation pass.
pub fn print_report(report: &SyncReport) {
    if report.is_noop() {
        println!(
            "{} View already matches the record. No changes needed.",
            "OK".green().bold()
        );
    } else {
        if report.dry_run {
            println!("{} Would apply:", "DRY RUN".yellow().bold());
        } else {
            println!("{} View updated:", "OK".green().bold());
        }
        for action in &report.actions {
            match action {
                SyncAction::CreatedLink { .. } => println!("   {} {}", "+".green(), action),
                _ => println!("   {} {}", "-".red(), action),
            }
        }
    }

    for warning in &report.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
}
