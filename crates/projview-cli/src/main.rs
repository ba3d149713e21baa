//! projview CLI
//!
//! Keeps a view tree of project links in step with the storage folder.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;
mod logging;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Commands::Completions { shell } = cli.command {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    let manager = context::open(cli.config.as_deref())?;
    let cwd = std::env::current_dir()?;
    execute_command(&manager, &cwd, cli.command)
}

fn execute_command(
    manager: &projview_core::ViewManager,
    cwd: &std::path::Path,
    cmd: Commands,
) -> Result<()> {
    match cmd {
        Commands::Save => commands::run_save(manager),
        Commands::Load { dry_run } => commands::run_load(manager, dry_run),
        Commands::Link { project } => commands::run_link(manager, cwd, project.as_deref()),
        Commands::LinkTo { path } => commands::run_link_to(manager, cwd, &path),
        Commands::Convert { project } => commands::run_convert(manager, cwd, &project),
        Commands::Find { project } => commands::run_find(manager, cwd, project.as_deref()),
        Commands::List { json } => commands::run_list(manager, json),
        Commands::Completions { .. } => Ok(()),
    }
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
