//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// projview - keep a tree of project links in step with a storage folder
#[derive(Parser, Debug)]
#[command(name = "projview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ~/.projview_cli.yaml)
    #[arg(long, global = true, env = "PROJVIEW_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Capture the links in the view into the record
    ///
    /// Does not touch the view itself.
    Save,

    /// Make the view match the record
    ///
    /// Creates missing links, deletes stale ones and removes directories
    /// they leave empty.
    Load {
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Link a project into the current view directory
    ///
    /// Examples:
    ///   projview link alpha      # link storage/alpha here
    ///   projview link            # pick a project interactively
    Link {
        /// Project name (prompts when omitted)
        project: Option<String>,
    },

    /// Link the project named after the current directory into PATH
    LinkTo {
        /// View directory, relative to the view root
        path: String,
    },

    /// Move a folder into storage and link it back in place
    ///
    /// Examples:
    ///   projview convert alpha   # convert ./alpha
    ///   projview convert '*'     # convert every subdirectory of .
    Convert {
        /// Folder name inside the current directory, or * for all
        project: String,
    },

    /// Show every place a project appears in the view
    Find {
        /// Project name (defaults to the current directory name)
        project: Option<String>,
    },

    /// Print the record
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   projview completions bash > ~/.local/share/bash-completion/completions/projview
    ///   projview completions zsh > ~/.zfunc/_projview
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
