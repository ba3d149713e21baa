//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based interactive selection.

use dialoguer::FuzzySelect;
use dialoguer::theme::ColorfulTheme;

use crate::error::{CliError, Result};

/// Let the user fuzzy-pick one of `projects`.
pub fn select_project(projects: &[String]) -> Result<String> {
    if projects.is_empty() {
        return Err(CliError::user("No projects found in storage"));
    }

    let index = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select project")
        .items(projects)
        .default(0)
        .interact_opt()?
        .ok_or_else(|| CliError::user("No project selected"))?;

    Ok(projects[index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_storage_is_a_user_error() {
        let result = select_project(&[]);
        assert!(matches!(result, Err(CliError::User { .. })));
    }
}
