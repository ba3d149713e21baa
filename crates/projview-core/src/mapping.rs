//! Desired state: project name -> view directories

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from project name to the view-relative directories the project
/// should be linked into.
///
/// Serializes as a plain JSON object of string arrays. Project keys are kept
/// sorted; each directory list keeps insertion order. An empty string (or
/// `"."`) denotes the view root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectMapping {
    projects: BTreeMap<String, Vec<String>>,
}

impl ProjectMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Number of projects (not links).
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Append a view directory for `project`, creating its list if needed.
    pub fn append(&mut self, project: impl Into<String>, view_dir: impl Into<String>) {
        self.projects
            .entry(project.into())
            .or_default()
            .push(view_dir.into());
    }

    /// View directories of one project, in insertion order.
    pub fn view_dirs(&self, project: &str) -> &[String] {
        self.projects.get(project).map(Vec::as_slice).unwrap_or(&[])
    }


    /// Every `(project, view_dir)` pair.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.projects
            .iter()
            .flat_map(|(project, dirs)| dirs.iter().map(move |dir| (project.as_str(), dir.as_str())))
    }

    /// Iterate projects with their directory lists.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.projects
            .iter()
            .map(|(project, dirs)| (project.as_str(), dirs.as_slice()))
    }

    /// Sort every directory list and drop duplicates.
    pub fn normalize(&mut self) {
        for dirs in self.projects.values_mut() {
            dirs.sort();
            dirs.dedup();
        }
    }
}

impl From<BTreeMap<String, Vec<String>>> for ProjectMapping {
    fn from(projects: BTreeMap<String, Vec<String>>) -> Self {
        Self { projects }
    }
}

impl<P, D> FromIterator<(P, D)> for ProjectMapping
where
    P: Into<String>,
    D: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, D)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (project, dir) in iter {
            mapping.append(project, dir);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn append_creates_and_extends() {
        let mut mapping = ProjectMapping::new();
        mapping.append("alpha", "work");
        mapping.append("alpha", "archive/2024");

        assert_eq!(mapping.view_dirs("alpha"), ["work", "archive/2024"]);
        assert!(mapping.view_dirs("beta").is_empty());
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn pairs_cover_every_link() {
        let mapping: ProjectMapping = [("beta", "b"), ("alpha", "a1"), ("alpha", "a2")]
            .into_iter()
            .collect();

        let pairs: Vec<(&str, &str)> = mapping.pairs().collect();
        assert_eq!(pairs, vec![("alpha", "a1"), ("alpha", "a2"), ("beta", "b")]);
    }

    #[test]
    fn serializes_as_plain_object() {
        let mapping: ProjectMapping = [("alpha", "work")].into_iter().collect();
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"alpha":["work"]}"#);

        let back: ProjectMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mapping);
    }

    #[test]
    fn normalize_sorts_and_dedups() {
        let mut mapping: ProjectMapping = [("p", "b"), ("p", "a"), ("p", "b")].into_iter().collect();
        mapping.normalize();
        assert_eq!(mapping.view_dirs("p"), ["a", "b"]);
    }
}
