//! Project and Action model
//!
//! A Project is built either from a project file on disk or from one
//! heading of a project list document. Its actions are the `NEXT` children
//! of its first `Actions` heading.

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::error::ScanWarning;
use crate::core::paths::serialize_lossy_opt;
use crate::outline::parse::{OutlineNode, OutlineParser};

/// Heading that holds a project's actions
pub const ACTIONS_HEADING: &str = "Actions";

/// State keyword that marks a next action
pub const NEXT_KEYWORD: &str = "NEXT";

/// Where a project came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A `<dir>/<dir>.org` file found by a directory scan
    Dir,
    /// A heading inside a project list document
    List,
}

impl SourceKind {
    /// Suffix appended to the project name for display
    pub fn marker(self) -> &'static str {
        match self {
            SourceKind::Dir => " [dir]",
            SourceKind::List => " [list]",
        }
    }
}

/// Input a project is constructed from
#[derive(Debug, Clone, Copy)]
pub enum ProjectSource<'a> {
    FromPath(&'a Path),
    FromNode(&'a OutlineNode),
}

/// A next action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub heading: String,
    pub tags: BTreeSet<String>,
}

impl Action {
    fn from_node(node: &OutlineNode) -> Self {
        Self {
            heading: node.heading.clone(),
            tags: node.tags.clone(),
        }
    }

    /// Whether the action carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// A unit of ongoing work and its next actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    /// Undecorated name: file stem or heading text
    pub name: String,
    pub kind: SourceKind,
    /// Project file for directory-scanned projects
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_lossy_opt"
    )]
    pub path: Option<PathBuf>,
    pub actions: Vec<Action>,
}

impl Project {
    /// Build a project from either input kind.
    ///
    /// Path mode never fails: a missing or unreadable file yields an
    /// actionless project plus a warning.
    pub fn build(
        source: ProjectSource<'_>,
        parser: &dyn OutlineParser,
    ) -> (Self, Option<ScanWarning>) {
        match source {
            ProjectSource::FromPath(path) => Self::from_path(path, parser),
            ProjectSource::FromNode(node) => (Self::from_node(node), None),
        }
    }

    /// Build a project from a project file
    pub fn from_path(path: &Path, parser: &dyn OutlineParser) -> (Self, Option<ScanWarning>) {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut project = Self {
            name,
            kind: SourceKind::Dir,
            path: Some(path.to_path_buf()),
            actions: Vec::new(),
        };

        if !path.is_file() {
            let warning = ScanWarning::MissingProjectFile {
                path: path.to_path_buf(),
            };
            return (project, Some(warning));
        }

        match parser.parse_file(path) {
            Ok(root) => {
                project.actions = extract_actions(&root);
                (project, None)
            }
            Err(err) => {
                let warning = ScanWarning::ProjectFileUnreadable {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                };
                (project, Some(warning))
            }
        }
    }

    /// Build a project from a project list heading
    pub fn from_node(node: &OutlineNode) -> Self {
        Self {
            name: node.heading.clone(),
            kind: SourceKind::List,
            path: None,
            actions: extract_actions(node),
        }
    }

    /// Name with its source-kind marker
    pub fn display_name(&self) -> String {
        format!("{}{}", self.name, self.kind.marker())
    }

    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }
}

/// The `NEXT` children of the first immediate child headed exactly `Actions`.
///
/// Only that one heading and one level below it are inspected.
pub fn extract_actions(root: &OutlineNode) -> Vec<Action> {
    root.children
        .iter()
        .find(|child| child.heading == ACTIONS_HEADING)
        .map(|actions| {
            actions
                .children
                .iter()
                .filter(|child| child.todo.as_deref() == Some(NEXT_KEYWORD))
                .map(Action::from_node)
                .collect()
        })
        .unwrap_or_default()
}
