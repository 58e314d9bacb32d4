//! Project source scanning
//!
//! Each configured source is either a directory of project directories or
//! a project list document. Sources are scanned independently: a failing
//! source is recorded and the rest are still scanned.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::error::{GtdError, GtdResult, ScanWarning};
use crate::core::model::{Project, ProjectSource};
use crate::core::paths::project_file_for;
use crate::outline::parse::OutlineParser;

/// Projects from all configured sources, in source order
#[derive(Debug, Default)]
pub struct ProjectList {
    pub projects: Vec<Project>,
    pub warnings: Vec<ScanWarning>,
    pub failures: Vec<GtdError>,
}

impl ProjectList {
    /// Scan every source in order
    pub fn scan<P: AsRef<Path>>(sources: &[P], parser: &dyn OutlineParser) -> Self {
        let mut list = ProjectList::default();

        for source in sources {
            let source = source.as_ref();
            let result = if source.is_dir() {
                debug!(path = %source.display(), "scanning project directory");
                list.scan_directory(source, parser)
            } else {
                debug!(path = %source.display(), "scanning project list");
                list.scan_project_list(source, parser)
            };

            match result {
                Ok(count) => info!(path = %source.display(), count, "scanned source"),
                Err(err) => {
                    debug!(path = %source.display(), error = %err, "source failed");
                    list.failures.push(err);
                }
            }
        }

        list
    }

    /// Add one project per subdirectory, ordered by project file path.
    ///
    /// Returns the number of projects added. Nothing is added if the
    /// directory cannot be listed.
    pub fn scan_directory(&mut self, dir: &Path, parser: &dyn OutlineParser) -> GtdResult<usize> {
        let files = project_files(dir)?;

        for file in &files {
            self.push(ProjectSource::FromPath(file), parser);
        }

        Ok(files.len())
    }

    /// Add one project per child of the document's first top-level heading.
    ///
    /// Returns the number of projects added. Nothing is added if the
    /// document cannot be read or has no container with children.
    pub fn scan_project_list(
        &mut self,
        path: &Path,
        parser: &dyn OutlineParser,
    ) -> GtdResult<usize> {
        let root = parser.parse_file(path)?;

        let container = root
            .children
            .first()
            .ok_or_else(|| GtdError::MalformedProjectList {
                path: path.to_path_buf(),
                reason: "document has no headings".to_string(),
            })?;

        if container.children.is_empty() {
            return Err(GtdError::MalformedProjectList {
                path: path.to_path_buf(),
                reason: format!("heading '{}' has no projects", container.heading),
            });
        }

        for node in &container.children {
            self.push(ProjectSource::FromNode(node), parser);
        }

        Ok(container.children.len())
    }

    fn push(&mut self, source: ProjectSource<'_>, parser: &dyn OutlineParser) {
        let (project, warning) = Project::build(source, parser);
        debug!(project = %project.name, actions = project.actions.len(), "built project");
        if let Some(warning) = warning {
            warn!("{}", warning);
            self.warnings.push(warning);
        }
        self.projects.push(project);
    }

    /// Total number of next actions across all projects
    pub fn n_actions(&self) -> usize {
        self.projects.iter().map(|p| p.actions.len()).sum()
    }

    /// Projects without next actions, in list order
    pub fn actionless_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| !p.has_actions()).collect()
    }
}

/// Expected project files of the immediate subdirectories of `dir`, sorted
fn project_files(dir: &Path) -> GtdResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            // Unreadable entries such as dangling symlinks are not project dirs
            Err(e) if e.depth() > 0 => {
                debug!(error = %e, "skipping directory entry");
                continue;
            }
            Err(e) => {
                return Err(GtdError::DirectoryEnumeration {
                    path: dir.to_path_buf(),
                    source: e.into(),
                })
            }
        };

        if entry.file_type().is_dir() {
            files.push(project_file_for(entry.path()));
        }
    }

    files.sort();
    Ok(files)
}
