//! Configuration
//!
//! The YAML file names the project sources and inboxes:
//!
//! ```yaml
//! projects:
//!   - ~/gtd/projects        # directory of project directories
//!   - ~/gtd/projects.org    # project list document
//! inboxes:
//!   - ~/gtd/inbox
//! bookmarks: ~/.mozilla/firefox/default/places.sqlite
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{GtdError, GtdResult};
use crate::core::paths::expand_path;

/// Default configuration location, before expansion
pub const DEFAULT_CONFIG_PATH: &str = "~/.gtd";

/// Configuration as written in the file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Project sources: directories or project list files
    pub projects: Vec<String>,

    /// Inbox directories
    #[serde(default)]
    pub inboxes: Vec<String>,

    /// Browser bookmark database, reported by external tooling only
    #[serde(default)]
    pub bookmarks: Option<String>,
}

impl Config {
    /// Parse configuration text; `path` is only used in error messages
    pub fn from_yaml(text: &str, path: &Path) -> GtdResult<Self> {
        serde_yaml::from_str(text).map_err(|e| GtdError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> GtdResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| GtdError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&text, path)
    }

    /// Project sources with `~` and variables expanded
    pub fn project_paths(&self) -> Vec<PathBuf> {
        self.projects.iter().map(|p| expand_path(p)).collect()
    }

    /// Inbox directories with `~` and variables expanded
    pub fn inbox_paths(&self) -> Vec<PathBuf> {
        self.inboxes.iter().map(|p| expand_path(p)).collect()
    }

    /// Bookmark database with `~` and variables expanded
    pub fn bookmarks_path(&self) -> Option<PathBuf> {
        self.bookmarks.as_deref().map(expand_path)
    }
}
