//! Error and warning types
//!
//! Errors stop a single source from contributing projects. Warnings never do.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::paths::serialize_lossy;

/// Failure of one configured source, or of loading the configuration itself
#[derive(Debug, Error)]
pub enum GtdError {
    /// Project list document lacks the expected container heading
    #[error("Malformed project list {}: {reason}", path.display())]
    MalformedProjectList { path: PathBuf, reason: String },

    /// Source could not be read at scan time
    #[error("Cannot read {}: {source}", path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Project or inbox directory could not be listed
    #[error("Cannot list directory {}: {source}", path.display())]
    DirectoryEnumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file missing or invalid
    #[error("Invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl GtdError {
    /// Path of the source this error is about
    pub fn path(&self) -> &std::path::Path {
        match self {
            GtdError::MalformedProjectList { path, .. }
            | GtdError::UnreadableSource { path, .. }
            | GtdError::DirectoryEnumeration { path, .. }
            | GtdError::Config { path, .. } => path,
        }
    }

    /// Stable machine-readable code, used in json output
    pub fn code(&self) -> &'static str {
        match self {
            GtdError::MalformedProjectList { .. } => "MALFORMED_PROJECT_LIST",
            GtdError::UnreadableSource { .. } => "UNREADABLE_SOURCE",
            GtdError::DirectoryEnumeration { .. } => "DIRECTORY_ENUMERATION",
            GtdError::Config { .. } => "CONFIG",
        }
    }
}

pub type GtdResult<T> = Result<T, GtdError>;

/// Non-fatal scan event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanWarning {
    /// Project directory has no `<name>.org` file
    MissingProjectFile {
        #[serde(serialize_with = "serialize_lossy")]
        path: PathBuf,
    },
    /// Project file exists but could not be read or parsed
    ProjectFileUnreadable {
        #[serde(serialize_with = "serialize_lossy")]
        path: PathBuf,
        message: String,
    },
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanWarning::MissingProjectFile { path } => {
                write!(f, "Missing project file {}", path.display())
            }
            ScanWarning::ProjectFileUnreadable { path, message } => {
                write!(f, "Cannot read project file {}: {}", path.display(), message)
            }
        }
    }
}
