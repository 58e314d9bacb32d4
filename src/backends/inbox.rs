//! Inbox status
//!
//! Inboxes are only counted, never parsed.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::core::error::{GtdError, GtdResult};
use crate::core::paths::serialize_lossy;

/// Number of unprocessed items in one inbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboxStatus {
    #[serde(serialize_with = "serialize_lossy")]
    pub path: PathBuf,
    pub items: usize,
}

impl InboxStatus {
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }
}

/// Count the immediate entries of an inbox directory, hidden ones included
pub fn count_items(path: &Path) -> GtdResult<usize> {
    if !path.is_dir() {
        let source = match fs::metadata(path) {
            Err(e) => e,
            Ok(_) => io::Error::new(io::ErrorKind::Other, "not a directory"),
        };
        return Err(GtdError::DirectoryEnumeration {
            path: path.to_path_buf(),
            source,
        });
    }

    let mut items = 0;

    for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
        entry.map_err(|e| GtdError::DirectoryEnumeration {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        items += 1;
    }

    debug!(path = %path.display(), items, "counted inbox");
    Ok(items)
}

/// Status of each readable inbox, in configured order, and the failures
/// of the ones that could not be listed
pub fn inbox_statuses<P: AsRef<Path>>(paths: &[P]) -> (Vec<InboxStatus>, Vec<GtdError>) {
    let mut statuses = Vec::new();
    let mut failures = Vec::new();

    for path in paths {
        let path = path.as_ref();
        match count_items(path) {
            Ok(items) => statuses.push(InboxStatus {
                path: path.to_path_buf(),
                items,
            }),
            Err(err) => failures.push(err),
        }
    }

    (statuses, failures)
}

/// True when no inbox holds anything (and when there are no inboxes)
pub fn all_empty(statuses: &[InboxStatus]) -> bool {
    statuses.iter().all(InboxStatus::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_count_items_includes_dirs_and_hidden() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("receipt.pdf"), "x").unwrap();
        fs::write(temp.path().join(".hidden"), "x").unwrap();
        fs::create_dir(temp.path().join("scans")).unwrap();
        fs::write(temp.path().join("scans/page1.png"), "x").unwrap();

        assert_eq!(count_items(temp.path()).unwrap(), 3);
    }

    #[test]
    fn test_empty_inbox() {
        let temp = tempdir().unwrap();
        let (statuses, failures) = inbox_statuses(&[temp.path()]);
        assert!(failures.is_empty());
        assert_eq!(statuses.len(), 1);
        assert!(statuses[0].is_empty());
        assert!(all_empty(&statuses));
    }

    #[test]
    fn test_missing_inbox_is_error() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope");
        let other = tempdir().unwrap();
        let (statuses, failures) = inbox_statuses(&[missing.clone(), other.path().to_path_buf()]);
        assert_eq!(statuses.len(), 1);
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0], GtdError::DirectoryEnumeration { .. }));
        assert_eq!(failures[0].path(), missing.as_path());
    }

    #[test]
    fn test_file_inbox_is_error() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("inbox.txt");
        fs::write(&file, "x").unwrap();
        assert!(count_items(&file).is_err());
    }

    #[test]
    fn test_all_empty_without_inboxes() {
        assert!(all_empty(&[]));
    }

    #[test]
    fn test_statuses_keep_order() {
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        fs::write(b.path().join("note.txt"), "x").unwrap();

        let (statuses, _) = inbox_statuses(&[b.path(), a.path()]);
        assert_eq!(statuses[0].path, b.path());
        assert_eq!(statuses[0].items, 1);
        assert!(!all_empty(&statuses));
    }
}
