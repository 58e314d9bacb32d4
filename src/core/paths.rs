//! Path utilities
//!
//! User and environment expansion for configured paths, and the project
//! file naming convention used by directory scans.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serializer;
use std::path::{Path, PathBuf};

/// Static regex for environment references
/// Format: $NAME or ${NAME}
static ENV_VAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("Invalid ENV_VAR_RE regex")
});

/// Extension of project files
pub const PROJECT_FILE_EXT: &str = "org";

/// Expand a leading `~` to the home directory, then `$VAR` / `${VAR}`.
///
/// Unset variables, and `~` without a known home, are left as written.
pub fn expand_path(raw: &str) -> PathBuf {
    expand_with(raw, |name| std::env::var(name).ok())
}

/// Expansion against an explicit variable lookup
pub fn expand_with<F>(raw: &str, lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let user_expanded = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match lookup("HOME") {
            Some(home) => format!("{}{}", home, rest),
            None => raw.to_string(),
        },
        _ => raw.to_string(),
    };

    let expanded = ENV_VAR_RE.replace_all(&user_expanded, |caps: &regex::Captures| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or("");
        lookup(name).unwrap_or_else(|| caps[0].to_string())
    });

    PathBuf::from(expanded.into_owned())
}

/// Expected project file of a project directory: `<dir>/<basename(dir)>.org`
pub fn project_file_for(dir: &Path) -> PathBuf {
    let mut file = dir.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    file.push(".");
    file.push(PROJECT_FILE_EXT);
    dir.join(file)
}

/// Serialize a path as a string, replacing invalid UTF-8
pub fn serialize_lossy<P, S>(path: &P, serializer: S) -> Result<S::Ok, S::Error>
where
    P: AsRef<Path>,
    S: Serializer,
{
    serializer.serialize_str(&path.as_ref().to_string_lossy())
}

/// `serialize_lossy` for optional paths
pub fn serialize_lossy_opt<P, S>(path: &Option<P>, serializer: S) -> Result<S::Ok, S::Error>
where
    P: AsRef<Path>,
    S: Serializer,
{
    match path {
        Some(path) => serialize_lossy(path, serializer),
        None => serializer.serialize_none(),
    }
}
