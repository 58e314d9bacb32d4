//! Outline parsing module
//!
//! Reads org outline documents into an owned heading tree:
//! * TODO [#A] Heading text   :tag1:tag2:
//! ** Child heading
//!
//! Syntax is handled by orgize. Only the heading tree, `#+TODO:`-style
//! keyword declarations and `#+FILETAGS:` are carried over.

use orgize::{Headline, Org, ParseConfig};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::core::error::{GtdError, GtdResult};

/// Open state keywords recognised when a document declares none
pub const DEFAULT_TODO_KEYWORDS: [&str; 3] = ["TODO", "NEXT", "WAIT"];

/// Closed state keywords recognised when a document declares none
pub const DEFAULT_DONE_KEYWORDS: [&str; 1] = ["DONE"];

/// One node of an outline document.
///
/// The root of a parsed document is synthetic: empty heading, no keyword,
/// its tags are the file tags and its children are the top-level headings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineNode {
    /// Raw heading text without stars, keyword, priority or tags
    pub heading: String,
    /// State keyword, if the heading starts with a known one
    pub todo: Option<String>,
    /// Effective tags: own, inherited from ancestors, and file tags
    pub tags: BTreeSet<String>,
    /// Child headings in document order
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a heading node with no keyword, tags or children
    #[allow(dead_code)]
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            ..Default::default()
        }
    }

    /// Set the state keyword
    #[allow(dead_code)]
    pub fn with_todo(mut self, todo: impl Into<String>) -> Self {
        self.todo = Some(todo.into());
        self
    }

    /// Add tags
    #[allow(dead_code)]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Append a child
    #[allow(dead_code)]
    pub fn with_child(mut self, child: OutlineNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Capability that turns outline text into a node tree
pub trait OutlineParser {
    /// Parse document text into its root node
    fn parse_str(&self, text: &str) -> OutlineNode;

    /// Read and parse a file. Invalid UTF-8 is decoded lossily.
    fn parse_file(&self, path: &Path) -> GtdResult<OutlineNode> {
        let bytes = fs::read(path).map_err(|source| GtdError::UnreadableSource {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.parse_str(&String::from_utf8_lossy(&bytes)))
    }
}

/// Org-mode reader
#[derive(Debug, Clone, Copy, Default)]
pub struct OrgParser;

impl OrgParser {
    pub fn new() -> Self {
        Self
    }
}

impl OutlineParser for OrgParser {
    fn parse_str(&self, text: &str) -> OutlineNode {
        // Keyword lines parse the same under any config
        let config = parse_config(&Org::parse(text));
        let org = Org::parse_custom(text, &config);

        let file_tags = collect_file_tags(&org);
        let children = org
            .document()
            .children(&org)
            .map(|headline| to_node(&org, headline, &file_tags))
            .collect();

        OutlineNode {
            tags: file_tags,
            children,
            ..Default::default()
        }
    }
}

/// State keywords declared by `#+TODO:`, `#+SEQ_TODO:` or `#+TYP_TODO:`,
/// falling back to the defaults
fn parse_config(org: &Org<'_>) -> ParseConfig {
    let mut todo = Vec::new();
    let mut done = Vec::new();

    for keyword in org.keywords() {
        let key = keyword.key.to_ascii_uppercase();
        if !matches!(key.as_str(), "TODO" | "SEQ_TODO" | "TYP_TODO") {
            continue;
        }

        let mut closed = false;
        for word in keyword.value.split_whitespace() {
            if word == "|" {
                closed = true;
                continue;
            }
            // Strip fast-access keys: NEXT(n) -> NEXT
            let name = word.split('(').next().unwrap_or(word);
            if name.is_empty() {
                continue;
            }
            if closed {
                done.push(name.to_string());
            } else {
                todo.push(name.to_string());
            }
        }
    }

    if todo.is_empty() && done.is_empty() {
        todo = DEFAULT_TODO_KEYWORDS.iter().map(|k| k.to_string()).collect();
        done = DEFAULT_DONE_KEYWORDS.iter().map(|k| k.to_string()).collect();
    }

    let mut config = ParseConfig::default();
    config.todo_keywords = (todo, done);
    config
}

/// Gather `#+FILETAGS:` values, in either `:a:b:` or `a b` form
fn collect_file_tags(org: &Org<'_>) -> BTreeSet<String> {
    org.keywords()
        .filter(|keyword| keyword.key.eq_ignore_ascii_case("FILETAGS"))
        .flat_map(|keyword| {
            keyword
                .value
                .split(|c: char| c == ':' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Convert one headline and its subtree, inheriting `inherited` tags
fn to_node(org: &Org<'_>, headline: Headline, inherited: &BTreeSet<String>) -> OutlineNode {
    let title = headline.title(org);

    let mut tags = inherited.clone();
    tags.extend(title.tags.iter().map(|t| t.to_string()));

    let children = headline
        .children(org)
        .map(|child| to_node(org, child, &tags))
        .collect();

    OutlineNode {
        heading: title.raw.trim().to_string(),
        todo: title.keyword.as_ref().map(|k| k.to_string()),
        tags,
        children,
    }
}
