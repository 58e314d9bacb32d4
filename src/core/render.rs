//! Renderer module
//!
//! Renders a report to different output formats: text, json, jsonl

use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::path::PathBuf;

use crate::backends::inbox::InboxStatus;
use crate::core::error::{GtdError, ScanWarning};
use crate::core::model::{Action, Project, SourceKind};
use crate::core::paths::{serialize_lossy, serialize_lossy_opt};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub color: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
            color: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// One project as shown: display name and the actions that pass the filter
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView<'a> {
    pub name: &'a str,
    pub display_name: String,
    pub kind: SourceKind,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_lossy_opt"
    )]
    pub path: Option<&'a PathBuf>,
    /// Whether the project has any next action, filtered or not
    pub has_actions: bool,
    pub actions: Vec<&'a Action>,
}

impl<'a> ProjectView<'a> {
    pub fn new(project: &'a Project, actions: Vec<&'a Action>) -> Self {
        Self {
            name: &project.name,
            display_name: project.display_name(),
            kind: project.kind,
            path: project.path.as_ref(),
            has_actions: project.has_actions(),
            actions,
        }
    }
}

/// A source failure in serializable form
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    pub code: &'static str,
    #[serde(serialize_with = "serialize_lossy")]
    pub path: PathBuf,
    pub message: String,
}

impl From<&GtdError> for FailureRecord {
    fn from(err: &GtdError) -> Self {
        Self {
            code: err.code(),
            path: err.path().to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Totals and status lines that follow the project listing
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub projects: usize,
    pub next_actions: usize,
    pub actionless_projects: usize,
    pub inboxes: Vec<InboxStatus>,
    pub inboxes_empty: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScanWarning>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FailureRecord>,
}

/// Everything the renderer needs, already ordered and filtered
#[derive(Debug, Clone, Serialize)]
pub struct ReportView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<&'a str>,
    pub projects: Vec<ProjectView<'a>>,
    pub summary: Summary,
}

/// One jsonl line
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Record<'r, 'a> {
    Project(&'r ProjectView<'a>),
    Summary(&'r Summary),
}

/// Renderer for reports
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a report to a string
    pub fn render(&self, report: &ReportView<'_>) -> serde_json::Result<String> {
        match self.config.format {
            OutputFormat::Text => Ok(self.render_text(report)),
            OutputFormat::Json => self.render_json(report),
            OutputFormat::Jsonl => self.render_jsonl(report),
        }
    }

    /// Render as a single JSON document
    fn render_json(&self, report: &ReportView<'_>) -> serde_json::Result<String> {
        if self.config.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        }
    }

    /// Render as JSON Lines: one line per project, then the summary
    fn render_jsonl(&self, report: &ReportView<'_>) -> serde_json::Result<String> {
        let lines = report
            .projects
            .iter()
            .map(Record::Project)
            .chain(std::iter::once(Record::Summary(&report.summary)))
            .map(|record| serde_json::to_string(&record))
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(lines.join("\n"))
    }

    /// Render the human-readable report
    fn render_text(&self, report: &ReportView<'_>) -> String {
        let mut lines = Vec::new();

        for project in &report.projects {
            lines.push(self.paint(&project.display_name, |s| s.bright_white().bold()));
            if project.has_actions {
                for action in &project.actions {
                    let line = format!("    ⤷  {}", action.heading);
                    lines.push(self.paint(&line, |s| s.green().bold()));
                }
            } else {
                lines.push(self.paint("    ⚠  No next actions!", |s| s.bright_red().bold()));
            }
        }

        let summary = &report.summary;
        lines.push(String::new());
        lines.push(format!("{} projects", summary.projects));
        lines.push(format!("{} next actions", summary.next_actions));
        if summary.actionless_projects > 0 {
            let line = format!(
                "{} projects without next actions",
                summary.actionless_projects
            );
            lines.push(self.paint(&line, |s| s.bright_red().bold()));
        }

        for inbox in summary.inboxes.iter().filter(|i| !i.is_empty()) {
            let line = format!("{} items in {}", inbox.items, inbox.path.display());
            lines.push(self.paint(&line, |s| s.bright_red().bold()));
        }
        if summary.inboxes_empty {
            lines.push("All inboxes empty".to_string());
        }

        lines.join("\n")
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.config.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}
