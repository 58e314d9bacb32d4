//! Report flow - Next actions per project with totals
//!
//! Scans the configured sources, then applies the presentation-only
//! choices (display order, tag filter) on top of the finished ProjectList.

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::backends::inbox::{all_empty, inbox_statuses, InboxStatus};
use crate::backends::projects::ProjectList;
use crate::core::config::Config;
use crate::core::error::GtdError;
use crate::core::model::{Action, Project};
use crate::core::render::{
    FailureRecord, ProjectView, RenderConfig, Renderer, ReportView, Summary,
};
use crate::outline::parse::OrgParser;

/// Order in which projects are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayOrder {
    /// Construction order
    #[default]
    Natural,
    /// Uniform random permutation
    Random,
}

/// Presentation options for one report
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub order: DisplayOrder,
    /// Only show actions carrying this tag
    pub tag: Option<String>,
}

/// Everything gathered for one report
#[derive(Debug)]
pub struct ReportData {
    pub list: ProjectList,
    pub inboxes: Vec<InboxStatus>,
    pub inbox_failures: Vec<GtdError>,
}

impl ReportData {
    /// Scan project sources and inboxes named by the configuration
    pub fn gather(config: &Config) -> Self {
        let parser = OrgParser::new();
        let list = ProjectList::scan(&config.project_paths(), &parser);
        let (inboxes, inbox_failures) = inbox_statuses(&config.inbox_paths());

        if let Some(bookmarks) = config.bookmarks_path() {
            debug!(path = %bookmarks.display(), "bookmark database configured");
        }

        Self {
            list,
            inboxes,
            inbox_failures,
        }
    }

    /// All source and inbox failures, in scan order
    pub fn failures(&self) -> impl Iterator<Item = &GtdError> {
        self.list.failures.iter().chain(self.inbox_failures.iter())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Projects in display order; each project appears exactly once
pub fn display_order<'a, R: Rng + ?Sized>(
    projects: &'a [Project],
    order: DisplayOrder,
    rng: &mut R,
) -> Vec<&'a Project> {
    let mut ordered: Vec<&Project> = projects.iter().collect();
    if order == DisplayOrder::Random {
        ordered.shuffle(rng);
    }
    ordered
}

/// An action is shown when no tag is requested or it carries the tag
pub fn action_visible(action: &Action, tag: Option<&str>) -> bool {
    tag.map_or(true, |t| action.has_tag(t))
}

/// The project's actions that pass the tag filter, in order
pub fn visible_actions<'a>(project: &'a Project, tag: Option<&str>) -> Vec<&'a Action> {
    project
        .actions
        .iter()
        .filter(|a| action_visible(a, tag))
        .collect()
}

/// Assemble the view handed to the renderer
pub fn build_view<'a, R: Rng + ?Sized>(
    data: &'a ReportData,
    options: &'a ReportOptions,
    rng: &mut R,
) -> ReportView<'a> {
    let tag = options.tag.as_deref();
    let list = &data.list;

    let projects = display_order(&list.projects, options.order, rng)
        .into_iter()
        .map(|p| ProjectView::new(p, visible_actions(p, tag)))
        .collect();

    let summary = Summary {
        projects: list.projects.len(),
        next_actions: list.n_actions(),
        actionless_projects: list.actionless_projects().len(),
        inboxes: data.inboxes.clone(),
        inboxes_empty: all_empty(&data.inboxes) && data.inbox_failures.is_empty(),
        warnings: list.warnings.clone(),
        failures: data.failures().map(FailureRecord::from).collect(),
    };

    ReportView {
        tag,
        projects,
        summary,
    }
}

/// Run the report: print it to stdout and failures to stderr.
///
/// Returns whether every source and inbox could be read.
pub fn run_report(config: &Config, options: &ReportOptions, render: RenderConfig) -> Result<bool> {
    let data = ReportData::gather(config);
    let view = build_view(&data, options, &mut rand::thread_rng());

    let renderer = Renderer::with_config(render);
    println!("{}", renderer.render(&view).context("Failed to render report")?);

    for failure in data.failures() {
        eprintln!("Error: {}", failure);
    }

    Ok(!data.has_failures())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::parse::OutlineNode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn project(name: &str, actions: &[(&str, &[&str])]) -> Project {
        let mut actions_node = OutlineNode::new("Actions");
        for (heading, tags) in actions {
            actions_node = actions_node.with_child(
                OutlineNode::new(*heading)
                    .with_todo("NEXT")
                    .with_tags(tags.iter().copied()),
            );
        }
        Project::from_node(&OutlineNode::new(name).with_child(actions_node))
    }

    fn sample() -> Vec<Project> {
        vec![
            project("A", &[("a1", &[])]),
            project("B", &[]),
            project("C", &[("c1", &[]), ("c2", &[])]),
            project("D", &[]),
            project("E", &[("e1", &["x"])]),
        ]
    }

    fn names(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_natural_order() {
        let projects = sample();
        let ordered = display_order(&projects, DisplayOrder::Natural, &mut StdRng::seed_from_u64(1));
        assert_eq!(names(&ordered), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_random_order_is_permutation() {
        let projects = sample();
        for seed in 0..20 {
            let ordered = display_order(
                &projects,
                DisplayOrder::Random,
                &mut StdRng::seed_from_u64(seed),
            );
            let mut shown = names(&ordered);
            assert_eq!(shown.len(), projects.len());
            shown.sort();
            assert_eq!(shown, vec!["A", "B", "C", "D", "E"]);

            let total: usize = ordered.iter().map(|p| p.actions.len()).sum();
            assert_eq!(total, 4);
        }
    }

    #[test]
    fn test_tag_filter() {
        let p = project("P", &[("work item", &["work"]), ("home item", &["home"])]);
        let headings = |tag: Option<&str>| -> Vec<String> {
            visible_actions(&p, tag)
                .iter()
                .map(|a| a.heading.clone())
                .collect()
        };
        assert_eq!(headings(Some("work")), vec!["work item"]);
        assert_eq!(headings(None), vec!["work item", "home item"]);
        assert!(headings(Some("garden")).is_empty());
        // Filtering never touches the project itself
        assert_eq!(p.actions.len(), 2);
    }

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_build_view_summary() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("projects");
        write_file(
            &dir.join("alpha/alpha.org"),
            "* Actions\n** NEXT Plan :work:\n** NEXT Shop :home:\n",
        );
        fs::create_dir_all(dir.join("beta")).unwrap();
        let inbox = temp.path().join("inbox");
        write_file(&inbox.join("scan.pdf"), "x");

        let config = Config {
            projects: vec![dir.to_string_lossy().into_owned()],
            inboxes: vec![inbox.to_string_lossy().into_owned()],
            bookmarks: None,
        };
        let data = ReportData::gather(&config);
        let options = ReportOptions {
            order: DisplayOrder::Natural,
            tag: Some("work".to_string()),
        };
        let view = build_view(&data, &options, &mut StdRng::seed_from_u64(7));

        assert_eq!(view.projects.len(), 2);
        assert_eq!(view.projects[0].actions.len(), 1);
        assert_eq!(view.projects[0].actions[0].heading, "Plan");
        assert_eq!(view.summary.projects, 2);
        assert_eq!(view.summary.next_actions, 2);
        assert_eq!(view.summary.actionless_projects, 1);
        assert_eq!(view.summary.warnings.len(), 1);
        assert_eq!(view.summary.inboxes[0].items, 1);
        assert!(!view.summary.inboxes_empty);
        assert!(view.summary.failures.is_empty());
        assert!(!data.has_failures());
    }

    #[test]
    fn test_failures_collected_from_sources_and_inboxes() {
        let temp = tempdir().unwrap();
        let config = Config {
            projects: vec![temp.path().join("gone.org").to_string_lossy().into_owned()],
            inboxes: vec![temp.path().join("no-inbox").to_string_lossy().into_owned()],
            bookmarks: None,
        };
        let data = ReportData::gather(&config);
        assert!(data.has_failures());
        assert_eq!(data.failures().count(), 2);

        let options = ReportOptions::default();
        let view = build_view(&data, &options, &mut StdRng::seed_from_u64(0));
        assert!(view.projects.is_empty());
        assert!(view.summary.inboxes.is_empty());
        assert!(!view.summary.inboxes_empty);
        let codes: Vec<_> = view.summary.failures.iter().map(|f| f.code).collect();
        assert_eq!(codes, vec!["UNREADABLE_SOURCE", "DIRECTORY_ENUMERATION"]);
    }

    #[test]
    fn test_failed_inbox_is_not_reported_empty() {
        let temp = tempdir().unwrap();
        let empty = temp.path().join("inbox");
        fs::create_dir(&empty).unwrap();
        let config = Config {
            projects: Vec::new(),
            inboxes: vec![
                empty.to_string_lossy().into_owned(),
                temp.path().join("missing").to_string_lossy().into_owned(),
            ],
            bookmarks: None,
        };
        let data = ReportData::gather(&config);
        let options = ReportOptions::default();
        let view = build_view(&data, &options, &mut StdRng::seed_from_u64(0));

        assert_eq!(view.summary.inboxes.len(), 1);
        assert!(view.summary.inboxes[0].is_empty());
        assert!(!view.summary.inboxes_empty);

        let text = Renderer::with_config(RenderConfig::default())
            .render(&view)
            .unwrap();
        assert!(!text.contains("All inboxes empty"));
    }
}
