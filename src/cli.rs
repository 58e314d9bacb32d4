//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::core::config::{Config, DEFAULT_CONFIG_PATH};
use crate::core::paths::expand_path;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::flows::report::{run_report, DisplayOrder, ReportOptions};

/// gtd - list the next actions of every project.
#[derive(Parser, Debug)]
#[command(name = "gtd")]
#[command(
    author,
    version,
    about,
    long_about = r#"gtd prints a Getting Things Done next actions list from org files.

Project sources come from the configuration file (YAML):

    projects:
      - ~/gtd/projects        # directory: one project per <sub>/<sub>.org
      - ~/gtd/projects.org    # document: children of the first heading
    inboxes:
      - ~/gtd/inbox

A project's next actions are the NEXT items directly under its "Actions"
heading.

Examples:
    gtd
    gtd --randomize
    gtd work
    gtd --format json
"#
)]
pub struct Cli {
    /// Only display actions with this tag.
    #[arg(value_name = "TAG")]
    pub tag: Option<String>,

    /// Display projects in random order.
    #[arg(short, long)]
    pub randomize: bool,

    /// Configuration file.
    #[arg(
        long,
        env = "GTD_CONFIG",
        default_value = DEFAULT_CONFIG_PATH,
        value_name = "PATH",
        long_help = "Configuration file to read project sources and inboxes from.\n\n\
A leading ~ and $VARIABLES are expanded."
    )]
    pub config: String,

    /// Output format (text/json/jsonl).
    #[arg(
        long,
        default_value = "text",
        value_parser = ["text", "json", "jsonl"],
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default): colored human-readable report\n\
- json: a single JSON document\n\
- jsonl: one JSON object per project, then a summary object"
    )]
    pub format: String,

    /// Pretty-print JSON output with indentation.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(
        long,
        long_help = "Disable colored output. Color is also disabled when stdout is not a terminal."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (scan diagnostics on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Install the stderr log subscriber. RUST_LOG takes precedence over flags.
pub fn init_tracing(verbose: bool, quiet: bool) {
    let fallback_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let color = !cli.no_color && format == OutputFormat::Text && std::io::stdout().is_terminal();
    let render_config = RenderConfig::new(format)
        .with_pretty(cli.pretty)
        .with_color(color);

    let config_path = expand_path(&cli.config);
    let config = Config::load(&config_path).context("Failed to load configuration")?;

    let options = ReportOptions {
        order: if cli.randomize {
            DisplayOrder::Random
        } else {
            DisplayOrder::Natural
        },
        tag: cli.tag,
    };

    if !run_report(&config, &options, render_config)? {
        bail!("Some project sources or inboxes could not be read");
    }

    Ok(())
}
