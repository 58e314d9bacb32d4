//! gtd - A Getting Things Done next actions report
//!
//! gtd provides:
//! - Projects gathered from directories of org files and project list documents
//! - The NEXT actions under each project's "Actions" heading
//! - Totals, projects without next actions, and inbox status
//! - Unified output format (text/json/jsonl)

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod flows;
mod outline;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_tracing(cli.verbose, cli.quiet);
    cli::run(cli)
}
