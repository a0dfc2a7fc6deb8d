//! Command-line entry point for the retrace search client.

mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{CliCommand, parse_cli, print_history, print_search, print_suggestions};
use tracing_subscriber::EnvFilter;
use workflow::Workflow;

fn main() -> Result<()> {
    let cli = parse_cli();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "retrace=debug,retrace_history=debug,retrace_model=debug"
        } else {
            "warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let resolved = settings::load(&cli)?;
    let mut workflow = Workflow::from_settings(resolved);

    match cli.command {
        CliCommand::Search { query } => {
            let report = workflow.run_search(query.join(" "))?;
            print_search(&report, cli.output)
        }
        CliCommand::History { kinds } => {
            let kinds = kinds.into_iter().map(Into::into).collect();
            let entries = workflow.run_history(kinds)?;
            print_history(&entries, cli.output)
        }
        CliCommand::Suggest { input } => {
            let suggestions = workflow.run_suggest(input)?;
            print_suggestions(&suggestions, cli.output)
        }
    }
}
