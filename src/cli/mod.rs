mod args;
mod output;

pub(crate) use args::{CliArgs, CliCommand, parse_cli};
pub(crate) use output::{print_history, print_search, print_suggestions};
