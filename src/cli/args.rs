use std::fmt::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use retrace::app_dirs;
use retrace_model::QueryKind;

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };
    let data_dir = match app_dirs::get_data_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("retrace {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "data directory: {data_dir}");

    Box::leak(details.into_boxed_str())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "retrace",
    version,
    long_version = long_version(),
    about = "Build, run, and re-run structured web searches with a durable local history"
)]
/// Command-line arguments accepted by the `retrace` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "RETRACE_CONFIG",
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Option<PathBuf>,
    #[arg(
        long = "history-file",
        value_name = "FILE",
        env = "RETRACE_HISTORY_FILE",
        help = "Override the history blob location (default: data directory)"
    )]
    pub(crate) history_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Output format"
    )]
    pub(crate) output: OutputFormat,
    #[arg(short, long, help = "Enable debug logging")]
    pub(crate) verbose: bool,
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum CliCommand {
    /// Run a free-text search and record it in the history.
    Search {
        #[arg(value_name = "QUERY", required = true, help = "Free-text query")]
        query: Vec<String>,
    },
    /// List recorded searches, optionally filtered by query kind.
    History {
        #[arg(
            long = "kind",
            value_enum,
            value_name = "KIND",
            help = "Keep only entries of this kind (repeatable)"
        )]
        kinds: Vec<KindArg>,
    },
    /// Show typing suggestions for a partial query.
    Suggest {
        #[arg(value_name = "INPUT", help = "Partial query text")]
        input: String,
    },
}

/// How results are rendered.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}

/// CLI-facing spelling of [`QueryKind`].
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KindArg {
    Simple,
    Single,
    Merged,
    Subquery,
}

impl From<KindArg> for QueryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Simple => Self::Simple,
            KindArg::Single => Self::Single,
            KindArg::Merged => Self::Merged,
            KindArg::Subquery => Self::Subquery,
        }
    }
}
