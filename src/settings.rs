use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, File};
use retrace::app_dirs;
use retrace::debounce::DEBOUNCE_DELAY;
use serde::Deserialize;

use crate::cli::CliArgs;

/// Name of the configuration file looked up in the config directory.
const CONFIG_FILE: &str = "retrace.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    history: HistorySection,
    timers: TimerSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct HistorySection {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TimerSection {
    debounce_ms: Option<u64>,
}

/// Effective settings after merging config files and CLI overrides.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) history_path: PathBuf,
    pub(crate) debounce: Duration,
}

/// Load settings: config-dir file first, then an explicit `--config` file,
/// then CLI flags, later sources winning.
pub(crate) fn load(cli: &CliArgs) -> Result<Settings> {
    let mut builder = Config::builder();
    let default_file = app_dirs::get_config_dir()?.join(CONFIG_FILE);
    builder = builder.add_source(File::from(default_file).required(false));
    if let Some(extra) = &cli.config {
        builder = builder.add_source(File::from(extra.clone()).required(true));
    }

    let raw: RawSettings = builder
        .build()
        .context("failed to read configuration")?
        .try_deserialize()
        .context("failed to parse configuration")?;

    let history_path = match cli.history_file.clone().or(raw.history.path) {
        Some(path) => path,
        None => app_dirs::get_data_dir()?.join("history.json"),
    };
    let debounce = raw
        .timers
        .debounce_ms
        .map_or(DEBOUNCE_DELAY, Duration::from_millis);

    Ok(Settings {
        history_path,
        debounce,
    })
}
