//! Configuration file loading for destcheck.
//!
//! Discovers and loads `destcheck.toml` from the dataset directory.
//! Merges config file settings with CLI arguments (CLI extends or enables, never disables).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use destcheck_core::settings::DEFAULT_REPORT_NAME;
use destcheck_dataset::DEFAULT_BACKUP_SUFFIX;
use fs_err as fs;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "destcheck.toml";

/// Top-level configuration from destcheck.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DestcheckConfig {
    /// Rule allow/deny lists.
    pub policy: PolicyConfig,

    pub engine: EngineConfig,

    /// Dataset conventions (POI id prefixes).
    pub conventions: ConventionsConfig,

    pub output: OutputConfig,

    /// Backup settings for fix-mode writes.
    pub backups: BackupsConfig,
}

/// Policy section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Allowlist patterns for rule ids.
    /// If non-empty, only allowlisted rules run.
    pub allow: Vec<String>,

    /// Denylist patterns for rule ids. Deny wins over allow.
    pub deny: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Run per-city rules on a thread pool.
    pub parallel: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConventionsConfig {
    /// POI id prefix overrides keyed by city id or city name.
    pub poi_prefix: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Artifact base name; `validation_report` when unset.
    pub report_name: Option<String>,

    /// Output directory, relative to the config file's directory.
    pub dir: Option<Utf8PathBuf>,
}

/// Backups section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackupsConfig {
    /// Whether to copy dataset files aside before rewriting them.
    pub enabled: bool,

    /// Suffix for backup files.
    pub suffix: String,
}

impl Default for BackupsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
        }
    }
}

/// Discover the destcheck.toml config file.
///
/// A directory input is searched directly; a file input is searched in its parent.
/// Returns `None` if no config file is found.
pub fn discover_config(input: &Utf8Path) -> Option<Utf8PathBuf> {
    let dir = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or(Utf8Path::new("."))
    };
    let dir = if dir.as_str().is_empty() {
        Utf8Path::new(".")
    } else {
        dir
    };

    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.is_file() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a destcheck.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<DestcheckConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    let mut config =
        parse_config(&contents).with_context(|| format!("parse config file {}", path))?;

    if let Some(dir) = config.output.dir.take() {
        let base = path.parent().unwrap_or(Utf8Path::new(""));
        config.output.dir = Some(if dir.is_absolute() { dir } else { base.join(dir) });
    }
    Ok(config)
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<DestcheckConfig> {
    let config: DestcheckConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load the explicit config if given, else discover one next to the input.
pub fn load_or_default(
    explicit: Option<&Utf8Path>,
    input: &Utf8Path,
) -> anyhow::Result<DestcheckConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match discover_config(input) {
        Some(path) => load_config(&path),
        None => Ok(DestcheckConfig::default()),
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
    /// Allow patterns (from config file, extended by CLI).
    pub allow: Vec<String>,

    /// Deny patterns (from config file, extended by CLI).
    pub deny: Vec<String>,

    pub parallel: bool,

    pub poi_prefixes: BTreeMap<String, String>,

    pub report_name: String,

    pub out_dir: Option<Utf8PathBuf>,

    pub backups: BackupsConfig,
}

/// CLI values that take part in the merge.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides<'a> {
    pub allow: &'a [String],
    pub deny: &'a [String],
    pub parallel: bool,
    pub report_name: Option<&'a str>,
    pub out_dir: Option<&'a Utf8Path>,
    pub no_backup: bool,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: DestcheckConfig,
}

impl ConfigMerger {
    pub fn new(config: DestcheckConfig) -> Self {
        Self { config }
    }

    /// CLI `allow` and `deny` lists extend the config file lists; CLI booleans OR with
    /// the config; CLI values replace config values.
    pub fn merge_validate_args(self, cli: &CliOverrides<'_>) -> MergedConfig {
        let DestcheckConfig {
            policy,
            engine,
            conventions,
            output,
            mut backups,
        } = self.config;

        let mut allow = policy.allow;
        let mut deny = policy.deny;
        extend_unique(&mut allow, cli.allow);
        extend_unique(&mut deny, cli.deny);

        if backups.suffix.trim().is_empty() {
            warn!("empty backup suffix in config; using {}", DEFAULT_BACKUP_SUFFIX);
            backups.suffix = DEFAULT_BACKUP_SUFFIX.to_string();
        }
        if cli.no_backup {
            backups.enabled = false;
        }

        MergedConfig {
            allow,
            deny,
            parallel: cli.parallel || engine.parallel,
            poi_prefixes: conventions.poi_prefix,
            report_name: cli
                .report_name
                .map(str::to_string)
                .or(output.report_name)
                .unwrap_or_else(|| DEFAULT_REPORT_NAME.to_string()),
            out_dir: cli.out_dir.map(Utf8Path::to_path_buf).or(output.dir),
            backups,
        }
    }
}

fn extend_unique(into: &mut Vec<String>, extra: &[String]) {
    for pattern in extra {
        if !into.contains(pattern) {
            into.push(pattern.clone());
        }
    }
}
