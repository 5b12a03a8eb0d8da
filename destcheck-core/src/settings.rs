//! Clap-free settings for the validation pipeline.

use camino::Utf8PathBuf;
use destcheck_dataset::{LoadOptions, DEFAULT_BACKUP_SUFFIX};
use destcheck_domain::EngineOptions;
use std::collections::BTreeMap;

pub const DEFAULT_REPORT_NAME: &str = "validation_report";

#[derive(Debug, Clone)]
pub struct ValidationSettings {
    /// Dataset directory or single dataset file.
    pub input: Utf8PathBuf,
    /// Where report artifacts go; the dataset's directory when unset.
    pub out_dir: Option<Utf8PathBuf>,
    /// Artifact base name: `<report_name>.json` and `<report_name>.md`.
    pub report_name: String,

    // Engine
    pub fix_mode: bool,
    pub parallel: bool,
    pub allow: Vec<String>,
    pub deny: Vec<String>,
    pub poi_prefixes: BTreeMap<String, String>,

    // Persistence
    /// Write repaired records back in fix mode.
    pub persist: bool,
    pub backup_enabled: bool,
    pub backup_suffix: String,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            input: Utf8PathBuf::from("."),
            out_dir: None,
            report_name: DEFAULT_REPORT_NAME.to_string(),
            fix_mode: false,
            parallel: false,
            allow: Vec::new(),
            deny: Vec::new(),
            poi_prefixes: BTreeMap::new(),
            persist: true,
            backup_enabled: true,
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
        }
    }
}

impl ValidationSettings {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            fix_mode: self.fix_mode,
            parallel: self.parallel,
            allow: self.allow.clone(),
            deny: self.deny.clone(),
            poi_prefixes: self.poi_prefixes.clone(),
        }
    }

    /// Keep our own report out of the next directory scan.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            exclude: vec![format!("{}.json", self.report_name)],
        }
    }
}
