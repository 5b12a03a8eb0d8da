//! The validation pipeline, extracted from the CLI.
//!
//! `Loaded → Validated → Reported → Persisted` with no back-edges. A load failure ends
//! the run before any rule executes and nothing is written.

use crate::ports::{DatasetSource, WritePort};
use crate::settings::ValidationSettings;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use destcheck_dataset::{backup_path, encode_file, LoadError};
use destcheck_domain::Engine;
use destcheck_render::render_report_md;
use destcheck_report::{build_report, ReportContext, ReportError};
use destcheck_types::diagnostic::Status;
use destcheck_types::report::{ReportToolInfo, ValidationReport};
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// The last stage a run reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunStage {
    Loaded,
    Validated,
    Reported,
    Persisted,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Loaded => "loaded",
            Self::Validated => "validated",
            Self::Reported => "reported",
            Self::Persisted => "persisted",
        })
    }
}

/// Error type for pipeline results. Every variant maps to exit code 1; a FAIL verdict
/// is not an error (see [`RunOutcome::exit_code`]).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to load dataset: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("serialize {what}: {source}")]
    Serialize {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("write failed after stage '{stage}': {source:#}")]
    Write {
        stage: RunStage,
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Outcome of `run_validation`.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: ValidationReport,
    pub stage: RunStage,
    pub report_json: Utf8PathBuf,
    pub report_md: Utf8PathBuf,
    /// Dataset files rewritten in fix mode.
    pub persisted: Vec<Utf8PathBuf>,
    pub backups: Vec<Utf8PathBuf>,
}

impl RunOutcome {
    pub fn status(&self) -> Status {
        self.report.summary.status
    }

    /// 0 on PASS, 2 on FAIL.
    pub fn exit_code(&self) -> i32 {
        match self.status() {
            Status::Pass => 0,
            Status::Fail => 2,
        }
    }
}

pub fn run_validation(
    settings: &ValidationSettings,
    source: &dyn DatasetSource,
    writer: &dyn WritePort,
    tool: ReportToolInfo,
) -> Result<RunOutcome, PipelineError> {
    let mut dataset = source.load_dataset()?;
    info!(
        stage = %RunStage::Loaded,
        files = dataset.files.len(),
        cities = dataset.cities.len(),
        "dataset loaded"
    );

    let pristine = settings.fix_mode.then(|| dataset.cities.clone());
    let engine = Engine::new(settings.engine_options());
    let collector = engine.run(&mut dataset.cities);
    info!(stage = %RunStage::Validated, status = %collector.status(), "rules finished");

    let report = build_report(
        &collector,
        ReportContext {
            tool,
            timestamp: Utc::now(),
            fix_mode: settings.fix_mode,
            inputs: dataset.input_paths(),
        },
    )?;

    let out_dir = settings
        .out_dir
        .clone()
        .unwrap_or_else(|| dataset.base_dir());
    let (report_json, report_md) =
        write_report_artifacts(&report, &out_dir, &settings.report_name, writer)?;
    info!(stage = %RunStage::Reported, path = %report_json, "report written");

    let mut outcome = RunOutcome {
        report,
        stage: RunStage::Reported,
        report_json,
        report_md,
        persisted: Vec::new(),
        backups: Vec::new(),
    };

    let Some(pristine) = pristine else {
        return Ok(outcome);
    };
    if !settings.persist {
        info!("fix mode without persistence; dataset files left untouched");
        return Ok(outcome);
    }

    for file in dataset.changed_files(&pristine) {
        let contents = encode_file(&dataset, file).map_err(|source| PipelineError::Serialize {
            what: file.path.to_string(),
            source,
        })?;

        if settings.backup_enabled {
            let backup = backup_path(&file.path, &settings.backup_suffix);
            writer
                .copy_file(&file.path, &backup)
                .map_err(|source| write_err(RunStage::Reported, source))?;
            warn!(path = %file.path, backup = %backup, "backed up dataset file before rewrite");
            outcome.backups.push(backup);
        }

        writer
            .write_file(&file.path, contents.as_bytes())
            .map_err(|source| write_err(RunStage::Reported, source))?;
        outcome.persisted.push(file.path.clone());
    }

    outcome.stage = RunStage::Persisted;
    info!(
        stage = %RunStage::Persisted,
        files = outcome.persisted.len(),
        "repaired records written"
    );
    Ok(outcome)
}

/// Write `<name>.json` and `<name>.md` into `out_dir`.
pub fn write_report_artifacts(
    report: &ValidationReport,
    out_dir: &Utf8Path,
    name: &str,
    writer: &dyn WritePort,
) -> Result<(Utf8PathBuf, Utf8PathBuf), PipelineError> {
    writer
        .create_dir_all(out_dir)
        .map_err(|source| write_err(RunStage::Validated, source))?;

    let mut json = serde_json::to_string_pretty(report).map_err(|source| {
        PipelineError::Serialize {
            what: "report".to_string(),
            source,
        }
    })?;
    json.push('\n');
    let json_path = out_dir.join(format!("{name}.json"));
    writer
        .write_file(&json_path, json.as_bytes())
        .map_err(|source| write_err(RunStage::Validated, source))?;

    let md_path = out_dir.join(format!("{name}.md"));
    writer
        .write_file(&md_path, render_report_md(report).as_bytes())
        .map_err(|source| write_err(RunStage::Validated, source))?;

    Ok((json_path, md_path))
}

fn write_err(stage: RunStage, source: anyhow::Error) -> PipelineError {
    PipelineError::Write { stage, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDatasetSource;
    use destcheck_dataset::{Dataset, RecordLayout, SourceFile};
    use destcheck_types::dataset::{City, Coordinates};
    use serde_json::Number;
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct RecordingWriter {
        files: RefCell<BTreeMap<Utf8PathBuf, Vec<u8>>>,
        copies: RefCell<Vec<(Utf8PathBuf, Utf8PathBuf)>>,
    }

    impl WritePort for RecordingWriter {
        fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.to_vec());
            Ok(())
        }

        fn copy_file(&self, from: &Utf8Path, to: &Utf8Path) -> anyhow::Result<()> {
            self.copies
                .borrow_mut()
                .push((from.to_path_buf(), to.to_path_buf()));
            Ok(())
        }

        fn create_dir_all(&self, _path: &Utf8Path) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct FailingSource;

    impl DatasetSource for FailingSource {
        fn load_dataset(&self) -> Result<Dataset, LoadError> {
            Err(LoadError::Json {
                path: Utf8PathBuf::from("data/goa.json"),
                message: "EOF while parsing".to_string(),
            })
        }
    }

    fn tool() -> ReportToolInfo {
        ReportToolInfo {
            name: "destcheck".into(),
            version: "0.1.0".into(),
        }
    }

    fn dataset(timezone: &str) -> Dataset {
        Dataset {
            input: Utf8PathBuf::from("data/goa.json"),
            cities: vec![City {
                id: Some("C1".into()),
                name: Some("Goa".into()),
                timezone: Some(timezone.into()),
                coordinates: Some(Coordinates {
                    latitude: Some(Number::from(15)),
                    longitude: Some(Number::from(74)),
                }),
                ..City::default()
            }],
            files: vec![SourceFile {
                path: Utf8PathBuf::from("data/goa.json"),
                layout: RecordLayout::Single,
                records: 0..1,
            }],
        }
    }

    fn settings(fix_mode: bool) -> ValidationSettings {
        ValidationSettings {
            input: Utf8PathBuf::from("data/goa.json"),
            fix_mode,
            allow: vec!["city.fields".into()],
            ..ValidationSettings::default()
        }
    }

    #[test]
    fn load_failure_writes_nothing() {
        let writer = RecordingWriter::default();
        let err = run_validation(&settings(false), &FailingSource, &writer, tool())
            .expect_err("must abort");
        assert!(matches!(err, PipelineError::Load(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(writer.files.borrow().is_empty());
    }

    #[test]
    fn report_only_run_stops_at_reported() {
        let writer = RecordingWriter::default();
        let source = InMemoryDatasetSource::new(dataset("IST"));
        let outcome = run_validation(&settings(false), &source, &writer, tool()).expect("run");

        assert_eq!(outcome.stage, RunStage::Reported);
        assert_eq!(outcome.status(), Status::Fail);
        assert_eq!(outcome.exit_code(), 2);
        assert_eq!(outcome.report_json, Utf8PathBuf::from("data/validation_report.json"));
        let files = writer.files.borrow();
        assert_eq!(
            files.keys().cloned().collect::<Vec<_>>(),
            vec![
                Utf8PathBuf::from("data/validation_report.json"),
                Utf8PathBuf::from("data/validation_report.md"),
            ]
        );
    }

    #[test]
    fn fix_run_persists_changed_files_with_backup() {
        let writer = RecordingWriter::default();
        let source = InMemoryDatasetSource::new(dataset("IST"));
        let outcome = run_validation(&settings(true), &source, &writer, tool()).expect("run");

        assert_eq!(outcome.stage, RunStage::Persisted);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(outcome.persisted, vec![Utf8PathBuf::from("data/goa.json")]);
        assert_eq!(
            writer.copies.borrow().as_slice(),
            &[(
                Utf8PathBuf::from("data/goa.json"),
                Utf8PathBuf::from("data/goa.json.destcheck.bak")
            )]
        );
        let files = writer.files.borrow();
        let written = String::from_utf8(files[&Utf8PathBuf::from("data/goa.json")].clone())
            .expect("utf8");
        assert!(written.contains("\"timezone\": \"Asia/Kolkata\""));
    }

    #[test]
    fn unchanged_files_are_not_rewritten() {
        let writer = RecordingWriter::default();
        let source = InMemoryDatasetSource::new(dataset("Asia/Kolkata"));
        let outcome = run_validation(&settings(true), &source, &writer, tool()).expect("run");
        assert!(outcome.persisted.is_empty());
        assert!(writer.copies.borrow().is_empty());
    }

    #[test]
    fn no_write_keeps_dataset_untouched() {
        let writer = RecordingWriter::default();
        let source = InMemoryDatasetSource::new(dataset("IST"));
        let mut s = settings(true);
        s.persist = false;
        let outcome = run_validation(&s, &source, &writer, tool()).expect("run");
        assert_eq!(outcome.stage, RunStage::Reported);
        assert!(!writer.files.borrow().contains_key(&Utf8PathBuf::from("data/goa.json")));
        assert_eq!(outcome.report.summary.fixes, 1);
    }
}
