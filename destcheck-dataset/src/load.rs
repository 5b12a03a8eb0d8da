use camino::{Utf8Path, Utf8PathBuf};
use destcheck_types::dataset::City;
use fs_err as fs;
use glob::{glob, Pattern};
use serde_json::Value;
use std::ops::Range;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset path {path} does not exist")]
    NotFound { path: Utf8PathBuf },

    #[error("no dataset files (*.json) under {path}")]
    Empty { path: Utf8PathBuf },

    #[error("{source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {message}")]
    Json { path: Utf8PathBuf, message: String },

    #[error("{path}: expected a city object or an array of city objects")]
    Shape { path: Utf8PathBuf },

    #[error("cannot scan {pattern}: {message}")]
    Glob { pattern: String, message: String },
}

/// How a file stores its records; writes keep the same layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// The file is one city object.
    Single,
    /// The file is an array of city objects.
    Array,
}

/// One loaded file and the slice of [`Dataset::cities`] it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: Utf8PathBuf,
    pub layout: RecordLayout,
    pub records: Range<usize>,
}

/// Every city of a run, flattened in file order, plus where each came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// The path the caller asked to load (file or directory).
    pub input: Utf8PathBuf,
    pub cities: Vec<City>,
    pub files: Vec<SourceFile>,
}

impl Dataset {
    /// Directory the dataset lives in; report artifacts go here by default.
    pub fn base_dir(&self) -> Utf8PathBuf {
        if self.input.is_dir() {
            self.input.clone()
        } else {
            self.input
                .parent()
                .map(Utf8Path::to_path_buf)
                .unwrap_or_else(|| Utf8PathBuf::from("."))
        }
    }

    pub fn input_paths(&self) -> Vec<String> {
        self.files.iter().map(|f| f.path.to_string()).collect()
    }

    /// Files whose records differ from `pristine` (a snapshot taken right after load).
    pub fn changed_files(&self, pristine: &[City]) -> Vec<&SourceFile> {
        self.files
            .iter()
            .filter(|f| self.cities.get(f.records.clone()) != pristine.get(f.records.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// File names (not paths) to leave out of a directory scan, e.g. the report.
    pub exclude: Vec<String>,
}

/// Load a dataset from a directory of `*.json` files or from a single file.
///
/// Files are read in sorted path order. In a directory scan, files named in
/// `options.exclude` and earlier validation reports are skipped.
pub fn load_dataset(input: &Utf8Path, options: &LoadOptions) -> Result<Dataset, LoadError> {
    if !input.exists() {
        return Err(LoadError::NotFound {
            path: input.to_path_buf(),
        });
    }

    let paths = if input.is_dir() {
        scan_dir(input, options)?
    } else {
        vec![input.to_path_buf()]
    };

    let mut dataset = Dataset {
        input: input.to_path_buf(),
        cities: Vec::new(),
        files: Vec::new(),
    };

    for path in paths {
        let contents = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let value: Value = serde_json::from_str(&contents).map_err(|e| LoadError::Json {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if input.is_dir() && is_report(&value) {
            debug!(path = %path, "skipping validation report");
            continue;
        }

        let (layout, cities) = parse_records(&path, value)?;
        debug!(path = %path, records = cities.len(), "loaded dataset file");

        let start = dataset.cities.len();
        dataset.cities.extend(cities);
        dataset.files.push(SourceFile {
            path,
            layout,
            records: start..dataset.cities.len(),
        });
    }

    if dataset.files.is_empty() {
        return Err(LoadError::Empty {
            path: input.to_path_buf(),
        });
    }
    Ok(dataset)
}

fn scan_dir(dir: &Utf8Path, options: &LoadOptions) -> Result<Vec<Utf8PathBuf>, LoadError> {
    // The directory itself may contain glob metacharacters.
    let pattern = format!("{}/*.json", Pattern::escape(dir.as_str()));
    let pattern_str = pattern.as_str();
    debug!(pattern = %pattern_str, "scanning for dataset files");

    let entries = glob(pattern_str).map_err(|e| LoadError::Glob {
        pattern: pattern_str.to_string(),
        message: e.to_string(),
    })?;

    let mut out = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| LoadError::Glob {
            pattern: pattern_str.to_string(),
            message: e.to_string(),
        })?;
        let path = Utf8PathBuf::from(path.to_string_lossy().to_string());

        let name = path.file_name().unwrap_or_default();
        if options.exclude.iter().any(|x| x == name) {
            debug!(path = %path, "excluded from dataset scan");
            continue;
        }
        out.push(path);
    }

    // Deterministic order matters.
    out.sort();
    Ok(out)
}

/// Reports written by this tool carry a `destcheck.report.*` schema id.
fn is_report(value: &Value) -> bool {
    value
        .get("schema")
        .and_then(Value::as_str)
        .is_some_and(|s| s.starts_with("destcheck.report"))
}

fn parse_records(path: &Utf8Path, value: Value) -> Result<(RecordLayout, Vec<City>), LoadError> {
    let json_err = |e: serde_json::Error| LoadError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    match value {
        Value::Array(items) => {
            let cities = items
                .into_iter()
                .map(|item| serde_json::from_value::<City>(item).map_err(json_err))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((RecordLayout::Array, cities))
        }
        obj @ Value::Object(_) => {
            let city = serde_json::from_value::<City>(obj).map_err(json_err)?;
            Ok((RecordLayout::Single, vec![city]))
        }
        _ => Err(LoadError::Shape {
            path: path.to_path_buf(),
        }),
    }
}
