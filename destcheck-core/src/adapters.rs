//! Default filesystem-backed port implementations.

use crate::ports::{DatasetSource, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use destcheck_dataset::{Dataset, LoadError, LoadOptions};
use fs_err as fs;

/// Loads a dataset from disk via `destcheck_dataset::load_dataset`.
#[derive(Debug, Clone)]
pub struct FsDatasetSource {
    pub input: Utf8PathBuf,
    pub options: LoadOptions,
}

impl FsDatasetSource {
    pub fn new(input: Utf8PathBuf, options: LoadOptions) -> Self {
        Self { input, options }
    }
}

impl DatasetSource for FsDatasetSource {
    fn load_dataset(&self) -> Result<Dataset, LoadError> {
        destcheck_dataset::load_dataset(&self.input, &self.options)
    }
}

/// In-memory dataset source for embedding and testing.
#[derive(Debug, Clone)]
pub struct InMemoryDatasetSource {
    dataset: Dataset,
}

impl InMemoryDatasetSource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl DatasetSource for InMemoryDatasetSource {
    fn load_dataset(&self) -> Result<Dataset, LoadError> {
        Ok(self.dataset.clone())
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn copy_file(&self, from: &Utf8Path, to: &Utf8Path) -> anyhow::Result<()> {
        fs::copy(from, to)
            .map(|_| ())
            .with_context(|| format!("copy {} to {}", from, to))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
