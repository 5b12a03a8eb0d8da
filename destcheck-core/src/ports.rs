//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;
use destcheck_dataset::{Dataset, LoadError};

/// Source of destination records.
pub trait DatasetSource {
    fn load_dataset(&self) -> Result<Dataset, LoadError>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn copy_file(&self, from: &Utf8Path, to: &Utf8Path) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
