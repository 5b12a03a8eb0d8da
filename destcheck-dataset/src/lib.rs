//! Dataset ingestion and persistence.
//!
//! A dataset is either a directory of `*.json` files or a single file. Each file holds
//! one city record or an array of them. Loading is all-or-nothing: any unreadable or
//! malformed file aborts with a [`LoadError`] before validation starts. Missing fields
//! are not load errors; the rule catalog reports them.

mod load;
mod write;

pub use load::{load_dataset, Dataset, LoadError, LoadOptions, RecordLayout, SourceFile};
pub use write::{backup_path, encode_file, DEFAULT_BACKUP_SUFFIX};
