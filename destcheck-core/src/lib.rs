//! Embeddable core library for destcheck.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking into a data
//! pipeline or other host process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`DatasetSource`](ports::DatasetSource): load the destination records
//! - [`WritePort`](ports::WritePort): write files, copy backups and create directories
//!
//! The [`adapters`] module provides default filesystem-backed implementations.
//!
//! # Entry point
//!
//! [`run_validation`](pipeline::run_validation) walks `Loaded → Validated → Reported →
//! Persisted` and returns the report together with every path it wrote.

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export dataset types so embedders don't need destcheck-dataset directly.
pub use destcheck_dataset::{Dataset, LoadError};
pub use pipeline::{run_validation, PipelineError, RunOutcome, RunStage};
pub use settings::ValidationSettings;
