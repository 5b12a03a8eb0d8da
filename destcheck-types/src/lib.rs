//! Shared DTOs (schemas-as-code) for the destcheck workspace.
//!
//! # Design constraints
//! - Dataset types round-trip through disk: fix-mode writes are read verbatim by the
//!   downstream database loader, so unknown fields are carried along untouched.
//! - Report types are a published artifact. Prefer adding optional fields over changing
//!   semantics.

pub mod dataset;
pub mod diagnostic;
pub mod report;
pub mod vocab;

/// Schema identifiers.
pub mod schema {
    pub const DESTCHECK_REPORT_V1: &str = "destcheck.report.v1";
}
