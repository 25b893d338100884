//! Inbound adapter for test-runner reports.

pub mod report;

pub use report::{convert, parse_report, validate_counts};
