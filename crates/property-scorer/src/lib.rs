//! Weighted rubric scoring for candidate properties.
//!
//! The [`scorecard`] module holds the pure scoring engine together with the shell that feeds it:
//! rubric validation, the default-selection policy, configuration storage, and summary export.

pub mod config;
pub mod error;
pub mod scorecard;
pub mod telemetry;
