#![deny(unsafe_code)]

//! Country resolution for lane spreadsheets.
//!
//! A [`ResolutionContext`] holds the reference vocabulary and its indices.
//! [`ResolutionPipeline`] walks each country column, tries the fuzzy
//! cascade, falls back to the disambiguation oracle and projects the winner
//! to a cca2 code.

pub mod context;
pub mod error;
pub mod pipeline;
pub mod projection;

pub use context::ResolutionContext;
pub use error::{PipelineError, Result};
pub use pipeline::{CASCADE, ColumnStats, Progress, ResolutionPipeline};
pub use projection::project;
