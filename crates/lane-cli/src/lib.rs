//! Library side of the `lane-normalizer` binary.

#![deny(unsafe_code)]

pub mod logging;
pub mod run;
pub mod summary;

pub use run::{RunReport, RunRequest, execute};
