//! Disambiguation oracle for country values the vocabulary could not match.
//!
//! [`OracleAdapter`] renders the prompt, sends it through a
//! [`ChatCompletion`] transport and keeps the reply only when it is a known
//! cca2 code. [`MistralClient`] is the production transport;
//! [`ScriptedCompletion`] answers from a script without network I/O.

#![deny(unsafe_code)]

pub mod adapter;
pub mod error;
pub mod mistral;
pub mod scripted;
pub mod transport;

pub use adapter::{DisambiguationOracle, OracleAdapter};
pub use error::{OracleError, Result};
pub use mistral::{API_KEY_ENV_VAR, MistralClient, MistralConfig};
pub use scripted::{ScriptedCompletion, ScriptedFailure};
pub use transport::ChatCompletion;
