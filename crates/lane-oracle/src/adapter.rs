//! Prompt rendering and reply validation around a [`ChatCompletion`].

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::Result;
use crate::transport::ChatCompletion;

/// Last-resort resolver consulted when no vocabulary field matched.
pub trait DisambiguationOracle {
    /// Returns a cca2 code, or `None` when the answer is unusable.
    ///
    /// Only transport failures are errors.
    fn resolve(&self, text: &str) -> Result<Option<String>>;
}

impl<T: DisambiguationOracle + ?Sized> DisambiguationOracle for &T {
    fn resolve(&self, text: &str) -> Result<Option<String>> {
        (**self).resolve(text)
    }
}

impl<T: DisambiguationOracle + ?Sized> DisambiguationOracle for Box<T> {
    fn resolve(&self, text: &str) -> Result<Option<String>> {
        (**self).resolve(text)
    }
}

/// Oracle backed by a chat-completion transport.
pub struct OracleAdapter<T> {
    transport: T,
    prompt_template: String,
    valid_codes: BTreeSet<String>,
}

impl<T: ChatCompletion> OracleAdapter<T> {
    /// `valid_codes` is the vocabulary's cca2 set; replies outside it are
    /// discarded.
    pub fn new<I, S>(transport: T, prompt_template: impl Into<String>, valid_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transport,
            prompt_template: prompt_template.into(),
            valid_codes: valid_codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Template followed by a single space and the text.
    pub fn render_prompt(&self, text: &str) -> String {
        format!("{} {}", self.prompt_template.trim_end(), text)
    }

    /// Accepts exactly two characters naming a known cca2 code.
    pub fn validate_reply(&self, reply: &str) -> Option<String> {
        let reply = reply.trim();
        if reply.chars().count() == 2 && self.valid_codes.contains(reply) {
            Some(reply.to_string())
        } else {
            None
        }
    }
}

impl<T: ChatCompletion> DisambiguationOracle for OracleAdapter<T> {
    fn resolve(&self, text: &str) -> Result<Option<String>> {
        let reply = self.transport.complete(&self.render_prompt(text))?;
        let code = self.validate_reply(&reply);
        debug!(accepted = code.is_some(), reply_len = reply.len(), "oracle replied");
        Ok(code)
    }
}
