//! In-process transport with canned replies, for tests and offline runs.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{OracleError, Result};
use crate::transport::ChatCompletion;

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail(ScriptedFailure),
}

/// Failure a [`ScriptedCompletion`] can be told to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedFailure {
    Unavailable,
    Unauthorized,
    RateLimited,
    Timeout,
}

impl ScriptedFailure {
    fn to_error(self) -> OracleError {
        match self {
            Self::Unavailable => OracleError::Unavailable("scripted failure".to_string()),
            Self::Unauthorized => OracleError::Unauthorized { status: 401 },
            Self::RateLimited => OracleError::RateLimited {
                retry_after_secs: None,
            },
            Self::Timeout => OracleError::Timeout,
        }
    }
}

/// Answers prompts from a script keyed by the text at the end of the prompt.
///
/// Clones share the prompt log, so a test can keep a handle after moving the
/// transport into an adapter.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCompletion {
    default_reply: Option<String>,
    script: BTreeMap<String, Scripted>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedCompletion {
    /// Replies `null` to everything until scripted otherwise.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = Some(reply.into());
        self
    }

    /// Replies `reply` to prompts ending with `text`.
    pub fn with_reply(mut self, text: impl Into<String>, reply: impl Into<String>) -> Self {
        self.script.insert(text.into(), Scripted::Reply(reply.into()));
        self
    }

    /// Fails prompts ending with `text`.
    pub fn with_failure(mut self, text: impl Into<String>, failure: ScriptedFailure) -> Self {
        self.script.insert(text.into(), Scripted::Fail(failure));
        self
    }

    /// Every prompt received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn lookup(&self, prompt: &str) -> Option<&Scripted> {
        // Longest key first so "korea, south" is not shadowed by "south".
        self.script
            .iter()
            .filter(|(text, _)| prompt.ends_with(text.as_str()))
            .max_by_key(|(text, _)| text.len())
            .map(|(_, scripted)| scripted)
    }
}

impl ChatCompletion for ScriptedCompletion {
    fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        match self.lookup(prompt) {
            Some(Scripted::Reply(reply)) => Ok(reply.clone()),
            Some(Scripted::Fail(failure)) => Err(failure.to_error()),
            None => Ok(self
                .default_reply
                .clone()
                .unwrap_or_else(|| "null".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_suffix_wins() {
        let scripted = ScriptedCompletion::new()
            .with_reply("south", "ZA")
            .with_reply("korea, south", "KR");
        assert_eq!(scripted.complete("prompt korea, south").unwrap(), "KR");
        assert_eq!(scripted.complete("prompt south").unwrap(), "ZA");
        assert_eq!(scripted.complete("prompt north").unwrap(), "null");
        assert_eq!(scripted.call_count(), 3);
    }

    #[test]
    fn clones_share_the_prompt_log() {
        let scripted = ScriptedCompletion::new().with_failure("x", ScriptedFailure::Timeout);
        let handle = scripted.clone();
        assert!(matches!(scripted.complete("x"), Err(OracleError::Timeout)));
        assert_eq!(handle.prompts(), vec!["x".to_string()]);
    }
}
