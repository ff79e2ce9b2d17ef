//! The chat-completion seam between the adapter and a provider.

use crate::error::Result;

/// Sends one prompt to a text-completion provider and returns the raw reply.
///
/// One call per invocation: implementations do not retry or throttle.
pub trait ChatCompletion {
    fn complete(&self, prompt: &str) -> Result<String>;
}

impl<T: ChatCompletion + ?Sized> ChatCompletion for &T {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }
}

impl<T: ChatCompletion + ?Sized> ChatCompletion for Box<T> {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }
}
